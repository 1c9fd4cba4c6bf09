//! Engine error types

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while tokenizing, validating, or evaluating
/// expressions.
///
/// Every failure is a value returned to the caller; the engine never panics
/// on bad input and never returns a partial numeric result alongside an
/// error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// Invalid character in formula text
    #[error("Invalid character '{ch}' at byte {offset}")]
    Lex { ch: char, offset: usize },

    /// Malformed expression structure (unmatched parenthesis, empty
    /// expression, malformed number)
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Identifier not found in variables or catalog during conversion
    #[error("Unknown name \"{0}\" found in formula")]
    UnknownName(String),

    /// Structural validation found a referenced name with no catalog entry
    #[error("Name \"{0}\" is referenced but never defined")]
    UndefinedName(String),

    /// Structural validation found a cycle in the dependency graph
    #[error("Cyclic dependency detected")]
    CyclicDependency,

    /// An operator found fewer than two operands on the evaluation stack
    #[error("Operator '{0}' is missing an operand")]
    InsufficientOperands(String),

    /// The evaluation stack did not reduce to exactly one value
    #[error("Malformed expression: {0} values left after evaluation")]
    MalformedExpression(usize),

    /// Recursive identifier resolution exceeded the safety bound
    #[error("Recursion limit of {0} exceeded while resolving references")]
    RecursionLimit(usize),

    /// The requested expression name is not in the catalog
    #[error("Expression \"{0}\" not found")]
    NotFound(String),
}
