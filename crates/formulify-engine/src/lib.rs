//! # formulify-engine
//!
//! Expression engine for formulify.
//!
//! This crate provides:
//! - Formula tokenization (text → tokens)
//! - Shunting-yard conversion to postfix with identifier resolution
//! - Postfix evaluation (tokens → number)
//! - Dependency graphs with Kahn-style cycle detection
//!
//! The engine is a pure library: one evaluation call is a function of its
//! formula text, variable overrides, and catalog snapshot, with no I/O and
//! no shared state. Calls on independent snapshots may run concurrently
//! without coordination.
//!
//! ## Example
//!
//! ```rust
//! use formulify_core::{Catalog, NamedExpression};
//! use formulify_engine::{evaluate, validate, VariableMap};
//!
//! let catalog: Catalog = [
//!     NamedExpression::new("a", "a").unwrap(),
//!     NamedExpression::new("b", "b").unwrap(),
//!     NamedExpression::new("c", "a + b").unwrap(),
//! ]
//! .into_iter()
//! .collect();
//!
//! validate(&catalog).unwrap();
//!
//! let variables: VariableMap = [("a".to_string(), 1.0), ("b".to_string(), 2.0)]
//!     .into_iter()
//!     .collect();
//! assert_eq!(evaluate("c", &variables, &catalog).unwrap(), 3.0);
//! ```

pub mod dependency;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod postfix;
pub mod token;

pub use dependency::{dependencies_of, DependencyGraph};
pub use engine::{evaluate, evaluate_formula, probe, validate};
pub use error::{EngineError, EngineResult};
pub use lexer::{tokenize, Lexer};
pub use postfix::{evaluate_postfix, to_postfix, ResolutionContext, VariableMap};
pub use token::{Token, TokenKind};
