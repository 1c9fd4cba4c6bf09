//! Infix to postfix conversion and postfix evaluation
//!
//! The converter is a standard shunting-yard pass with one twist taken from
//! the product's contract: identifier tokens are resolved to numbers *during
//! conversion*, not left for the evaluator. Resolution checks caller-supplied
//! variable overrides first, then recursively evaluates catalog entries
//! against the same context. Recursion alone does not detect cycles, so the
//! depth of nested resolution is capped at catalog size + 1 — any acyclic
//! chain visits each entry at most once, so a deeper chain proves a cycle.
//! Callers wanting a structural answer instead of a depth fault should run
//! [`crate::engine::validate`] first.

use crate::error::{EngineError, EngineResult};
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};
use ahash::AHashMap;
use formulify_core::Catalog;

/// Caller-supplied variable overrides, name to value.
pub type VariableMap = AHashMap<String, f64>;

/// Read-only name resolution context for one evaluation call.
///
/// `variables` short-circuits `catalog`: an identifier present in both
/// resolves to the override, never the stored formula.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    variables: &'a VariableMap,
    catalog: &'a Catalog,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(variables: &'a VariableMap, catalog: &'a Catalog) -> Self {
        Self { variables, catalog }
    }

    pub(crate) fn depth_limit(&self) -> usize {
        self.catalog.len() + 1
    }

    fn resolve(&self, name: &str, depth: usize) -> EngineResult<f64> {
        if let Some(value) = self.variables.get(name) {
            return Ok(*value);
        }
        if let Some(expr) = self.catalog.get(name) {
            tracing::trace!(name, depth, "resolving identifier through catalog");
            return evaluate_with_depth(expr.formula(), self, depth + 1);
        }
        Err(EngineError::UnknownName(name.to_string()))
    }
}

/// Convert an infix token sequence to postfix (Reverse Polish) order,
/// resolving identifiers against `context`.
///
/// End-of-input and parenthesis tokens never appear in the output.
pub fn to_postfix(tokens: &[Token], context: &ResolutionContext<'_>) -> EngineResult<Vec<Token>> {
    convert(tokens, context, 0)
}

pub(crate) fn convert(
    tokens: &[Token],
    context: &ResolutionContext<'_>,
    depth: usize,
) -> EngineResult<Vec<Token>> {
    if tokens.is_empty() {
        return Err(EngineError::Syntax("Empty expression".into()));
    }

    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<&Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number => output.push(token.clone()),

            TokenKind::Ident => {
                let value = context.resolve(&token.text, depth)?;
                output.push(Token::number(value));
            }

            TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk => {
                // Left-associative: emit stacked operators of >= precedence
                while let Some(top) = operators.last() {
                    match (top.kind.precedence(), token.kind.precedence()) {
                        (Some(stacked), Some(incoming)) if stacked >= incoming => {
                            output.push((*top).clone());
                            operators.pop();
                        }
                        _ => break,
                    }
                }
                operators.push(token);
            }

            TokenKind::LParen => operators.push(token),

            TokenKind::RParen => loop {
                let Some(top) = operators.pop() else {
                    return Err(EngineError::Syntax("Unmatched ')'".into()));
                };
                if top.kind == TokenKind::LParen {
                    break;
                }
                output.push(top.clone());
            },

            TokenKind::Eof => {
                return Err(EngineError::Syntax(
                    "End-of-input token inside token stream".into(),
                ));
            }
        }
    }

    while let Some(op) = operators.pop() {
        if op.kind == TokenKind::LParen {
            return Err(EngineError::Syntax("Unmatched '('".into()));
        }
        output.push(op.clone());
    }

    Ok(output)
}

/// Reduce a postfix token sequence to a single number.
pub fn evaluate_postfix(postfix: &[Token]) -> EngineResult<f64> {
    let mut stack: Vec<f64> = Vec::new();

    for token in postfix {
        match token.kind {
            TokenKind::Number => {
                let value: f64 = token
                    .text
                    .parse()
                    .map_err(|_| EngineError::Syntax(format!("Malformed number \"{}\"", token.text)))?;
                stack.push(value);
            }

            TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk => {
                // b was pushed last; operand order matters for subtraction
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Err(EngineError::InsufficientOperands(token.text.clone()));
                };
                let value = match token.kind {
                    TokenKind::Plus => a + b,
                    TokenKind::Minus => a - b,
                    _ => a * b,
                };
                stack.push(value);
            }

            _ => {
                return Err(EngineError::Syntax(format!(
                    "Unexpected token \"{token}\" in postfix stream"
                )));
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        leftover => Err(EngineError::MalformedExpression(leftover.len())),
    }
}

/// Evaluate formula text against a resolution context, tracking recursion
/// depth across nested identifier resolutions.
pub(crate) fn evaluate_with_depth(
    formula: &str,
    context: &ResolutionContext<'_>,
    depth: usize,
) -> EngineResult<f64> {
    if depth > context.depth_limit() {
        return Err(EngineError::RecursionLimit(context.depth_limit()));
    }
    let tokens = tokenize(formula)?;
    let postfix = convert(&tokens, context, depth)?;
    evaluate_postfix(&postfix)
}
