//! Named expressions
//!
//! A [`NamedExpression`] pairs a user-chosen name with the formula text that
//! defines it. The formula may reference other named expressions by
//! identifier; resolution is the engine's job, not this type's.

use crate::error::{Error, Result};
use lazy_regex::regex_is_match;

/// Check whether `name` is a valid expression identifier.
///
/// Identifiers start with a letter or underscore and continue with letters,
/// digits, or underscores.
pub fn is_valid_name(name: &str) -> bool {
    regex_is_match!(r"^[A-Za-z_][A-Za-z0-9_]*$", name)
}

/// A named, evaluable unit: a name and its textual definition.
///
/// An expression whose formula is exactly its own name is a *leaf*: a pure
/// variable with no sub-expression, expected to receive its value from the
/// caller at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedExpression {
    name: String,
    formula: String,
}

impl NamedExpression {
    /// Create a named expression, validating the name's identifier syntax.
    pub fn new<N: Into<String>, F: Into<String>>(name: N, formula: F) -> Result<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            formula: formula.into(),
        })
    }

    /// The expression's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expression's formula text
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Whether this expression is a leaf (its formula is its own name)
    pub fn is_leaf(&self) -> bool {
        self.name == self.formula
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name("tax_rate_2024"));
        assert!(is_valid_name("X9"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("9lives"));
        assert!(!is_valid_name("tax rate"));
        assert!(!is_valid_name("a+b"));
        assert!(!is_valid_name("café"));
    }

    #[test]
    fn test_new_rejects_bad_name() {
        let err = NamedExpression::new("1bad", "1 + 2").unwrap_err();
        assert!(matches!(err, Error::InvalidName(name) if name == "1bad"));
    }

    #[test]
    fn test_leaf_detection() {
        let leaf = NamedExpression::new("a", "a").unwrap();
        assert!(leaf.is_leaf());

        let formula = NamedExpression::new("a", "b + 1").unwrap();
        assert!(!formula.is_leaf());
    }
}
