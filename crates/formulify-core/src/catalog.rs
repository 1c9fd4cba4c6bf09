//! Expression catalog
//!
//! A [`Catalog`] holds every named expression known to one evaluation or
//! validation call, keyed by name. It is a plain snapshot: build it, hand it
//! to the engine, discard it. The engine never mutates it.

use crate::expression::NamedExpression;
use ahash::AHashMap;

/// A collection of named expressions, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: AHashMap<String, NamedExpression>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an expression, replacing any previous entry with the same name.
    ///
    /// Returns the replaced expression, if any.
    pub fn insert(&mut self, expr: NamedExpression) -> Option<NamedExpression> {
        self.entries.insert(expr.name().to_string(), expr)
    }

    /// Look up an expression by name
    pub fn get(&self, name: &str) -> Option<&NamedExpression> {
        self.entries.get(name)
    }

    /// Whether the catalog holds an expression with this name
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of expressions in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the expressions, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &NamedExpression> {
        self.entries.values()
    }

    /// Iterate over the expression names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<NamedExpression> for Catalog {
    fn from_iter<I: IntoIterator<Item = NamedExpression>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for expr in iter {
            catalog.insert(expr);
        }
        catalog
    }
}
