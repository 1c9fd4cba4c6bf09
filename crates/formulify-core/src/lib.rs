//! # formulify-core
//!
//! Core data structures for the formulify expression engine.
//!
//! This crate provides the fundamental types used throughout formulify:
//! - [`NamedExpression`] - A user-defined name paired with its formula text
//! - [`Catalog`] - A collection of named expressions, keyed by name
//!
//! ## Example
//!
//! ```rust
//! use formulify_core::{Catalog, NamedExpression};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(NamedExpression::new("price", "price").unwrap());
//! catalog.insert(NamedExpression::new("total", "price * 3").unwrap());
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.get("total").is_some());
//! ```

pub mod catalog;
pub mod error;
pub mod expression;

// Re-exports for convenience
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use expression::{is_valid_name, NamedExpression};
