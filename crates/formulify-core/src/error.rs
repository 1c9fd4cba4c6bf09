//! Error types for formulify-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in formulify-core
#[derive(Debug, Error)]
pub enum Error {
    /// Name does not match identifier syntax
    #[error("Invalid expression name: {0}")]
    InvalidName(String),
}
