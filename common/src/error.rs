//! Error types for currency value construction.

use thiserror::Error;

/// Errors raised while building currency values from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Code was empty after trimming.
    #[error("Currency code cannot be empty")]
    EmptyCode,

    /// Code contained something other than ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    MalformedCode(String),
}
