//! FX engine error types.

use ratepath_common::{Currency, CurrencyError, ExchangeEdge};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the FX engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FxError {
    /// Amount to convert was zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Currency code was empty or malformed.
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(#[from] CurrencyError),

    /// Retrieval succeeded but yielded no edges at all.
    #[error("No exchange data available")]
    NoExchangeDataAvailable,

    /// Exchange data exists but does not connect the two currencies.
    #[error("No conversion path from {from} to {to}")]
    NoPathFound { from: Currency, to: Currency },

    /// The rate source failed.
    #[error("Rate source {source_name} unavailable: {reason}")]
    RateSourceUnavailable { source_name: String, reason: String },

    /// Edge with a non-positive rate.
    #[error("Invalid edge data: {0}")]
    InvalidEdgeData(ExchangeEdge),

    /// Running amount left the representable decimal range.
    #[error("Amount overflowed converting {from} to {to}")]
    AmountOverflow { from: Currency, to: Currency },

    /// A hop of a found path has no backing edge.
    #[error("Path hop {from} -> {to} has no matching edge")]
    PathEdgeMissing { from: Currency, to: Currency },
}

impl FxError {
    /// Build a rate source failure.
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        FxError::RateSourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the caller can fix this by changing the request.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            FxError::InvalidAmount(_) | FxError::InvalidCurrencyCode(_)
        )
    }

    /// Stable error identifier for presentation layers.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::InvalidAmount(_) => "INVALID_AMOUNT",
            FxError::InvalidCurrencyCode(_) => "INVALID_CURRENCY_CODE",
            FxError::NoExchangeDataAvailable => "NO_EXCHANGE_DATA_AVAILABLE",
            FxError::NoPathFound { .. } => "NO_PATH_FOUND",
            FxError::RateSourceUnavailable { .. } => "RATE_SOURCE_UNAVAILABLE",
            FxError::InvalidEdgeData(_) => "INVALID_EDGE_DATA",
            FxError::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            FxError::PathEdgeMissing { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
