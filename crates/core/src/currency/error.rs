//! Currency error types.

use std::time::Duration;

use centime_shared::AppError;
use thiserror::Error;

/// Failure to obtain a precision map from the metadata source.
///
/// Never surfaces past the metadata store: every variant degrades to the
/// static precision table.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or the query failed.
    #[error("currency metadata source unavailable: {0}")]
    Unavailable(String),

    /// The fetch did not complete in time.
    #[error("currency metadata fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The source answered with data that is not a usable precision map.
    #[error("malformed currency metadata: {0}")]
    Malformed(String),
}

/// Amount conversion errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The input holds no digits to interpret as an amount.
    #[error("cannot interpret '{0}' as an amount")]
    Unparseable(String),

    /// The amount does not fit a 64-bit minor-unit value.
    #[error("amount '{0}' is out of range for minor units")]
    OutOfRange(String),
}

/// Locale-aware formatting failures.
///
/// Always recovered by the plain `"<CODE> <amount>"` fallback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The locale tag could not be parsed.
    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),

    /// No number convention is known for the locale.
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}
