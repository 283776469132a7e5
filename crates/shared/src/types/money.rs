//! Money value in minor units.
//!
//! CRITICAL: the canonical representation of any amount is an integer count of
//! the currency's smallest unit. Major-unit decimals exist only for display
//! and input parsing.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// Represents a monetary amount in minor units (e.g., cents for USD, yen for JPY).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit.
    pub minor: i64,
    /// Currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub fn new(minor: i64, currency: impl Into<CurrencyCode>) -> Self {
        Self {
            minor,
            currency: currency.into(),
        }
    }
}
