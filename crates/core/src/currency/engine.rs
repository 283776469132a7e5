//! Currency-aware amount conversion.
//!
//! Every operation resolves the currency's precision through the
//! [`CurrencyMetadataStore`] and then applies the pure functions in
//! [`units`](super::units). Amounts are stored as `i64` minor units; major
//! units (`Decimal`) only exist for display and input.

use std::sync::Arc;

use centime_shared::{CurrencyCode, Money};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::AmountError;
use super::format::{LocaleFormatter, plain_format};
use super::store::CurrencyMetadataStore;
use super::units::{self, AmountInput};

/// Amount conversion engine.
#[derive(Clone)]
pub struct AmountEngine {
    store: Arc<CurrencyMetadataStore>,
    formatter: Option<Arc<dyn LocaleFormatter>>,
}

impl AmountEngine {
    /// Creates an engine without a locale formatter; `format` then always
    /// produces the plain `"<CODE> <amount>"` rendering.
    #[must_use]
    pub fn new(store: Arc<CurrencyMetadataStore>) -> Self {
        Self {
            store,
            formatter: None,
        }
    }

    /// Attaches a locale-aware formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn LocaleFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// The underlying metadata store.
    #[must_use]
    pub const fn store(&self) -> &Arc<CurrencyMetadataStore> {
        &self.store
    }

    /// Precision of a currency. Never fails.
    pub async fn get_decimals(&self, currency: &str) -> u32 {
        self.store.get_decimals(currency).await
    }

    /// Converts minor units to a major-unit display value.
    ///
    /// Zero-decimal currencies return the minor amount unchanged.
    pub async fn to_major_units(&self, minor: i64, currency: &str) -> Decimal {
        units::to_major(minor, self.get_decimals(currency).await)
    }

    /// Converts a major-unit value to minor units, rounding half away from zero.
    pub async fn to_minor_units(&self, major: Decimal, currency: &str) -> Result<i64, AmountError> {
        units::to_minor(major, self.get_decimals(currency).await)
    }

    /// Renders an amount for display. Never fails.
    ///
    /// Uses the locale formatter when one is attached and it succeeds;
    /// otherwise falls back to `"<CODE> <amount>"` with exactly the
    /// currency's number of decimal places (`"USD 12.34"`).
    pub async fn format(&self, minor: i64, currency: &str, locale: &str) -> String {
        let code = CurrencyCode::new(currency);
        let decimals = self.get_decimals(code.as_str()).await;
        let major = units::to_major(minor, decimals);

        if let Some(formatter) = &self.formatter {
            match formatter.format_currency(major, &code, decimals, locale) {
                Ok(text) => return text,
                Err(e) => debug!(
                    error = %e,
                    currency = %code,
                    locale,
                    "Locale formatting failed, using plain format"
                ),
            }
        }

        plain_format(major, &code, decimals)
    }

    /// Renders a [`Money`] value for display.
    pub async fn format_money(&self, money: &Money, locale: &str) -> String {
        self.format(money.minor, money.currency.as_str(), locale)
            .await
    }

    /// Parses a numeric value or a display string into minor units.
    ///
    /// Strings are stripped of everything but digits, `.` and `-` first, so
    /// `"$12.34"` and `"1,234.56"` both parse. See [`units::parse_major`] for
    /// how malformed leftovers are read.
    pub async fn parse_to_minor_units(
        &self,
        input: impl Into<AmountInput>,
        currency: &str,
    ) -> Result<i64, AmountError> {
        let major = match input.into() {
            AmountInput::Number(value) => value,
            AmountInput::Text(text) => units::parse_major(&text)?,
        };
        self.to_minor_units(major, currency).await
    }

    /// True iff the amount is numeric, non-negative, and has no fractional
    /// part when the currency has no minor unit.
    ///
    /// Strings must be plain decimals; no symbol stripping happens here.
    pub async fn is_valid_amount(&self, input: impl Into<AmountInput>, currency: &str) -> bool {
        let Some(amount) = units::numeric_value(&input.into()) else {
            return false;
        };
        units::is_valid(amount, self.get_decimals(currency).await)
    }

    /// Returns `10^precision` for the currency.
    pub async fn get_multiplier(&self, currency: &str) -> i64 {
        units::multiplier(self.get_decimals(currency).await)
    }

    /// Three-way comparison of two minor-unit amounts: `-1`, `0` or `1`.
    ///
    /// Both operands are already minor units, so the currency does not take
    /// part in the comparison.
    #[must_use]
    pub fn compare(&self, a: i64, b: i64, _currency: &str) -> i8 {
        units::compare(a, b) as i8
    }
}
