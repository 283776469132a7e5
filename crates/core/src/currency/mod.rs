//! Currency precision metadata and amount conversion.
//!
//! The metadata store answers "how many decimal places does this currency
//! use?" and the amount engine builds every minor/major unit operation on top
//! of that answer. The store never calls back into the engine.

pub mod engine;
pub mod error;
pub mod fallback;
pub mod format;
pub mod metadata;
pub mod store;
pub mod units;

#[cfg(test)]
mod props;

pub use engine::AmountEngine;
pub use error::{AmountError, FormatError, SourceError};
pub use fallback::{DEFAULT_DECIMALS, static_decimals};
pub use format::{ConventionFormatter, LocaleFormatter, plain_format};
pub use metadata::{
    CachedPrecisionMap, CurrencyMetadataSource, MAX_DECIMALS, MapOrigin, PrecisionMap,
    PrecisionTier, Resolution,
};
pub use store::{CurrencyMetadataStore, StoreSettings};
pub use units::AmountInput;
