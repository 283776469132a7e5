//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod currency;

pub use currency::{CurrencyError, CurrencyRepository, MAX_STORED_DECIMAL_PLACES};
