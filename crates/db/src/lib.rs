//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - The `currencies` entity and its migration
//! - A repository for currency metadata
//! - [`DbCurrencySource`], the database-backed precision source

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod source;

pub use repositories::{CurrencyError, CurrencyRepository};
pub use source::DbCurrencySource;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use centime_shared::DatabaseConfig;

/// Opens a lazily connected pool.
///
/// No connection is made until the first query, so an unreachable database
/// surfaces as a query error bounded by `acquire_timeout_ms` instead of
/// failing here.
///
/// # Errors
///
/// Returns an error if the URL or pool options are invalid.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    Database::connect(connect_options(config)).await
}

fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let timeout = Duration::from_millis(config.acquire_timeout_ms);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .connect_lazy(true)
        .sqlx_logging(false);
    options
}
