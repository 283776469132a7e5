//! Database-backed currency metadata source.
//!
//! Reads `code -> decimal_places` from the `currencies` table and keeps the
//! rows in a short-lived moka cache of its own, so store invalidation can
//! reach all the way down to the query.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use centime_core::currency::{CurrencyMetadataSource, SourceError};
use centime_shared::CurrencyConfig;

use crate::repositories::CurrencyRepository;

/// [`CurrencyMetadataSource`] over the `currencies` table.
#[derive(Clone)]
pub struct DbCurrencySource {
    repo: CurrencyRepository,
    /// The whole map is one entry.
    rows: Cache<(), Arc<HashMap<String, i64>>>,
}

impl DbCurrencySource {
    /// Creates a source whose row cache lives for `ttl`.
    #[must_use]
    pub fn new(db: DatabaseConnection, ttl: Duration) -> Self {
        Self {
            repo: CurrencyRepository::new(db),
            rows: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Creates a source using `source_cache_ttl_secs` from configuration.
    #[must_use]
    pub fn from_config(db: DatabaseConnection, config: &CurrencyConfig) -> Self {
        Self::new(db, Duration::from_secs(config.source_cache_ttl_secs))
    }

    /// Returns the underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &CurrencyRepository {
        &self.repo
    }
}

#[async_trait]
impl CurrencyMetadataSource for DbCurrencySource {
    async fn fetch_precision_map(&self) -> Result<HashMap<String, i64>, SourceError> {
        let rows = self
            .rows
            .try_get_with((), async {
                let rows = self.repo.precision_rows().await?;
                debug!(currencies = rows.len(), "Fetched currency precision rows");
                Ok::<_, crate::CurrencyError>(Arc::new(rows))
            })
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        Ok(rows.as_ref().clone())
    }

    async fn invalidate(&self) {
        self.rows.invalidate_all();
        info!("Currency source row cache invalidated");
    }
}
