//! Currency repository for currency metadata.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use centime_shared::{AppError, CurrencyCode};

use crate::entities::currencies;

/// Largest precision the `currencies` table accepts.
pub const MAX_STORED_DECIMAL_PLACES: i16 = 4;

/// Error types for currency operations.
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    /// Decimal places outside what the table accepts.
    #[error("Decimal places must be between 0 and {MAX_STORED_DECIMAL_PLACES}, got {0}")]
    InvalidDecimalPlaces(i64),

    /// Currency not found.
    #[error("Currency '{0}' not found")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::InvalidDecimalPlaces(_) => Self::Validation(err.to_string()),
            CurrencyError::NotFound(code) => Self::NotFound(format!("currency {code}")),
            CurrencyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Currency repository for reading and maintaining currency metadata.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    db: DatabaseConnection,
}

impl CurrencyRepository {
    /// Creates a new currency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active currencies ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<currencies::Model>, CurrencyError> {
        let rows = currencies::Entity::find()
            .filter(currencies::Column::IsActive.eq(true))
            .order_by_asc(currencies::Column::Code)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Finds a currency by code, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<currencies::Model>, CurrencyError> {
        let code = CurrencyCode::new(code);
        let row = currencies::Entity::find_by_id(code.as_str())
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Returns `code -> decimal_places` for every active currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn precision_rows(&self) -> Result<HashMap<String, i64>, CurrencyError> {
        let rows = self.list_active().await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.code.trim().to_string(), i64::from(row.decimal_places)))
            .collect())
    }

    /// Updates the precision of an existing currency.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `places` is outside `0..=4`
    /// - The currency does not exist
    /// - The database update fails
    pub async fn set_decimal_places(
        &self,
        code: &str,
        places: i64,
    ) -> Result<currencies::Model, CurrencyError> {
        let stored = i16::try_from(places)
            .ok()
            .filter(|p| (0..=MAX_STORED_DECIMAL_PLACES).contains(p))
            .ok_or(CurrencyError::InvalidDecimalPlaces(places))?;

        let existing = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| CurrencyError::NotFound(CurrencyCode::new(code).to_string()))?;

        let mut active = existing.into_active_model();
        active.decimal_places = Set(stored);
        let updated = active.update(&self.db).await?;

        info!(
            currency = %updated.code,
            decimal_places = updated.decimal_places,
            "Currency precision updated"
        );
        Ok(updated)
    }
}
