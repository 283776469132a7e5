//! Currency metadata migration.
//!
//! Creates the `currencies` table and seeds it with common currencies,
//! including the zero- and three-decimal ones.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CURRENCIES_SQL).await?;
        db.execute_unprepared(SEED_CURRENCIES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS currencies;")
            .await?;
        Ok(())
    }
}

const CURRENCIES_SQL: &str = r"
CREATE TABLE currencies (
    code CHAR(3) PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    symbol VARCHAR(10) NOT NULL,
    decimal_places SMALLINT NOT NULL DEFAULT 2,
    is_active BOOLEAN NOT NULL DEFAULT true,
    CONSTRAINT chk_currency_code CHECK (code ~ '^[A-Z]{3}$'),
    CONSTRAINT chk_decimal_places CHECK (decimal_places BETWEEN 0 AND 4)
);
";

const SEED_CURRENCIES_SQL: &str = r"
-- ============================================================
-- SEED: Common currencies
-- ============================================================
INSERT INTO currencies (code, name, symbol, decimal_places) VALUES
('USD', 'US Dollar', '$', 2),
('EUR', 'Euro', '€', 2),
('GBP', 'British Pound', '£', 2),
('JPY', 'Japanese Yen', '¥', 0),
('KRW', 'South Korean Won', '₩', 0),
('VND', 'Vietnamese Dong', '₫', 0),
('UGX', 'Ugandan Shilling', 'USh', 0),
('RWF', 'Rwandan Franc', 'FRw', 0),
('CLP', 'Chilean Peso', 'CLP$', 0),
('BHD', 'Bahraini Dinar', 'BD', 3),
('JOD', 'Jordanian Dinar', 'JD', 3),
('KWD', 'Kuwaiti Dinar', 'KD', 3),
('OMR', 'Omani Rial', 'OMR', 3),
('TND', 'Tunisian Dinar', 'DT', 3),
('IDR', 'Indonesian Rupiah', 'Rp', 2),
('SGD', 'Singapore Dollar', 'S$', 2),
('AUD', 'Australian Dollar', 'A$', 2),
('CNY', 'Chinese Yuan', '¥', 2),
('INR', 'Indian Rupee', '₹', 2),
('HKD', 'Hong Kong Dollar', 'HK$', 2),
('CHF', 'Swiss Franc', 'CHF', 2),
('CAD', 'Canadian Dollar', 'C$', 2),
('BRL', 'Brazilian Real', 'R$', 2),
('MXN', 'Mexican Peso', 'MX$', 2),
('ZAR', 'South African Rand', 'R', 2);
";
