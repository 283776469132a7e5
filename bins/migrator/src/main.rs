//! Database migration runner for Centime.
//!
//! Usage:
//!   migrator up      - Create and seed the currencies table
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use centime_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // run_cli reads DATABASE_URL and sets up its own tracing
    cli::run_cli(Migrator).await;
}
