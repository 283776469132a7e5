//! Shared types, errors, and configuration for Centime.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and minor-unit money values
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CurrencyConfig, DatabaseConfig};
pub use error::{AppError, AppResult};
pub use types::{CurrencyCode, Money};
