//! Core amount logic for Centime.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `currency` - Currency precision metadata and minor/major unit conversion

pub mod currency;
