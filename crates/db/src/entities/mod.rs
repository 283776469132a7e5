//! `SeaORM` entity definitions.

pub mod currencies;
