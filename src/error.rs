// src/error.rs

//! Error types for the simulator.
//!
//! The weekly protocol itself cannot fail: quantities are unsigned and the
//! fill step never drives inventory or backlog below zero. Errors only come
//! from the boundaries: signed caller input, demand generation and CSV export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeerGameError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeQuantity { field: &'static str, value: i64 },

    #[error("{field} is too large: {value}")]
    QuantityOverflow { field: &'static str, value: i64 },

    #[error("invalid demand distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BeerGameError>;

/// Converts a signed caller-supplied quantity into a case count.
pub fn checked_quantity(field: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(BeerGameError::NegativeQuantity { field, value });
    }
    u32::try_from(value).map_err(|_| BeerGameError::QuantityOverflow { field, value })
}
