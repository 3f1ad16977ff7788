//! Monetary computation for movements. Arithmetic runs on `Decimal` and the
//! result is rounded half-up to 2 places exactly once, at computation time.
//! Rollups sum the already-rounded values and never re-round.

use rust_decimal::prelude::*;

use crate::error::AppError;

const DECIMAL_PLACES: u32 = 2;

fn to_decimal(value: f64, field: &str) -> Result<Decimal, AppError> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| AppError::Validation(format!("{} is out of range: {}", field, value)))
}

/// `quantity × rate`, rounded to 2 decimal places half-up.
pub fn quantity_times_rate(quantity: f64, rate: f64) -> Result<f64, AppError> {
    let q = to_decimal(quantity, "quantity")?;
    let r = to_decimal(rate, "rate")?;
    let total = (q * r).round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    total
        .to_f64()
        .ok_or_else(|| AppError::Validation("total_value is out of range".to_string()))
}

/// Round a manually supplied value to the storage precision.
pub fn round_money(value: f64) -> Result<f64, AppError> {
    let d = to_decimal(value, "total_value")?;
    d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .ok_or_else(|| AppError::Validation("total_value is out of range".to_string()))
}
