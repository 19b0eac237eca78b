// ==============================================================================
// error.rs - Risk Engine Error Types
// ==============================================================================
// Description: Error taxonomy for categorical lookups and probability checks
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use thiserror::Error;

/// Errors that can occur while computing a risk estimate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Unrecognized {field}: '{value}'")]
    UnrecognizedCategory { field: &'static str, value: String },

    #[error("{quantity} out of range: {value} (expected a finite value in [0, 1])")]
    OutOfRange { quantity: &'static str, value: f64 },

    #[error("Invalid {quantity}: {value} (expected a probability in [0, 1])")]
    InvalidProbability { quantity: &'static str, value: f64 },

    #[error("Invalid incidence: 1 in {0} (expected a finite value greater than 1)")]
    InvalidIncidence(f64),

    #[error("Monte Carlo simulation requires at least one trial")]
    InvalidTrialCount,
}

impl RiskError {
    pub fn unrecognized(field: &'static str, value: impl Into<String>) -> Self {
        RiskError::UnrecognizedCategory {
            field,
            value: value.into(),
        }
    }
}

/// Surface a computed probability, rejecting anything outside [0, 1]
pub fn ensure_probability(quantity: &'static str, value: f64) -> Result<f64, RiskError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RiskError::OutOfRange { quantity, value })
    }
}

/// Validate a caller-supplied probability
pub fn check_input_probability(quantity: &'static str, value: f64) -> Result<f64, RiskError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RiskError::InvalidProbability { quantity, value })
    }
}
