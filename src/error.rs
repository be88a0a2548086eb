//! Error types for retirement planning runs

use thiserror::Error;

/// Errors raised by a single planning call
///
/// Validation variants are caller-correctable and raised before any
/// computation. The remaining variants mark inputs at which the projection
/// is mathematically undefined or does not terminate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    #[error("desired monthly income must be positive, got {0}")]
    NonPositiveIncome(f64),

    #[error("current age {current_age} must be below retirement age {retirement_age}")]
    RetirementNotAfterCurrentAge { current_age: u32, retirement_age: u32 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: u32, min: u32, max: u32 },

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("a positive shortfall cannot be closed over a zero-year horizon")]
    EmptySavingsHorizon,

    #[error("capital required is undefined at a zero post-retirement return")]
    UndefinedPerpetuity,

    #[error("annuity factor is undefined at a zero average return")]
    UndefinedAnnuityFactor,

    #[error("capital does not deplete within {horizon_years} years (remaining {final_capital:.2})")]
    CapitalNeverDepletes { horizon_years: u32, final_capital: f64 },
}

/// Reject negative, NaN and infinite money or rate inputs
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), PlanningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PlanningError::InvalidValue { field, value })
    }
}

/// Reject whole-year values outside `min..=max`
pub(crate) fn ensure_in_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), PlanningError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlanningError::OutOfRange { field, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_guard() {
        assert!(ensure_non_negative("rate", 0.0).is_ok());
        assert!(ensure_non_negative("rate", 0.07).is_ok());
        assert_eq!(
            ensure_non_negative("rate", -0.01),
            Err(PlanningError::InvalidValue { field: "rate", value: -0.01 })
        );
        assert!(ensure_non_negative("rate", f64::NAN).is_err());
        assert!(ensure_non_negative("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_messages_name_the_problem() {
        let err = PlanningError::RetirementNotAfterCurrentAge { current_age: 65, retirement_age: 60 };
        assert_eq!(err.to_string(), "current age 65 must be below retirement age 60");
    }

    #[test]
    fn test_range_guard_is_inclusive() {
        assert!(ensure_in_range("age", 18, 18, 120).is_ok());
        assert!(ensure_in_range("age", 120, 18, 120).is_ok());
        assert_eq!(
            ensure_in_range("age", 17, 18, 120),
            Err(PlanningError::OutOfRange { field: "age", value: 17, min: 18, max: 120 })
        );
    }
}
