//! Scenario parameters for a single planning run

use serde::{Deserialize, Serialize};

use crate::error::{ensure_in_range, ensure_non_negative, PlanningError};

/// Youngest client the planner accepts
pub const MIN_CURRENT_AGE: u32 = 18;

/// Oldest age accepted for the client today or at retirement
pub const MAX_AGE: u32 = 120;

/// Longest preservation period before the funded horizon
pub const MAX_PRESERVATION_YEARS: u32 = 100;

/// Scenario parameters for one planning run
///
/// Rates are fractions (0.06 for 6%). Money is in a single unspecified currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningInputs {
    /// Client's age today
    pub current_age: u32,

    /// Age at which drawdown starts
    pub retirement_age: u32,

    /// Desired monthly income at retirement, in today's money
    pub desired_monthly_income_today: f64,

    /// Expected annual inflation
    pub inflation_rate: f64,

    /// Desired annual escalation of retirement income
    #[serde(default)]
    pub income_annual_increase: f64,

    /// Assumed annual return on capital after retirement
    pub assumed_return_post_retirement: f64,

    /// Size capital to preserve principal instead of simulating depletion
    #[serde(default)]
    pub preserve_capital: bool,

    /// Years of capital preservation before the funded horizon starts
    #[serde(default)]
    pub preservation_years: u32,
}

impl PlanningInputs {
    /// Whole years between today and retirement
    ///
    /// Saturates at zero; `validate` rejects that case.
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Validate the scenario before any computation
    pub fn validate(&self) -> Result<(), PlanningError> {
        let income = self.desired_monthly_income_today;
        if !income.is_finite() || income <= 0.0 {
            return Err(PlanningError::NonPositiveIncome(income));
        }
        ensure_in_range("current age", self.current_age, MIN_CURRENT_AGE, MAX_AGE)?;
        ensure_in_range("retirement age", self.retirement_age, MIN_CURRENT_AGE, MAX_AGE)?;
        ensure_in_range("preservation years", self.preservation_years, 0, MAX_PRESERVATION_YEARS)?;
        if self.current_age >= self.retirement_age {
            return Err(PlanningError::RetirementNotAfterCurrentAge {
                current_age: self.current_age,
                retirement_age: self.retirement_age,
            });
        }
        ensure_non_negative("inflation rate", self.inflation_rate)?;
        ensure_non_negative("income annual increase", self.income_annual_increase)?;
        ensure_non_negative("post-retirement return", self.assumed_return_post_retirement)?;
        Ok(())
    }

    /// Same scenario with a different retirement age
    pub fn retiring_at(&self, retirement_age: u32) -> Self {
        Self {
            retirement_age,
            ..self.clone()
        }
    }
}
