//! Year-by-year decumulation under the legislative drawdown cap
//!
//! Each year the withdrawal is the target income capped at the maximum
//! drawdown rate; the remainder grows at the assumed return. Once capital is
//! at or below the full-commutation threshold the whole balance is paid out
//! and the simulation ends.

use log::{debug, warn};

use super::cashflows::{DepletionProjection, YearSnapshot};
use super::state::DepletionState;
use crate::assumptions::{Assumptions, DrawdownLimits};
use crate::error::{ensure_non_negative, PlanningError};

/// Decumulation simulator for the allow-depletion policy
#[derive(Debug, Clone)]
pub struct DepletionSimulator {
    drawdown: DrawdownLimits,
    full_commutation_threshold: f64,
    max_years: u32,
}

impl DepletionSimulator {
    pub fn new(assumptions: &Assumptions) -> Self {
        Self {
            drawdown: assumptions.drawdown,
            full_commutation_threshold: assumptions.full_commutation_threshold,
            max_years: assumptions.max_simulation_years,
        }
    }

    /// Simulate drawdown from `starting_capital` until it is exhausted
    ///
    /// Fails with `CapitalNeverDepletes` if capital remains after the
    /// configured maximum number of years.
    pub fn simulate(
        &self,
        starting_capital: f64,
        target_annual_income: f64,
        inflation_rate: f64,
        years_to_retirement: u32,
        assumed_return: f64,
    ) -> Result<DepletionProjection, PlanningError> {
        ensure_non_negative("starting capital", starting_capital)?;
        ensure_non_negative("target annual income", target_annual_income)?;
        ensure_non_negative("inflation rate", inflation_rate)?;
        ensure_non_negative("post-retirement return", assumed_return)?;

        let mut projection = DepletionProjection::new();
        let mut state = DepletionState::at_retirement(starting_capital, years_to_retirement);

        while !state.is_exhausted() {
            if state.year >= self.max_years {
                warn!(
                    "capital {:.2} still remaining after {} simulated years",
                    state.capital, self.max_years
                );
                return Err(PlanningError::CapitalNeverDepletes {
                    horizon_years: self.max_years,
                    final_capital: state.capital,
                });
            }

            state.advance_year();
            let snapshot = self.simulate_year(&mut state, target_annual_income, inflation_rate, assumed_return);
            debug!(
                "year {}: capital {:.2} withdraw {:.2} -> {:.2}{}",
                snapshot.year,
                snapshot.capital_before_growth,
                snapshot.withdrawal_amount,
                snapshot.capital_after,
                if snapshot.full_commutation { " (commuted)" } else { "" }
            );
            projection.add_year(snapshot);
        }

        Ok(projection)
    }

    /// Apply one year's withdrawal and growth to the state
    fn simulate_year(
        &self,
        state: &mut DepletionState,
        target_annual_income: f64,
        inflation_rate: f64,
        assumed_return: f64,
    ) -> YearSnapshot {
        let capital = state.capital;
        let full_commutation = capital <= self.full_commutation_threshold;

        let (withdrawal, capital_after) = if full_commutation {
            (capital, 0.0)
        } else {
            let withdrawal = target_annual_income.min(self.drawdown.max_withdrawal(capital));
            (withdrawal, (capital - withdrawal) * (1.0 + assumed_return))
        };

        state.capital = capital_after;

        let monthly_income = withdrawal / 12.0;
        YearSnapshot {
            year: state.year,
            capital_before_growth: capital,
            withdrawal_amount: withdrawal,
            capital_after,
            monthly_income_future_value: monthly_income,
            monthly_income_in_todays_terms: monthly_income * state.inflation_deflator(inflation_rate),
            full_commutation,
        }
    }
}
