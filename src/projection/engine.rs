//! Retirement planner orchestrating the preservation and depletion policies

use log::{info, warn};

use super::annuity::{accumulation_factor, discount_factor, pv_annuity_factor};
use super::cashflows::{PlanOutcome, PreservationPlan, ProjectionResult};
use super::depletion::DepletionSimulator;
use super::drawdown::{DrawdownContext, InitialWithdrawal};
use super::growth::{aggregate_provisions, ProvisionAggregate};
use super::inputs::PlanningInputs;
use super::shortfall::monthly_savings_needed;
use crate::assumptions::Assumptions;
use crate::error::PlanningError;
use crate::provision::Provision;

/// Annual income needed at retirement
///
/// Inflation and the desired annual increase compound independently over
/// the same horizon and both apply.
pub fn future_annual_income_needed(inputs: &PlanningInputs) -> f64 {
    let years = inputs.years_to_retirement();
    inputs.desired_monthly_income_today
        * 12.0
        * accumulation_factor(inputs.inflation_rate, years)
        * accumulation_factor(inputs.income_annual_increase, years)
}

/// Capital estimates under the preservation policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalEstimate {
    /// Income funded indefinitely from returns
    pub perpetuity: f64,
    /// Escalated income funded over the post-preservation horizon, valued at retirement
    pub annuity: f64,
}

impl CapitalEstimate {
    pub fn required(&self) -> f64 {
        self.perpetuity.max(self.annuity)
    }
}

/// Main planning engine
#[derive(Debug, Clone)]
pub struct RetirementPlanner {
    assumptions: Assumptions,
    depletion: DepletionSimulator,
}

impl RetirementPlanner {
    /// Create a planner with the given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        let depletion = DepletionSimulator::new(&assumptions);
        Self { assumptions, depletion }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run one planning scenario
    pub fn plan(&self, inputs: &PlanningInputs, provisions: &[Provision]) -> Result<ProjectionResult, PlanningError> {
        inputs.validate()?;
        for provision in provisions {
            provision.validate()?;
        }

        let years = inputs.years_to_retirement();
        let future_annual_income = future_annual_income_needed(inputs);
        let aggregate = aggregate_provisions(provisions, years);

        let outcome = if inputs.preserve_capital {
            let plan = self.plan_preservation(inputs, &aggregate, future_annual_income)?;
            info!(
                "preserve capital: provisions {:.2}, capital required {:.2}, shortfall {:.2}",
                aggregate.total_future_value, plan.capital_required, plan.shortfall_or_surplus
            );
            PlanOutcome::PreserveCapital(plan)
        } else {
            let projection = self.depletion.simulate(
                aggregate.total_future_value,
                future_annual_income,
                inputs.inflation_rate,
                years,
                inputs.assumed_return_post_retirement,
            )?;
            info!(
                "allow depletion: provisions {:.2} last {} years",
                aggregate.total_future_value, projection.years_until_depletion
            );
            PlanOutcome::AllowDepletion(projection)
        };

        Ok(ProjectionResult {
            current_age: inputs.current_age,
            retirement_age: inputs.retirement_age,
            years_to_retirement: years,
            desired_monthly_income_today: inputs.desired_monthly_income_today,
            preservation_years: if inputs.preserve_capital { inputs.preservation_years } else { 0 },
            future_annual_income_needed: future_annual_income,
            future_monthly_income_needed: future_annual_income / 12.0,
            provisions: aggregate.projections,
            total_provision_future_value: aggregate.total_future_value,
            average_provision_return: aggregate.average_return,
            outcome,
        })
    }

    /// Capital needed at retirement to sustain `future_annual_income`
    pub fn capital_estimate(
        &self,
        inputs: &PlanningInputs,
        future_annual_income: f64,
    ) -> Result<CapitalEstimate, PlanningError> {
        let r = inputs.assumed_return_post_retirement;
        let preservation_years = inputs.preservation_years;

        let annuity_factor = pv_annuity_factor(r, self.assumptions.post_preservation_years)
            .ok_or(PlanningError::UndefinedPerpetuity)?;

        let income_after_preservation = future_annual_income
            * accumulation_factor(inputs.inflation_rate, preservation_years)
            * accumulation_factor(inputs.income_annual_increase, preservation_years);

        Ok(CapitalEstimate {
            perpetuity: future_annual_income / r,
            annuity: income_after_preservation * annuity_factor * discount_factor(r, preservation_years),
        })
    }

    fn plan_preservation(
        &self,
        inputs: &PlanningInputs,
        aggregate: &ProvisionAggregate,
        future_annual_income: f64,
    ) -> Result<PreservationPlan, PlanningError> {
        let years = inputs.years_to_retirement();
        let estimate = self.capital_estimate(inputs, future_annual_income)?;
        let capital_required = estimate.required();
        let shortfall_or_surplus = capital_required - aggregate.total_future_value;

        // A zero average return leaves capital sizing intact; only the savings figure is undefined
        let additional_monthly_savings_needed =
            match monthly_savings_needed(shortfall_or_surplus, years, aggregate.average_return) {
                Ok(savings) => Some(savings),
                Err(PlanningError::UndefinedAnnuityFactor) => {
                    warn!(
                        "no savings recommendation for shortfall {:.2}: average provision return is zero",
                        shortfall_or_surplus
                    );
                    None
                }
                Err(e) => return Err(e),
            };

        let initial_withdrawal = InitialWithdrawal::from_context(&DrawdownContext {
            provision_value: aggregate.total_future_value,
            capital_required,
            desired_monthly_income_today: inputs.desired_monthly_income_today,
            inflation_factor: accumulation_factor(inputs.inflation_rate, years),
            assumed_return: inputs.assumed_return_post_retirement,
            limits: self.assumptions.drawdown,
        });

        Ok(PreservationPlan {
            capital_required,
            perpetuity_capital: estimate.perpetuity,
            annuity_capital: estimate.annuity,
            shortfall_or_surplus,
            additional_monthly_savings_needed,
            initial_withdrawal,
        })
    }
}

impl Default for RetirementPlanner {
    fn default() -> Self {
        Self::new(Assumptions::default_regulatory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::annuity::fv_annuity_factor;
    use crate::projection::drawdown::DrawdownRule;
    use approx::assert_relative_eq;

    fn inputs(preserve_capital: bool, preservation_years: u32) -> PlanningInputs {
        PlanningInputs {
            current_age: 40,
            retirement_age: 65,
            desired_monthly_income_today: 20_000.0,
            inflation_rate: 0.06,
            income_annual_increase: 0.03,
            assumed_return_post_retirement: 0.07,
            preserve_capital,
            preservation_years,
        }
    }

    fn provisions() -> Vec<Provision> {
        vec![
            Provision::new(850_000.0, 0.09, 6_000.0, 0.05),
            Provision::new(250_000.0, 0.08, 2_500.0, 0.06),
        ]
    }

    #[test]
    fn test_income_double_compounds() {
        let fai = future_annual_income_needed(&inputs(true, 10));
        assert_relative_eq!(fai, 2_156_693.805582737, max_relative = 1e-9);
        assert_relative_eq!(fai, 240_000.0 * 1.06_f64.powi(25) * 1.03_f64.powi(25), max_relative = 1e-12);
    }

    #[test]
    fn test_perpetuity_binds_for_short_preservation() {
        let planner = RetirementPlanner::default();
        let i = inputs(true, 10);
        let estimate = planner.capital_estimate(&i, future_annual_income_needed(&i)).unwrap();
        assert_relative_eq!(estimate.perpetuity, 30_809_911.508324813, max_relative = 1e-9);
        assert_relative_eq!(estimate.annuity, 27_953_884.49854253, max_relative = 1e-9);
        assert_eq!(estimate.required(), estimate.perpetuity);
    }

    #[test]
    fn test_annuity_binds_for_long_preservation() {
        let planner = RetirementPlanner::default();
        let i = inputs(true, 25);
        let estimate = planner.capital_estimate(&i, future_annual_income_needed(&i)).unwrap();
        assert_relative_eq!(estimate.required(), 37_829_608.83773207, max_relative = 1e-9);
        assert_eq!(estimate.required(), estimate.annuity);
    }

    #[test]
    fn test_preservation_shortfall_and_savings() {
        let result = RetirementPlanner::default().plan(&inputs(true, 10), &provisions()).unwrap();
        let plan = result.preservation().expect("preservation outcome");

        assert_relative_eq!(plan.capital_required, 30_809_911.508324813, max_relative = 1e-9);
        assert_relative_eq!(
            plan.shortfall_or_surplus,
            plan.capital_required - result.total_provision_future_value,
            max_relative = 1e-12
        );
        assert!(plan.has_shortfall());
        assert_eq!(plan.capital_excess(), 0.0);

        // Savings compound back to the shortfall at the weighted return
        let rebuilt = plan.additional_monthly_savings_needed.unwrap()
            * 12.0
            * fv_annuity_factor(result.average_provision_return, 25).unwrap();
        assert_relative_eq!(rebuilt, plan.shortfall_or_surplus, max_relative = 1e-9);

        assert!(result.years_until_depletion().is_none());
        assert!(result.trajectory().is_empty());
    }

    #[test]
    fn test_preservation_surplus() {
        let rich = vec![Provision::lump_sum(5_000_000.0, 0.12)];
        let result = RetirementPlanner::default().plan(&inputs(true, 10), &rich).unwrap();
        let plan = result.preservation().unwrap();

        assert!(!plan.has_shortfall());
        assert_eq!(plan.additional_monthly_savings_needed, Some(0.0));
        assert_relative_eq!(
            plan.capital_excess(),
            result.total_provision_future_value - plan.capital_required,
            max_relative = 1e-12
        );
        // 5M * 1.12^25 ~= 85M: minimum drawdown already beats the target
        assert_eq!(plan.initial_withdrawal.rule, DrawdownRule::LegislativeMinimum);
        assert!(plan.initial_withdrawal.income_position.capital_growth().is_some());
    }

    #[test]
    fn test_zero_return_preservation_is_undefined() {
        let mut i = inputs(true, 10);
        i.assumed_return_post_retirement = 0.0;
        assert_eq!(
            RetirementPlanner::default().plan(&i, &provisions()),
            Err(PlanningError::UndefinedPerpetuity)
        );
    }

    #[test]
    fn test_zero_average_return_leaves_savings_undefined() {
        let idle = vec![Provision::new(100_000.0, 0.0, 1_000.0, 0.0)];
        let result = RetirementPlanner::default().plan(&inputs(true, 10), &idle).unwrap();
        let plan = result.preservation().unwrap();

        assert_relative_eq!(plan.capital_required, 30_809_911.508324813, max_relative = 1e-9);
        assert!(plan.has_shortfall());
        assert_eq!(plan.additional_monthly_savings_needed, None);
        assert_eq!(result.summary().additional_monthly_savings_needed, None);
    }

    #[test]
    fn test_preservation_without_provisions_still_sizes_capital() {
        let result = RetirementPlanner::default().plan(&inputs(true, 10), &[]).unwrap();
        let plan = result.preservation().unwrap();

        assert_eq!(result.total_provision_future_value, 0.0);
        assert_relative_eq!(plan.capital_required, 30_809_911.508324813, max_relative = 1e-9);
        assert_eq!(plan.shortfall_or_surplus, plan.capital_required);
        assert_eq!(plan.additional_monthly_savings_needed, None);
        assert_eq!(plan.initial_withdrawal.rule, DrawdownRule::NoCapital);
    }

    #[test]
    fn test_depletion_starts_from_provisions() {
        let result = RetirementPlanner::default().plan(&inputs(false, 0), &provisions()).unwrap();
        let depletion = result.depletion().expect("depletion outcome");

        assert!(depletion.years_until_depletion > 0);
        let first = &depletion.trajectory[0];
        assert_eq!(first.capital_before_growth, result.total_provision_future_value);
        assert_eq!(
            first.withdrawal_amount,
            result.future_annual_income_needed.min(result.total_provision_future_value * 0.175)
        );
        assert_eq!(result.years_until_depletion(), Some(depletion.years_until_depletion));
        assert!(result.capital_required().is_none());
    }

    #[test]
    fn test_depletion_without_provisions() {
        let result = RetirementPlanner::default().plan(&inputs(false, 0), &[]).unwrap();
        assert_eq!(result.total_provision_future_value, 0.0);
        assert_eq!(result.years_until_depletion(), Some(0));
    }

    #[test]
    fn test_validation_precedes_computation() {
        let planner = RetirementPlanner::default();

        let mut i = inputs(true, 10);
        i.desired_monthly_income_today = -1.0;
        assert_eq!(planner.plan(&i, &provisions()), Err(PlanningError::NonPositiveIncome(-1.0)));

        let late = inputs(false, 0).retiring_at(40);
        assert!(matches!(
            planner.plan(&late, &provisions()),
            Err(PlanningError::RetirementNotAfterCurrentAge { .. })
        ));

        let bad = vec![Provision::new(-10.0, 0.07, 0.0, 0.0)];
        assert!(matches!(
            planner.plan(&inputs(false, 0), &bad),
            Err(PlanningError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let planner = RetirementPlanner::default();
        let a = planner.plan(&inputs(false, 0), &provisions()).unwrap();
        let b = planner.plan(&inputs(false, 0), &provisions()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_fields_follow_policy() {
        let planner = RetirementPlanner::default();

        let preserved = planner.plan(&inputs(true, 10), &provisions()).unwrap().summary();
        assert!(preserved.preserve_capital);
        assert!(preserved.capital_required.is_some());
        assert!(preserved.years_until_depletion.is_none());
        assert!(preserved.income_shortfall.is_some() != preserved.capital_growth_rate.is_some());
        assert_eq!(preserved.preservation_years, Some(10));
        assert_eq!(preserved.desired_monthly_income_today, 20_000.0);
        assert_eq!(preserved.client_name, None);
        let w = planner.plan(&inputs(true, 10), &provisions()).unwrap();
        let w = &w.preservation().unwrap().initial_withdrawal;
        assert_eq!(preserved.initial_monthly_withdrawal, Some(w.monthly_future_value));
        assert_eq!(preserved.initial_monthly_withdrawal_today, Some(w.monthly_todays_terms));

        let depleted = planner.plan(&inputs(false, 0), &provisions()).unwrap().summary();
        assert!(!depleted.preserve_capital);
        assert!(depleted.capital_required.is_none());
        assert!(depleted.years_until_depletion.is_some());
        assert!(depleted.initial_annual_withdrawal.is_some());
        assert_eq!(depleted.preservation_years, None);
        assert_eq!(
            depleted.initial_monthly_withdrawal,
            depleted.initial_annual_withdrawal.map(|a| a / 12.0)
        );
        assert!(depleted.initial_monthly_withdrawal_today.unwrap() < depleted.initial_monthly_withdrawal.unwrap());

        let named = depleted.with_client_name("Family");
        assert_eq!(named.client_name.as_deref(), Some("Family"));
    }
}
