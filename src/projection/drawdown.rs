//! Initial drawdown selection under the capital preservation policy
//!
//! The sustainable initial drawdown is chosen by an ordered rule table,
//! evaluated top-down; the first rule whose condition holds sets the rate:
//!
//! | Rule               | Condition                                              | Rate           |
//! |--------------------|--------------------------------------------------------|----------------|
//! | LegislativeMinimum | provisions cover capital required and the minimum      | min rate       |
//! |                    | drawdown already meets desired income in today's money |                |
//! | NoCapital          | no provision value                                     | 0              |
//! | TargetIncome       | target rate <= assumed return and <= max rate          | target rate    |
//! | SustainableReturn  | assumed return <= max rate                             | assumed return |
//! | LegislativeMaximum | always                                                 | max rate       |
//!
//! The target rate delivers the desired income inflated to retirement,
//! without the desired annual increase.

use serde::{Deserialize, Serialize};

use crate::assumptions::{DrawdownBand, DrawdownLimits};

/// Rule that set the initial drawdown rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawdownRule {
    LegislativeMinimum,
    NoCapital,
    TargetIncome,
    SustainableReturn,
    LegislativeMaximum,
}

/// Everything the drawdown rules look at
#[derive(Debug, Clone, Copy)]
pub struct DrawdownContext {
    /// Total provision value at retirement
    pub provision_value: f64,

    /// Capital required to preserve income
    pub capital_required: f64,

    /// Desired monthly income in today's money
    pub desired_monthly_income_today: f64,

    /// (1 + inflation)^years_to_retirement
    pub inflation_factor: f64,

    /// Assumed post-retirement return
    pub assumed_return: f64,

    pub limits: DrawdownLimits,
}

impl DrawdownContext {
    /// Provisions meet or exceed the capital required
    pub fn is_sufficient(&self) -> bool {
        self.provision_value >= self.capital_required
    }

    /// Annual income at retirement matching the desired income in today's money
    pub fn target_annual_income(&self) -> f64 {
        self.desired_monthly_income_today * self.inflation_factor * 12.0
    }

    /// Drawdown rate delivering the target income, 0 without capital
    pub fn target_rate(&self) -> f64 {
        if self.provision_value > 0.0 {
            self.target_annual_income() / self.provision_value
        } else {
            0.0
        }
    }

    /// Monthly income in today's money at the legislative minimum drawdown
    pub fn minimum_income_today(&self) -> f64 {
        self.limits.min_withdrawal(self.provision_value) / 12.0 / self.inflation_factor
    }
}

type Condition = fn(&DrawdownContext) -> bool;
type Rate = fn(&DrawdownContext) -> f64;

fn minimum_covers_income(c: &DrawdownContext) -> bool {
    c.is_sufficient() && c.minimum_income_today() >= c.desired_monthly_income_today
}

fn no_capital(c: &DrawdownContext) -> bool {
    c.provision_value <= 0.0
}

fn target_is_lowest(c: &DrawdownContext) -> bool {
    let target = c.target_rate();
    target <= c.assumed_return && target <= c.limits.max_rate
}

fn return_within_maximum(c: &DrawdownContext) -> bool {
    c.assumed_return <= c.limits.max_rate
}

fn always(_: &DrawdownContext) -> bool {
    true
}

/// Ordered drawdown rules, first match wins
pub const DRAWDOWN_RULES: [(DrawdownRule, Condition, Rate); 5] = [
    (DrawdownRule::LegislativeMinimum, minimum_covers_income, |c| c.limits.min_rate),
    (DrawdownRule::NoCapital, no_capital, |_| 0.0),
    (DrawdownRule::TargetIncome, target_is_lowest, |c| c.target_rate()),
    (DrawdownRule::SustainableReturn, return_within_maximum, |c| c.assumed_return),
    (DrawdownRule::LegislativeMaximum, always, |c| c.limits.max_rate),
];

/// Evaluate the rule table
pub fn select_drawdown(ctx: &DrawdownContext) -> (DrawdownRule, f64) {
    DRAWDOWN_RULES
        .iter()
        .find(|(_, applies, _)| applies(ctx))
        .map(|(rule, _, rate)| (*rule, rate(ctx)))
        .unwrap_or((DrawdownRule::LegislativeMaximum, ctx.limits.max_rate))
}

/// Whether the initial withdrawal falls short of desired income
///
/// Exactly one of the two is reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomePosition {
    /// Fraction of desired income (today's money) not covered
    Shortfall { fraction: f64 },
    /// Annual capital growth after drawdown: assumed return minus drawdown rate
    CapitalGrowth { rate: f64 },
}

impl IncomePosition {
    pub fn shortfall(&self) -> Option<f64> {
        match self {
            IncomePosition::Shortfall { fraction } => Some(*fraction),
            IncomePosition::CapitalGrowth { .. } => None,
        }
    }

    pub fn capital_growth(&self) -> Option<f64> {
        match self {
            IncomePosition::Shortfall { .. } => None,
            IncomePosition::CapitalGrowth { rate } => Some(*rate),
        }
    }
}

/// Initial withdrawal at retirement under the preservation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialWithdrawal {
    pub rule: DrawdownRule,
    pub drawdown_rate: f64,
    pub band: DrawdownBand,
    pub annual_amount: f64,
    pub monthly_future_value: f64,
    pub monthly_todays_terms: f64,
    pub income_position: IncomePosition,
}

impl InitialWithdrawal {
    pub fn from_context(ctx: &DrawdownContext) -> Self {
        let (rule, drawdown_rate) = select_drawdown(ctx);
        let annual_amount = ctx.provision_value * drawdown_rate;
        let monthly_future_value = annual_amount / 12.0;
        let monthly_todays_terms = monthly_future_value / ctx.inflation_factor;

        let desired = ctx.desired_monthly_income_today;
        // Tolerance absorbs rounding when the target rule delivers desired income exactly
        let income_position = if monthly_todays_terms < desired * (1.0 - 1e-9) {
            IncomePosition::Shortfall {
                fraction: (desired - monthly_todays_terms) / desired,
            }
        } else {
            IncomePosition::CapitalGrowth {
                rate: ctx.assumed_return - drawdown_rate,
            }
        };

        Self {
            rule,
            drawdown_rate,
            band: DrawdownBand::classify(drawdown_rate),
            annual_amount,
            monthly_future_value,
            monthly_todays_terms,
            income_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 10 000/month today, inflation factor 2, so target is 240 000/year
    fn ctx(provision_value: f64, capital_required: f64, assumed_return: f64) -> DrawdownContext {
        DrawdownContext {
            provision_value,
            capital_required,
            desired_monthly_income_today: 10_000.0,
            inflation_factor: 2.0,
            assumed_return,
            limits: DrawdownLimits::default(),
        }
    }

    #[test]
    fn test_rule_order() {
        let order: Vec<DrawdownRule> = DRAWDOWN_RULES.iter().map(|(r, _, _)| *r).collect();
        assert_eq!(
            order,
            vec![
                DrawdownRule::LegislativeMinimum,
                DrawdownRule::NoCapital,
                DrawdownRule::TargetIncome,
                DrawdownRule::SustainableReturn,
                DrawdownRule::LegislativeMaximum,
            ]
        );
    }

    #[test]
    fn test_minimum_rate_when_it_already_covers_income() {
        // 2.5% of 20M = 500k/year, 20 833/month today
        let (rule, rate) = select_drawdown(&ctx(20_000_000.0, 5_000_000.0, 0.07));
        assert_eq!(rule, DrawdownRule::LegislativeMinimum);
        assert_eq!(rate, 0.025);
    }

    #[test]
    fn test_minimum_rule_needs_sufficient_capital() {
        let (rule, _) = select_drawdown(&ctx(20_000_000.0, 30_000_000.0, 0.07));
        assert_ne!(rule, DrawdownRule::LegislativeMinimum);
    }

    #[test]
    fn test_target_rate_when_lowest() {
        // 240k / 4M = 6% < 7%
        let w = InitialWithdrawal::from_context(&ctx(4_000_000.0, 3_000_000.0, 0.07));
        assert_eq!(w.rule, DrawdownRule::TargetIncome);
        assert_relative_eq!(w.drawdown_rate, 0.06, max_relative = 1e-12);
        assert_relative_eq!(w.annual_amount, 240_000.0, max_relative = 1e-12);
        assert_relative_eq!(w.monthly_todays_terms, 10_000.0, max_relative = 1e-12);
        assert_eq!(w.band, DrawdownBand::Moderate);
        let growth = w.income_position.capital_growth().expect("no shortfall");
        assert_relative_eq!(growth, 0.01, epsilon = 1e-12);
        assert_eq!(w.income_position.shortfall(), None);
    }

    #[test]
    fn test_assumed_return_caps_target() {
        // Target 12% > 7% assumed
        let w = InitialWithdrawal::from_context(&ctx(2_000_000.0, 1_000_000.0, 0.07));
        assert_eq!(w.rule, DrawdownRule::SustainableReturn);
        assert_eq!(w.drawdown_rate, 0.07);
        // 140k/year -> 5 833.33/month today
        let shortfall = w.income_position.shortfall().expect("short of target");
        assert_relative_eq!(shortfall, 1.0 - 140_000.0 / 240_000.0, max_relative = 1e-12);
        assert_eq!(w.income_position.capital_growth(), None);
    }

    #[test]
    fn test_legislative_maximum_caps_high_returns() {
        // Target 24% and assumed 20% both above 17.5%
        let w = InitialWithdrawal::from_context(&ctx(1_000_000.0, 2_000_000.0, 0.20));
        assert_eq!(w.rule, DrawdownRule::LegislativeMaximum);
        assert_eq!(w.drawdown_rate, 0.175);
        assert_eq!(w.band, DrawdownBand::Aggressive);
    }

    #[test]
    fn test_insufficient_provisions_take_lowest_cap() {
        // Insufficient, target 4.8% below assumed 7%
        let w = InitialWithdrawal::from_context(&ctx(5_000_000.0, 9_000_000.0, 0.07));
        assert_eq!(w.rule, DrawdownRule::TargetIncome);
        assert_relative_eq!(w.drawdown_rate, 0.048, max_relative = 1e-12);
    }

    #[test]
    fn test_no_capital() {
        let w = InitialWithdrawal::from_context(&ctx(0.0, 1_000_000.0, 0.07));
        assert_eq!(w.rule, DrawdownRule::NoCapital);
        assert_eq!(w.drawdown_rate, 0.0);
        assert_eq!(w.annual_amount, 0.0);
        assert_eq!(w.income_position, IncomePosition::Shortfall { fraction: 1.0 });
    }
}
