//! Output structures for retirement projections

use serde::{Deserialize, Serialize};

use super::drawdown::InitialWithdrawal;
use super::growth::ProvisionProjection;

/// One simulated year of decumulation
///
/// Produced only by the depletion simulator, append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// Simulated year after retirement (1-indexed)
    pub year: u32,

    /// Capital at the start of the year, before withdrawal and growth
    pub capital_before_growth: f64,

    /// Amount withdrawn during the year
    pub withdrawal_amount: f64,

    /// Capital at year end, after withdrawal and growth
    pub capital_after: f64,

    /// Withdrawal / 12 in money of the day
    pub monthly_income_future_value: f64,

    /// Monthly income deflated to today's money
    pub monthly_income_in_todays_terms: f64,

    /// Year in which the remaining balance was commuted in full
    pub full_commutation: bool,
}

impl YearSnapshot {
    /// Client age during this year, given the retirement age
    pub fn age(&self, retirement_age: u32) -> u32 {
        retirement_age + self.year - 1
    }
}

/// Year-by-year decumulation of capital until exhausted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionProjection {
    /// Simulated years including the final lump-sum year
    pub years_until_depletion: u32,

    /// Withdrawal in the first simulated year, None when there was no capital
    pub first_year_withdrawal: Option<f64>,

    /// Full trajectory ordered by year
    pub trajectory: Vec<YearSnapshot>,
}

impl DepletionProjection {
    pub(crate) fn new() -> Self {
        Self {
            years_until_depletion: 0,
            first_year_withdrawal: None,
            trajectory: Vec::new(),
        }
    }

    /// Append a year's snapshot
    pub(crate) fn add_year(&mut self, snapshot: YearSnapshot) {
        if self.first_year_withdrawal.is_none() {
            self.first_year_withdrawal = Some(snapshot.withdrawal_amount);
        }
        self.years_until_depletion = snapshot.year;
        self.trajectory.push(snapshot);
    }

    /// First-year withdrawal spread over twelve months
    pub fn first_monthly_withdrawal(&self) -> Option<f64> {
        self.first_year_withdrawal.map(|w| w / 12.0)
    }

    /// Sum of all withdrawals over the trajectory
    pub fn total_withdrawn(&self) -> f64 {
        self.trajectory.iter().map(|s| s.withdrawal_amount).sum()
    }
}

/// Capital sizing under the preservation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreservationPlan {
    /// Larger of the perpetuity and annuity-certain estimates
    pub capital_required: f64,

    /// Income / return, funding income indefinitely
    pub perpetuity_capital: f64,

    /// Escalated income over the post-preservation horizon, discounted to retirement
    pub annuity_capital: f64,

    /// Capital required minus provision value; negative is an excess
    pub shortfall_or_surplus: f64,

    /// Level monthly saving that closes a positive shortfall by retirement
    ///
    /// None when the average provision return is zero and a shortfall remains.
    pub additional_monthly_savings_needed: Option<f64>,

    /// Sustainable initial drawdown from the provisions
    pub initial_withdrawal: InitialWithdrawal,
}

impl PreservationPlan {
    pub fn has_shortfall(&self) -> bool {
        self.shortfall_or_surplus > 0.0
    }

    /// Capital above requirement, zero when short
    pub fn capital_excess(&self) -> f64 {
        (-self.shortfall_or_surplus).max(0.0)
    }
}

/// Result of whichever planning policy was run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PlanOutcome {
    PreserveCapital(PreservationPlan),
    AllowDepletion(DepletionProjection),
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub current_age: u32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,

    /// Desired monthly income in today's money
    pub desired_monthly_income_today: f64,

    /// Preservation period before the funded horizon, zero when depleting
    pub preservation_years: u32,

    /// Annual income needed at retirement, escalated by inflation and desired increase
    pub future_annual_income_needed: f64,

    /// Monthly equivalent of the annual income needed
    pub future_monthly_income_needed: f64,

    /// Each provision's value at retirement
    pub provisions: Vec<ProvisionProjection>,

    /// Sum of provision values at retirement
    pub total_provision_future_value: f64,

    /// Contribution-weighted average provision return
    pub average_provision_return: f64,

    pub outcome: PlanOutcome,
}

impl ProjectionResult {
    pub fn preservation(&self) -> Option<&PreservationPlan> {
        match &self.outcome {
            PlanOutcome::PreserveCapital(plan) => Some(plan),
            PlanOutcome::AllowDepletion(_) => None,
        }
    }

    pub fn depletion(&self) -> Option<&DepletionProjection> {
        match &self.outcome {
            PlanOutcome::PreserveCapital(_) => None,
            PlanOutcome::AllowDepletion(projection) => Some(projection),
        }
    }

    pub fn capital_required(&self) -> Option<f64> {
        self.preservation().map(|p| p.capital_required)
    }

    pub fn years_until_depletion(&self) -> Option<u32> {
        self.depletion().map(|d| d.years_until_depletion)
    }

    /// Decumulation trajectory, empty under the preservation policy
    pub fn trajectory(&self) -> &[YearSnapshot] {
        self.depletion().map(|d| d.trajectory.as_slice()).unwrap_or(&[])
    }

    /// Flat summary for tabular export
    pub fn summary(&self) -> ProjectionSummary {
        let preservation = self.preservation();
        let depletion = self.depletion();
        let withdrawal = preservation.map(|p| &p.initial_withdrawal);

        let first_year = depletion.and_then(|d| d.trajectory.first());

        ProjectionSummary {
            client_name: None,
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            years_to_retirement: self.years_to_retirement,
            desired_monthly_income_today: self.desired_monthly_income_today,
            future_annual_income_needed: self.future_annual_income_needed,
            future_monthly_income_needed: self.future_monthly_income_needed,
            total_provision_future_value: self.total_provision_future_value,
            preserve_capital: preservation.is_some(),
            preservation_years: preservation.map(|_| self.preservation_years),
            capital_required: preservation.map(|p| p.capital_required),
            capital_shortfall: preservation.map(|p| p.shortfall_or_surplus.max(0.0)),
            capital_excess: preservation.map(|p| p.capital_excess()),
            additional_monthly_savings_needed: preservation.and_then(|p| p.additional_monthly_savings_needed),
            drawdown_rate: withdrawal.map(|w| w.drawdown_rate),
            income_shortfall: withdrawal.and_then(|w| w.income_position.shortfall()),
            capital_growth_rate: withdrawal.and_then(|w| w.income_position.capital_growth()),
            initial_annual_withdrawal: withdrawal
                .map(|w| w.annual_amount)
                .or_else(|| depletion.and_then(|d| d.first_year_withdrawal)),
            initial_monthly_withdrawal: withdrawal
                .map(|w| w.monthly_future_value)
                .or_else(|| first_year.map(|s| s.monthly_income_future_value)),
            initial_monthly_withdrawal_today: withdrawal
                .map(|w| w.monthly_todays_terms)
                .or_else(|| first_year.map(|s| s.monthly_income_in_todays_terms)),
            years_until_depletion: depletion.map(|d| d.years_until_depletion),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub client_name: Option<String>,
    pub current_age: u32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    pub desired_monthly_income_today: f64,
    pub future_annual_income_needed: f64,
    pub future_monthly_income_needed: f64,
    pub total_provision_future_value: f64,
    pub preserve_capital: bool,
    pub preservation_years: Option<u32>,
    pub capital_required: Option<f64>,
    pub capital_shortfall: Option<f64>,
    pub capital_excess: Option<f64>,
    pub additional_monthly_savings_needed: Option<f64>,
    pub drawdown_rate: Option<f64>,
    pub income_shortfall: Option<f64>,
    pub capital_growth_rate: Option<f64>,
    pub initial_annual_withdrawal: Option<f64>,
    pub initial_monthly_withdrawal: Option<f64>,
    pub initial_monthly_withdrawal_today: Option<f64>,
    pub years_until_depletion: Option<u32>,
}

impl ProjectionSummary {
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }
}
