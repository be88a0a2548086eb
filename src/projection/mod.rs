//! Retirement projection engine: provision growth, capital sizing and decumulation

pub mod annuity;
mod cashflows;
mod depletion;
mod drawdown;
mod engine;
mod growth;
mod inputs;
mod shortfall;
mod state;

pub use cashflows::{
    DepletionProjection, PlanOutcome, PreservationPlan, ProjectionResult, ProjectionSummary, YearSnapshot,
};
pub use depletion::DepletionSimulator;
pub use drawdown::{
    select_drawdown, DrawdownContext, DrawdownRule, IncomePosition, InitialWithdrawal, DRAWDOWN_RULES,
};
pub use engine::{future_annual_income_needed, CapitalEstimate, RetirementPlanner};
pub use growth::{aggregate_provisions, future_value, weighted_average_return, ProvisionAggregate, ProvisionProjection};
pub use inputs::PlanningInputs;
pub use shortfall::monthly_savings_needed;
pub use state::DepletionState;
