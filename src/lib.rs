//! Retirement Planner - projection engine for retirement capital needs
//!
//! This library provides:
//! - Growth of savings provisions to retirement with escalating contributions
//! - Capital sizing to preserve income in retirement
//! - Year-by-year decumulation under a living annuity drawdown cap
//! - Additional savings needed to close a capital shortfall
//! - Batch scenarios and retirement-age sweeps

pub mod assumptions;
pub mod client;
pub mod error;
pub mod export;
pub mod projection;
pub mod provision;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Assumptions, DrawdownLimits};
pub use client::{ClientProfile, Preset};
pub use error::PlanningError;
pub use projection::{PlanningInputs, ProjectionResult, RetirementPlanner};
pub use provision::{Provision, ProvisionKind};
pub use scenario::{Scenario, ScenarioRunner};
