//! Scenario runner for batch retirement projections
//!
//! Holds one set of assumptions and runs many scenarios against it, in
//! parallel where there is more than one.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::PlanningError;
use crate::projection::{PlanningInputs, ProjectionResult, RetirementPlanner};
use crate::{Assumptions, Provision};

/// A planning scenario as stored on disk
///
/// ```json
/// {
///   "client_name": "Family",
///   "inputs": { "current_age": 40, "retirement_age": 65, ... },
///   "provisions": [ { "current_value": 850000, "annual_return_rate": 0.09 } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub client_name: Option<String>,

    pub inputs: PlanningInputs,

    #[serde(default)]
    pub provisions: Vec<Provision>,

    /// Overrides the runner's assumptions for this scenario only
    #[serde(default)]
    pub assumptions: Option<Assumptions>,
}

impl Scenario {
    pub fn new(inputs: PlanningInputs, provisions: Vec<Provision>) -> Self {
        Self {
            client_name: None,
            inputs,
            provisions,
            assumptions: None,
        }
    }

    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let scenario = serde_json::from_reader(file)?;
        Ok(scenario)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Pre-loaded scenario runner
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    planner: RetirementPlanner,
}

impl ScenarioRunner {
    /// Runner with the regulatory default assumptions
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_regulatory())
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            planner: RetirementPlanner::new(assumptions),
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.planner.assumptions()
    }

    /// Run one scenario, honouring its own assumption overrides
    pub fn run(&self, scenario: &Scenario) -> Result<ProjectionResult, PlanningError> {
        match &scenario.assumptions {
            Some(assumptions) => {
                RetirementPlanner::new(assumptions.clone()).plan(&scenario.inputs, &scenario.provisions)
            }
            None => self.planner.plan(&scenario.inputs, &scenario.provisions),
        }
    }

    /// Run many scenarios in parallel; results keep input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<Result<ProjectionResult, PlanningError>> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Re-plan the same client at each candidate retirement age
    ///
    /// Results keep the order of `retirement_ages`. Ages at or below the
    /// current age come back as validation errors.
    pub fn sweep_retirement_ages(
        &self,
        inputs: &PlanningInputs,
        provisions: &[Provision],
        retirement_ages: &[u32],
    ) -> Vec<(u32, Result<ProjectionResult, PlanningError>)> {
        retirement_ages
            .par_iter()
            .map(|&age| (age, self.planner.plan(&inputs.retiring_at(age), provisions)))
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
