//! Regulatory and modelling assumptions for retirement projections

mod drawdown;

pub use drawdown::{DrawdownBand, DrawdownLimits};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Container for all projection assumptions
///
/// Missing fields in a deserialized document fall back to the regulatory
/// defaults, so scenario files only need to name what they override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// Living annuity drawdown band
    pub drawdown: DrawdownLimits,

    /// Capital at or below which the full balance may be commuted to cash
    pub full_commutation_threshold: f64,

    /// Remaining horizon (years) funded after a preservation period
    pub post_preservation_years: u32,

    /// Hard cap on simulated decumulation years
    pub max_simulation_years: u32,
}

impl Assumptions {
    /// Create assumptions matching the current regulatory regime
    pub fn default_regulatory() -> Self {
        Self {
            drawdown: DrawdownLimits::default(),
            full_commutation_threshold: 125_000.0,
            post_preservation_years: 20,
            max_simulation_years: 200,
        }
    }

    /// Load assumption overrides from a JSON file
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let assumptions = serde_json::from_reader(file)?;
        Ok(assumptions)
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_regulatory()
    }
}
