//! Load provisions from a capture CSV
//!
//! Expected columns: `Type,Label,CurrentValue,AnnualReturn,MonthlyContribution,ContributionIncrease`
//! with rates given as fractions (0.07 for 7%).

use super::{Provision, ProvisionKind};
use csv::Reader;
use log::warn;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the capture columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Label", default)]
    label: Option<String>,
    #[serde(rename = "CurrentValue")]
    current_value: f64,
    #[serde(rename = "AnnualReturn")]
    annual_return: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "ContributionIncrease")]
    contribution_increase: f64,
}

impl CsvRow {
    fn into_provision(self, line: usize) -> Result<Provision, Box<dyn Error>> {
        let kind = ProvisionKind::parse(&self.kind)
            .ok_or_else(|| format!("line {}: unknown provision type: {}", line, self.kind))?;

        let provision = Provision {
            kind,
            label: self.label.filter(|l| !l.trim().is_empty()),
            current_value: self.current_value,
            annual_return_rate: self.annual_return,
            monthly_contribution: self.monthly_contribution,
            contribution_annual_increase: self.contribution_increase,
        };
        provision
            .validate()
            .map_err(|e| format!("line {}: {}", line, e))?;

        Ok(provision)
    }
}

/// Load all provisions from a CSV file
pub fn load_provisions<P: AsRef<Path>>(path: P) -> Result<Vec<Provision>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load provisions from any reader (e.g., string buffer, upload stream)
pub fn load_provisions_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Provision>, Box<dyn Error>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Provision>, Box<dyn Error>> {
    let mut provisions = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let row: CsvRow = result?;
        let provision = row.into_provision(line)?;

        if provision.current_value == 0.0 && provision.monthly_contribution == 0.0 {
            warn!("line {}: skipping empty provision {}", line, provision.display_name());
            continue;
        }
        provisions.push(provision);
    }

    Ok(provisions)
}
