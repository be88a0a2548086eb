//! CSV export of projection results

use csv::Writer;
use serde::Serialize;
use std::io::Write;

use crate::projection::{ProjectionResult, ProjectionSummary};

const TRAJECTORY_HEADER: [&str; 7] = [
    "Year",
    "Age",
    "CapitalBefore",
    "Withdrawal",
    "CapitalAfter",
    "MonthlyIncome",
    "MonthlyIncomeToday",
];

const PROVISION_HEADER: [&str; 7] = [
    "Provision",
    "Type",
    "CurrentValue",
    "AnnualReturn",
    "MonthlyContribution",
    "ContributionIncrease",
    "FutureValue",
];

#[derive(Serialize)]
struct TrajectoryRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "CapitalBefore")]
    capital_before: f64,
    #[serde(rename = "Withdrawal")]
    withdrawal: f64,
    #[serde(rename = "CapitalAfter")]
    capital_after: f64,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "MonthlyIncomeToday")]
    monthly_income_today: f64,
}

#[derive(Serialize)]
struct ProvisionRow<'a> {
    #[serde(rename = "Provision")]
    name: &'a str,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "CurrentValue")]
    current_value: f64,
    #[serde(rename = "AnnualReturn")]
    annual_return: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "ContributionIncrease")]
    contribution_increase: f64,
    #[serde(rename = "FutureValue")]
    future_value: f64,
}

/// Write the decumulation trajectory, one row per simulated year
///
/// Writes only the header under the preservation policy.
pub fn write_trajectory<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    let trajectory = result.trajectory();
    if trajectory.is_empty() {
        wtr.write_record(TRAJECTORY_HEADER)?;
    }
    for s in trajectory {
        wtr.serialize(TrajectoryRow {
            year: s.year,
            age: s.age(result.retirement_age),
            capital_before: s.capital_before_growth,
            withdrawal: s.withdrawal_amount,
            capital_after: s.capital_after,
            monthly_income: s.monthly_income_future_value,
            monthly_income_today: s.monthly_income_in_todays_terms,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write each provision with its value at retirement
///
/// Writes only the header when there are no provisions.
pub fn write_provisions<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    if result.provisions.is_empty() {
        wtr.write_record(PROVISION_HEADER)?;
    }
    for p in &result.provisions {
        let provision = &p.provision;
        wtr.serialize(ProvisionRow {
            name: provision.display_name(),
            kind: provision.kind.as_str(),
            current_value: provision.current_value,
            annual_return: provision.annual_return_rate,
            monthly_contribution: provision.monthly_contribution,
            contribution_increase: provision.contribution_annual_increase,
            future_value: p.future_value,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the one-row summary; fields that do not apply are left empty
pub fn write_summary<W: Write>(summary: &ProjectionSummary, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.serialize(summary)?;
    wtr.flush()?;
    Ok(())
}
