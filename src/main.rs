//! Retirement Planner CLI
//!
//! Command-line interface for retirement capital projections.
//! Supports JSON output for API integration via --json.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use retirement_planner::export::{write_provisions, write_summary, write_trajectory};
use retirement_planner::projection::{IncomePosition, PlanOutcome};
use retirement_planner::provision::load_provisions;
use retirement_planner::{
    Assumptions, ClientProfile, PlanningError, Preset, ProjectionResult, Scenario, ScenarioRunner,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "retirement-planner")]
#[command(about = "Retirement capital needs and drawdown projections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project one client to retirement
    Plan {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Directory for trajectory.csv, provisions.csv and summary.csv
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the full result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Compare candidate retirement ages for one client
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Retirement ages to compare
        #[arg(long, value_delimiter = ',', default_values_t = [55, 60, 65])]
        ages: Vec<u32>,

        #[arg(long)]
        json: bool,
    },
    /// List the canned client snapshots
    Presets,
}

#[derive(Args)]
struct ScenarioArgs {
    /// Scenario JSON file; other scenario flags are ignored when set
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Client snapshot supplying age and income defaults (e.g. pre-retiree)
    #[arg(long)]
    preset: Option<String>,

    #[arg(long)]
    current_age: Option<u32>,

    #[arg(long, default_value_t = 65)]
    retirement_age: u32,

    /// Desired monthly income in today's money
    #[arg(long)]
    income: Option<f64>,

    #[arg(long, default_value_t = 0.06)]
    inflation: f64,

    /// Desired annual increase of retirement income
    #[arg(long, default_value_t = 0.03)]
    income_increase: f64,

    /// Assumed post-retirement return
    #[arg(long = "return", default_value_t = 0.07)]
    assumed_return: f64,

    /// Size capital to preserve principal instead of simulating depletion
    #[arg(long)]
    preserve: bool,

    #[arg(long, default_value_t = 0)]
    preservation_years: u32,

    /// Provision capture CSV
    #[arg(long)]
    provisions_csv: Option<PathBuf>,

    /// Assumption overrides as JSON
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

impl ScenarioArgs {
    fn load(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::from_json_path(path)
                .map_err(|e| anyhow!("reading scenario {}: {}", path.display(), e))?,
            None => self.build_from_flags()?,
        };

        if let Some(path) = &self.assumptions {
            let assumptions = Assumptions::from_json_path(path)
                .map_err(|e| anyhow!("reading assumptions {}: {}", path.display(), e))?;
            scenario.assumptions = Some(assumptions);
        }
        Ok(scenario)
    }

    fn build_from_flags(&self) -> Result<Scenario> {
        let mut profile = match &self.preset {
            Some(name) => {
                let preset = Preset::parse(name).with_context(|| format!("unknown preset: {}", name))?;
                ClientProfile::from_preset(preset)
            }
            None => ClientProfile::default(),
        };
        if let Some(age) = self.current_age {
            profile.age = age;
        }

        let today = chrono::Local::now().date_naive();
        let mut inputs = profile.planning_inputs(self.retirement_age, today);
        if let Some(income) = self.income {
            inputs.desired_monthly_income_today = income;
        }
        inputs.inflation_rate = self.inflation;
        inputs.income_annual_increase = self.income_increase;
        inputs.assumed_return_post_retirement = self.assumed_return;
        inputs.preserve_capital = self.preserve;
        inputs.preservation_years = self.preservation_years;

        let provisions = match &self.provisions_csv {
            Some(path) => load_provisions(path)
                .map_err(|e| anyhow!("reading provisions {}: {}", path.display(), e))?,
            None => Vec::new(),
        };

        let mut scenario = Scenario::new(inputs, provisions);
        scenario.client_name = Some(profile.client_name);
        Ok(scenario)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = ScenarioRunner::new();

    match &cli.command {
        Commands::Plan { scenario, csv, json } => {
            let scenario = scenario.load()?;
            let result = runner.run(&scenario).context("projection failed")?;

            if let Some(dir) = csv {
                write_csv_outputs(&result, scenario.client_name.as_deref(), dir)?;
            }

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_plan(&scenario, &result);
            }
        }
        Commands::Sweep { scenario, ages, json } => {
            let scenario = scenario.load()?;
            let runner = match &scenario.assumptions {
                Some(a) => ScenarioRunner::with_assumptions(a.clone()),
                None => runner,
            };
            let sweep = runner.sweep_retirement_ages(&scenario.inputs, &scenario.provisions, ages);

            if *json {
                let rows: Vec<serde_json::Value> = sweep
                    .iter()
                    .map(|(age, r)| match r {
                        Ok(result) => serde_json::json!({ "retirement_age": age, "summary": result.summary() }),
                        Err(e) => serde_json::json!({ "retirement_age": age, "error": e.to_string() }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_sweep(&sweep);
            }
        }
        Commands::Presets => {
            println!("{:<20} {:>5} {:>14}  {:<22} {}", "Preset", "Age", "Income", "Focus", "Notes");
            println!("{}", "-".repeat(100));
            for preset in Preset::ALL {
                let p = ClientProfile::from_preset(preset);
                println!(
                    "{:<20} {:>5} {:>14.2}  {:<22} {}",
                    preset.as_str(),
                    p.age,
                    p.household_income,
                    p.meeting_focus,
                    p.notes
                );
            }
        }
    }

    Ok(())
}

fn write_csv_outputs(result: &ProjectionResult, client_name: Option<&str>, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join("trajectory.csv");
    write_trajectory(result, File::create(&path)?).with_context(|| format!("writing {}", path.display()))?;

    let path = dir.join("provisions.csv");
    write_provisions(result, File::create(&path)?).with_context(|| format!("writing {}", path.display()))?;

    let summary = match client_name {
        Some(name) => result.summary().with_client_name(name),
        None => result.summary(),
    };
    let path = dir.join("summary.csv");
    write_summary(&summary, File::create(&path)?).with_context(|| format!("writing {}", path.display()))?;

    info!("CSV output written to {}", dir.display());
    Ok(())
}

fn print_plan(scenario: &Scenario, result: &ProjectionResult) {
    println!("Retirement Planner v0.1.0");
    println!("=========================\n");

    if let Some(name) = &scenario.client_name {
        println!("Client: {}", name);
    }
    let inputs = &scenario.inputs;
    println!("  Current Age: {}", result.current_age);
    println!("  Retirement Age: {}", result.retirement_age);
    println!("  Years to Retirement: {}", result.years_to_retirement);
    println!("  Desired Income (today): {:.2} /month", inputs.desired_monthly_income_today);
    println!("  Income Needed at Retirement: {:.2} /month", result.future_monthly_income_needed);
    println!();

    print_provisions(result);
    println!("  Total at Retirement: {:.2}", result.total_provision_future_value);
    println!("  Average Return: {:.2}%", result.average_provision_return * 100.0);
    println!();

    match &result.outcome {
        PlanOutcome::PreserveCapital(plan) => {
            println!("Capital Preservation:");
            println!("  Capital Required: {:.2}", plan.capital_required);
            println!("    Perpetuity: {:.2}", plan.perpetuity_capital);
            println!("    Annuity: {:.2}", plan.annuity_capital);
            if plan.has_shortfall() {
                println!("  Capital Shortfall: {:.2}", plan.shortfall_or_surplus);
                match plan.additional_monthly_savings_needed {
                    Some(savings) => println!("  Additional Savings Needed: {:.2} /month", savings),
                    None => println!("  Additional Savings Needed: undefined at a zero average return"),
                }
            } else {
                println!("  Capital Excess: {:.2}", plan.capital_excess());
            }

            let w = &plan.initial_withdrawal;
            println!();
            println!("Initial Withdrawal ({:?}):", w.rule);
            println!("  Drawdown Rate: {:.2}% ({})", w.drawdown_rate * 100.0, w.band.as_str());
            println!("  Annual: {:.2}", w.annual_amount);
            println!("  Monthly: {:.2} ({:.2} in today's money)", w.monthly_future_value, w.monthly_todays_terms);
            match w.income_position {
                IncomePosition::Shortfall { fraction } => {
                    println!("  Income Shortfall: {:.2}%", fraction * 100.0)
                }
                IncomePosition::CapitalGrowth { rate } => {
                    println!("  Capital Growth after Drawdown: {:.2}%", rate * 100.0)
                }
            }
        }
        PlanOutcome::AllowDepletion(depletion) => {
            println!("Capital Depletion ({} years):", depletion.years_until_depletion);
            println!(
                "{:>5} {:>4} {:>16} {:>14} {:>16} {:>12} {:>12}",
                "Year", "Age", "Capital", "Withdrawal", "Capital EOY", "Monthly", "Today"
            );
            println!("{}", "-".repeat(87));
            for s in &depletion.trajectory {
                println!(
                    "{:>5} {:>4} {:>16.2} {:>14.2} {:>16.2} {:>12.2} {:>12.2}",
                    s.year,
                    s.age(result.retirement_age),
                    s.capital_before_growth,
                    s.withdrawal_amount,
                    s.capital_after,
                    s.monthly_income_future_value,
                    s.monthly_income_in_todays_terms,
                );
            }
            println!("{}", "-".repeat(87));
            println!("  Total Withdrawn: {:.2}", depletion.total_withdrawn());
        }
    }
}

fn print_provisions(result: &ProjectionResult) {
    if result.provisions.is_empty() {
        println!("Provisions: none");
        return;
    }
    println!("{:<30} {:>16} {:>16}", "Provision", "Current", "At Retirement");
    println!("{}", "-".repeat(64));
    for p in &result.provisions {
        println!(
            "{:<30} {:>16.2} {:>16.2}",
            p.provision.display_name(),
            p.provision.current_value,
            p.future_value
        );
    }
}

fn print_sweep(sweep: &[(u32, Result<ProjectionResult, PlanningError>)]) {
    println!(
        "{:>4} {:>6} {:>16} {:>16} {:>16} {:>10}",
        "Age", "Years", "Provisions", "Required", "Savings/month", "Depletes"
    );
    println!("{}", "-".repeat(73));
    for (age, result) in sweep {
        match result {
            Ok(r) => {
                let s = r.summary();
                println!(
                    "{:>4} {:>6} {:>16.2} {:>16} {:>16} {:>10}",
                    age,
                    s.years_to_retirement,
                    s.total_provision_future_value,
                    fmt_opt(s.capital_required),
                    fmt_opt(s.additional_monthly_savings_needed),
                    s.years_until_depletion.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
                );
            }
            Err(e) => println!("{:>4} error: {}", age, e),
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}
