//! Client snapshot used to pre-populate planning scenarios
//!
//! The planner never reads a profile; callers turn one into `PlanningInputs`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::projection::PlanningInputs;

/// Income assumed when the snapshot has no household income
pub const FALLBACK_DESIRED_INCOME: f64 = 18_000.0;

/// Lowest default desired income derived from household income
pub const MIN_DESIRED_INCOME: f64 = 10_000.0;

/// Share of household income targeted in retirement
pub const INCOME_REPLACEMENT_RATIO: f64 = 0.7;

/// Client details captured once and shared by every tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub client_name: String,
    pub advisor_name: String,

    /// Age in whole years, used when no date of birth is known
    pub age: u32,

    pub date_of_birth: Option<NaiveDate>,

    /// Monthly household income
    pub household_income: f64,

    pub meeting_focus: String,
    pub notes: String,
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            client_name: "Client".to_string(),
            advisor_name: "Advisor".to_string(),
            age: 38,
            date_of_birth: None,
            household_income: 45_000.0,
            meeting_focus: "Cash flow & salary".to_string(),
            notes: String::new(),
        }
    }
}

impl ClientProfile {
    pub fn from_preset(preset: Preset) -> Self {
        let (client_name, age, household_income, meeting_focus, notes) = match preset {
            Preset::YoungProfessional => (
                "Young Pro",
                30,
                42_000.0,
                "Cash flow & salary",
                "Early career; maximize tax benefits.",
            ),
            Preset::FamilyBuilder => (
                "Family",
                40,
                65_000.0,
                "Retirement gap",
                "School fees; protect income; grow RA.",
            ),
            Preset::PreRetiree => (
                "Pre-Retiree",
                58,
                90_000.0,
                "Retirement gap",
                "Sequence risk; drawdown strategy.",
            ),
            Preset::BusinessOwner => (
                "Business Owner",
                45,
                120_000.0,
                "Estate & protection",
                "Liquidity for estate + key person cover.",
            ),
        };

        Self {
            client_name: client_name.to_string(),
            age,
            household_income,
            meeting_focus: meeting_focus.to_string(),
            notes: notes.to_string(),
            ..Self::default()
        }
    }

    /// Age on `date`, from the date of birth when known
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        match self.date_of_birth {
            Some(dob) => {
                let had_birthday = (date.month(), date.day()) >= (dob.month(), dob.day());
                let years = date.year() - dob.year() - if had_birthday { 0 } else { 1 };
                years.max(0) as u32
            }
            None => self.age,
        }
    }

    /// Desired monthly retirement income in today's money
    pub fn default_desired_income(&self) -> f64 {
        if self.household_income > 0.0 {
            (self.household_income * INCOME_REPLACEMENT_RATIO).max(MIN_DESIRED_INCOME)
        } else {
            FALLBACK_DESIRED_INCOME
        }
    }

    /// Planning inputs with the capture-form defaults for this client
    ///
    /// Defaults: 6% inflation, 3% desired increase, 7% post-retirement
    /// return, capital allowed to deplete.
    pub fn planning_inputs(&self, retirement_age: u32, valuation_date: NaiveDate) -> PlanningInputs {
        PlanningInputs {
            current_age: self.age_on(valuation_date),
            retirement_age,
            desired_monthly_income_today: self.default_desired_income(),
            inflation_rate: 0.06,
            income_annual_increase: 0.03,
            assumed_return_post_retirement: 0.07,
            preserve_capital: false,
            preservation_years: 0,
        }
    }
}

/// Canned client snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    YoungProfessional,
    FamilyBuilder,
    PreRetiree,
    BusinessOwner,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::YoungProfessional,
        Preset::FamilyBuilder,
        Preset::PreRetiree,
        Preset::BusinessOwner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::YoungProfessional => "Young Professional",
            Preset::FamilyBuilder => "Family Builder",
            Preset::PreRetiree => "Pre-Retiree",
            Preset::BusinessOwner => "Business Owner",
        }
    }

    /// Parse a display name or a kebab-case key (`pre-retiree`)
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = name.trim().replace('-', " ");
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().replace('-', " ").eq_ignore_ascii_case(&wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_snapshot() {
        let p = ClientProfile::default();
        assert_eq!(p.age, 38);
        assert_eq!(p.household_income, 45_000.0);
        assert_relative_eq!(p.default_desired_income(), 31_500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_desired_income_floor_and_fallback() {
        let low = ClientProfile { household_income: 8_000.0, ..ClientProfile::default() };
        assert_eq!(low.default_desired_income(), 10_000.0);

        let none = ClientProfile { household_income: 0.0, ..ClientProfile::default() };
        assert_eq!(none.default_desired_income(), 18_000.0);
    }

    #[test]
    fn test_presets() {
        let p = ClientProfile::from_preset(Preset::PreRetiree);
        assert_eq!(p.client_name, "Pre-Retiree");
        assert_eq!(p.age, 58);
        assert_eq!(p.household_income, 90_000.0);
        assert_eq!(p.advisor_name, "Advisor");

        assert_eq!(Preset::parse("pre-retiree"), Some(Preset::PreRetiree));
        assert_eq!(Preset::parse("family builder"), Some(Preset::FamilyBuilder));
        assert_eq!(Preset::parse("Business Owner"), Some(Preset::BusinessOwner));
        assert_eq!(Preset::parse("retiree"), None);
    }

    #[test]
    fn test_age_from_date_of_birth() {
        let p = ClientProfile {
            date_of_birth: Some(date(1980, 6, 15)),
            ..ClientProfile::default()
        };
        assert_eq!(p.age_on(date(2026, 6, 14)), 45);
        assert_eq!(p.age_on(date(2026, 6, 15)), 46);
        assert_eq!(ClientProfile::default().age_on(date(2026, 1, 1)), 38);
    }

    #[test]
    fn test_planning_inputs_from_profile() {
        let p = ClientProfile::from_preset(Preset::FamilyBuilder);
        let inputs = p.planning_inputs(65, date(2026, 10, 16));
        assert_eq!(inputs.current_age, 40);
        assert_eq!(inputs.years_to_retirement(), 25);
        assert_eq!(inputs.desired_monthly_income_today, 65_000.0 * 0.7);
        assert!(inputs.validate().is_ok());
    }
}
