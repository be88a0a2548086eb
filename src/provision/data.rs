//! Provision data structures matching the advisor's provision capture format

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, PlanningError};

/// Type of savings vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProvisionKind {
    RetirementAnnuity,
    PensionFund,
    ProvidentFund,
    PreservationFund,
    Business,
    Endowment,
    SavingsFund,
    Shares,
    LinkedInvestment,
    Property,
    FixedDeposit,
    #[default]
    Other,
}

impl ProvisionKind {
    /// All kinds in capture-form order
    pub const ALL: [ProvisionKind; 12] = [
        ProvisionKind::RetirementAnnuity,
        ProvisionKind::PensionFund,
        ProvisionKind::ProvidentFund,
        ProvisionKind::PreservationFund,
        ProvisionKind::Business,
        ProvisionKind::Endowment,
        ProvisionKind::SavingsFund,
        ProvisionKind::Shares,
        ProvisionKind::LinkedInvestment,
        ProvisionKind::Property,
        ProvisionKind::FixedDeposit,
        ProvisionKind::Other,
    ];

    /// Display name as shown on the capture form
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisionKind::RetirementAnnuity => "Retirement Annuity",
            ProvisionKind::PensionFund => "Pension Fund",
            ProvisionKind::ProvidentFund => "Provident Fund",
            ProvisionKind::PreservationFund => "Preservation Fund",
            ProvisionKind::Business => "Business",
            ProvisionKind::Endowment => "Endowment",
            ProvisionKind::SavingsFund => "Savings Fund",
            ProvisionKind::Shares => "Shares",
            ProvisionKind::LinkedInvestment => "Linked Investment",
            ProvisionKind::Property => "Property",
            ProvisionKind::FixedDeposit => "Fixed Deposit",
            ProvisionKind::Other => "Other",
        }
    }

    /// Parse a display name, ignoring case and surrounding whitespace
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

/// A savings vehicle contributing to retirement capital
///
/// Immutable for the duration of one projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provision {
    /// Type of vehicle
    #[serde(default)]
    pub kind: ProvisionKind,

    /// Free-text label (fund name, policy number)
    #[serde(default)]
    pub label: Option<String>,

    /// Current balance
    pub current_value: f64,

    /// Nominal annual growth rate
    pub annual_return_rate: f64,

    /// Monthly contribution in the first projection year
    #[serde(default)]
    pub monthly_contribution: f64,

    /// Escalation applied to the contribution stream once per year
    #[serde(default)]
    pub contribution_annual_increase: f64,
}

impl Provision {
    /// Create a provision of kind `Other` with no label
    pub fn new(
        current_value: f64,
        annual_return_rate: f64,
        monthly_contribution: f64,
        contribution_annual_increase: f64,
    ) -> Self {
        Self {
            kind: ProvisionKind::Other,
            label: None,
            current_value,
            annual_return_rate,
            monthly_contribution,
            contribution_annual_increase,
        }
    }

    /// Lump-sum only provision
    pub fn lump_sum(current_value: f64, annual_return_rate: f64) -> Self {
        Self::new(current_value, annual_return_rate, 0.0, 0.0)
    }

    pub fn with_kind(mut self, kind: ProvisionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name used in reports: the label when present, else the kind
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.kind.as_str())
    }

    /// Weight used when averaging returns across provisions
    ///
    /// Current value plus nominal (unescalated) contributions over `years`.
    pub fn return_weight(&self, years: u32) -> f64 {
        self.current_value + self.monthly_contribution * 12.0 * years as f64
    }

    /// Reject negative or non-finite amounts and rates
    pub fn validate(&self) -> Result<(), PlanningError> {
        ensure_non_negative("provision current value", self.current_value)?;
        ensure_non_negative("provision annual return", self.annual_return_rate)?;
        ensure_non_negative("provision monthly contribution", self.monthly_contribution)?;
        ensure_non_negative("provision contribution increase", self.contribution_annual_increase)?;
        Ok(())
    }
}
