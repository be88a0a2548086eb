//! Provision growth to retirement
//!
//! Each provision compounds independently. Within a year the contribution
//! stream is paid in twelve equal deposits; a deposit made in month `m`
//! (0-indexed) earns `11 - m` months of growth at the monthly-equivalent
//! rate. The annual contribution escalates once at each year end.

use log::debug;
use serde::{Deserialize, Serialize};

use super::annuity::monthly_equivalent_rate;
use crate::provision::Provision;

/// Future value of a provision after `years` whole years
pub fn future_value(provision: &Provision, years: u32) -> f64 {
    let annual_rate = provision.annual_return_rate;
    let monthly_rate = monthly_equivalent_rate(annual_rate);
    let mut annual_contribution = provision.monthly_contribution * 12.0;
    let mut value = provision.current_value;

    for _year in 0..years {
        value *= 1.0 + annual_rate;

        let deposit = annual_contribution / 12.0;
        for month in 0..12 {
            value += deposit * (1.0 + monthly_rate).powi(11 - month);
        }

        annual_contribution *= 1.0 + provision.contribution_annual_increase;
    }

    value
}

/// One provision and its value at retirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionProjection {
    pub provision: Provision,
    pub future_value: f64,
}

/// All provisions projected to retirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionAggregate {
    /// Per-provision values, in input order
    pub projections: Vec<ProvisionProjection>,

    /// Sum of all future values
    pub total_future_value: f64,

    /// Return averaged over provisions, weighted by value plus nominal contributions
    ///
    /// Zero when no provision carries weight.
    pub average_return: f64,
}

/// Project every provision forward and total the results
pub fn aggregate_provisions(provisions: &[Provision], years: u32) -> ProvisionAggregate {
    let projections: Vec<ProvisionProjection> = provisions
        .iter()
        .map(|provision| {
            let fv = future_value(provision, years);
            debug!(
                "provision {}: {:.2} -> {:.2} over {} years",
                provision.display_name(),
                provision.current_value,
                fv,
                years
            );
            ProvisionProjection {
                provision: provision.clone(),
                future_value: fv,
            }
        })
        .collect();

    let total_future_value = projections.iter().map(|p| p.future_value).sum();

    ProvisionAggregate {
        projections,
        total_future_value,
        average_return: weighted_average_return(provisions, years),
    }
}

/// Contribution-weighted average of provision return rates
pub fn weighted_average_return(provisions: &[Provision], years: u32) -> f64 {
    let (weighted, total_weight) = provisions.iter().fold((0.0, 0.0), |(sum, weight), p| {
        let w = p.return_weight(years);
        (sum + p.annual_return_rate * w, weight + w)
    });

    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        0.0
    }
}
