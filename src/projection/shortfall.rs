//! Additional savings needed to close a capital shortfall

use super::annuity::fv_annuity_factor;
use crate::error::PlanningError;

/// Level monthly saving that accumulates to `shortfall` after `years`
///
/// Annual savings are paid in arrears at `average_return`; the monthly
/// figure is the annual amount over twelve. A shortfall of zero or less
/// needs no saving.
pub fn monthly_savings_needed(shortfall: f64, years: u32, average_return: f64) -> Result<f64, PlanningError> {
    if shortfall <= 0.0 {
        return Ok(0.0);
    }
    if years == 0 {
        return Err(PlanningError::EmptySavingsHorizon);
    }

    let factor = fv_annuity_factor(average_return, years).ok_or(PlanningError::UndefinedAnnuityFactor)?;
    let annual_savings = shortfall / factor;
    Ok(annual_savings / 12.0)
}
