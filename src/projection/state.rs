//! Decumulation state tracking for the depletion simulator

use super::annuity::accumulation_factor;

/// Capital remaining at a point in the decumulation
#[derive(Debug, Clone, PartialEq)]
pub struct DepletionState {
    /// Current simulated year after retirement (1-indexed, 0 before the first year)
    pub year: u32,

    /// Capital remaining at the start of the current year
    pub capital: f64,

    /// Whole years between today and retirement
    pub years_to_retirement: u32,
}

impl DepletionState {
    /// Initialize state at the retirement date
    pub fn at_retirement(capital: f64, years_to_retirement: u32) -> Self {
        Self {
            year: 0,
            capital,
            years_to_retirement,
        }
    }

    /// Advance to the next simulated year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// No capital left to draw
    pub fn is_exhausted(&self) -> bool {
        self.capital <= 0.0
    }

    /// Years from today to the end of the current simulated year
    pub fn years_from_today(&self) -> u32 {
        self.years_to_retirement.saturating_add(self.year)
    }

    /// Factor converting money of the current year into today's money
    pub fn inflation_deflator(&self, inflation_rate: f64) -> f64 {
        1.0 / accumulation_factor(inflation_rate, self.years_from_today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_timing() {
        let mut state = DepletionState::at_retirement(500_000.0, 20);
        assert_eq!(state.year, 0);
        state.advance_year();
        assert_eq!(state.year, 1);
        assert_eq!(state.years_from_today(), 21);
        assert_relative_eq!(state.inflation_deflator(0.05), 1.05_f64.powi(-21), max_relative = 1e-12);
    }

    #[test]
    fn test_exhausted() {
        assert!(DepletionState::at_retirement(0.0, 5).is_exhausted());
        assert!(!DepletionState::at_retirement(0.01, 5).is_exhausted());
    }

    #[test]
    fn test_years_from_today_saturates() {
        let mut state = DepletionState::at_retirement(1.0, u32::MAX);
        state.advance_year();
        assert_eq!(state.years_from_today(), u32::MAX);
        assert_eq!(state.inflation_deflator(0.05), 0.0);
    }
}
