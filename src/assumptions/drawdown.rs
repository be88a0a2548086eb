//! Legislative drawdown bounds for living annuities

use serde::{Deserialize, Serialize};

/// Annual drawdown bounds as fractions of remaining capital
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawdownLimits {
    /// Legislative minimum annual drawdown (2.5%)
    pub min_rate: f64,

    /// Legislative maximum annual drawdown (17.5%)
    pub max_rate: f64,
}

impl DrawdownLimits {
    /// Largest withdrawal allowed from `capital` in one year
    pub fn max_withdrawal(&self, capital: f64) -> f64 {
        capital * self.max_rate
    }

    /// Smallest withdrawal required from `capital` in one year
    pub fn min_withdrawal(&self, capital: f64) -> f64 {
        capital * self.min_rate
    }
}

impl Default for DrawdownLimits {
    fn default() -> Self {
        Self {
            min_rate: 0.025,
            max_rate: 0.175,
        }
    }
}

/// Risk band of an initial drawdown rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawdownBand {
    /// Up to 5% a year
    Conservative,
    /// Above 5% and up to 10%
    Moderate,
    /// Above 10%
    Aggressive,
}

impl DrawdownBand {
    pub fn classify(rate: f64) -> Self {
        if rate <= 0.05 {
            DrawdownBand::Conservative
        } else if rate <= 0.10 {
            DrawdownBand::Moderate
        } else {
            DrawdownBand::Aggressive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrawdownBand::Conservative => "conservative",
            DrawdownBand::Moderate => "moderate",
            DrawdownBand::Aggressive => "aggressive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band() {
        let limits = DrawdownLimits::default();
        assert!((limits.max_withdrawal(1_000_000.0) - 175_000.0).abs() < 1e-9);
        assert!((limits.min_withdrawal(1_000_000.0) - 25_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(DrawdownBand::classify(0.025), DrawdownBand::Conservative);
        assert_eq!(DrawdownBand::classify(0.05), DrawdownBand::Conservative);
        assert_eq!(DrawdownBand::classify(0.07), DrawdownBand::Moderate);
        assert_eq!(DrawdownBand::classify(0.10), DrawdownBand::Moderate);
        assert_eq!(DrawdownBand::classify(0.175), DrawdownBand::Aggressive);
    }
}
