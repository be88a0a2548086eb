//! Annual annuity and compounding factors
//!
//! All rates are annual effective rates; all terms are whole years.

/// Accumulation factor (1 + rate)^years
pub fn accumulation_factor(rate: f64, years: u32) -> f64 {
    match i32::try_from(years) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => (1.0 + rate).powf(f64::from(years)),
    }
}

/// Discount factor (1 + rate)^-years
pub fn discount_factor(rate: f64, years: u32) -> f64 {
    1.0 / accumulation_factor(rate, years)
}

/// Present value of 1 a year for `years` years, paid in arrears
///
/// `(1 - v^n) / r`. Returns None at a zero rate, where the closed form is undefined.
pub fn pv_annuity_factor(rate: f64, years: u32) -> Option<f64> {
    if rate.abs() < 1e-12 {
        return None;
    }
    Some((1.0 - discount_factor(rate, years)) / rate)
}

/// Future value of 1 a year for `years` years, paid in arrears
///
/// `((1 + r)^n - 1) / r`. Returns None at a zero rate.
pub fn fv_annuity_factor(rate: f64, years: u32) -> Option<f64> {
    if rate.abs() < 1e-12 {
        return None;
    }
    Some((accumulation_factor(rate, years) - 1.0) / rate)
}

/// Monthly effective rate equivalent to an annual effective rate
pub fn monthly_equivalent_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}
