//! Plausibility thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds for row validation. Rates are in the units noted per field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Face values above this warn.
    pub max_face_value: f64,
    /// Coupons above this (percent) warn.
    pub max_coupon_pct: f64,
    /// Maturities above this (years) warn.
    pub long_maturity_years: f64,
    /// Maturities above this (years) are errors.
    pub max_maturity_years: f64,
    /// Price / face below this warns as an extreme discount.
    pub min_price_ratio: f64,
    /// Price / face above this warns as an extreme premium.
    pub max_price_ratio: f64,
    /// Solved yields below this (decimal) warn.
    pub min_ytm: f64,
    /// Solved yields above this (decimal) warn.
    pub max_ytm: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_face_value: 1_000_000.0,
            max_coupon_pct: 50.0,
            long_maturity_years: 50.0,
            max_maturity_years: 100.0,
            min_price_ratio: 0.3,
            max_price_ratio: 2.0,
            min_ytm: -0.05,
            max_ytm: 0.50,
        }
    }
}
