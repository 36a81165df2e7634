//! Per-bond detail records for reporting.

use bondlens_analytics::YieldConfidence;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_map;
use crate::position::Position;

/// Flat per-bond metrics, in reporting units (rates in percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondMetrics {
    /// Bond name.
    pub name: String,
    /// Fund key, if any.
    pub fund: Option<String>,
    /// Quantity held.
    pub quantity: f64,
    /// Face value.
    pub face_value: f64,
    /// Coupon rate in percent.
    pub coupon_pct: f64,
    /// Years to maturity.
    pub years_to_maturity: f64,
    /// Market price per bond.
    pub market_price: f64,
    /// Yield-to-maturity in percent.
    pub ytm_pct: f64,
    /// `market_price × quantity`.
    pub position_value: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Macaulay duration.
    pub macaulay_duration: f64,
    /// DV01 per bond.
    pub dv01: f64,
    /// DV01 of the whole position.
    pub position_dv01: f64,
    /// Convexity.
    pub convexity: f64,
    /// How the yield was obtained.
    pub confidence: YieldConfidence,
}

impl From<&Position> for BondMetrics {
    fn from(position: &Position) -> Self {
        let bond = position.valuation();
        let terms = bond.terms();
        Self {
            name: position.name().to_string(),
            fund: position.fund_id().map(str::to_string),
            quantity: position.quantity(),
            face_value: terms.face_value(),
            coupon_pct: terms.coupon_rate() * 100.0,
            years_to_maturity: terms.years_to_maturity(),
            market_price: bond.market_price(),
            ytm_pct: bond.ytm() * 100.0,
            position_value: position.market_value(),
            modified_duration: bond.modified_duration(),
            macaulay_duration: bond.macaulay_duration(),
            dv01: bond.dv01(),
            position_dv01: position.position_dv01(),
            convexity: bond.convexity(),
            confidence: bond.confidence(),
        }
    }
}

/// Detail records for every position, in order.
#[must_use]
pub fn bond_metrics(positions: &[Position], config: &AnalyticsConfig) -> Vec<BondMetrics> {
    maybe_parallel_map(positions, config, |p| BondMetrics::from(p))
}
