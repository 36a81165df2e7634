//! Executive summary of a portfolio analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::PortfolioMetrics;
use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_fold;
use crate::position::Position;
use crate::scenarios::ScenarioPoint;

/// Shifts reported as headline impacts, in display order.
pub const HEADLINE_SHIFTS_BPS: [i32; 3] = [50, 100, -50];

/// Assumed one-day yield volatility in basis points.
pub const DAILY_YIELD_VOL_BPS: f64 = 50.0;

/// One-sided 95% normal quantile.
pub const Z_95: f64 = 1.645;

/// Duration above which hedging is suggested.
pub const HEDGING_DURATION_THRESHOLD: f64 = 5.0;

/// Interest-rate risk tier by portfolio duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationRisk {
    /// Duration below 3.
    Low,
    /// Duration from 3 to below 7.
    Moderate,
    /// Duration of 7 or more.
    High,
}

impl DurationRisk {
    /// Classifies a duration.
    #[must_use]
    pub fn from_duration(duration: f64) -> Self {
        if duration < 3.0 {
            Self::Low
        } else if duration < 7.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

impl fmt::Display for DurationRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        };
        write!(f, "{name}")
    }
}

/// Headline summary for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Number of bonds.
    pub bond_count: usize,
    /// Total market value.
    pub total_value: f64,
    /// Value-weighted yield-to-maturity in percent.
    pub average_ytm_pct: f64,
    /// Portfolio modified duration.
    pub duration: f64,
    /// Portfolio DV01.
    pub dv01: f64,
    /// Risk tier for the duration.
    pub duration_risk: DurationRisk,
    /// Scenario points at the headline shifts present in the grid.
    pub headline_impacts: Vec<ScenarioPoint>,
    /// Parametric one-day 95% loss estimate: `dv01 × 50 × 1.645`.
    pub one_day_var_95: f64,
    /// True when duration exceeds the hedging threshold.
    pub hedging_suggested: bool,
    /// Bonds whose yield is the coupon-rate fallback.
    pub low_confidence_bonds: Vec<String>,
}

impl ExecutiveSummary {
    /// Builds the summary from the positions and their derived outputs.
    #[must_use]
    pub fn from_analysis(
        positions: &[Position],
        metrics: &PortfolioMetrics,
        scenarios: &[ScenarioPoint],
        config: &AnalyticsConfig,
    ) -> Self {
        let ytm_weighted = maybe_parallel_fold(
            positions,
            config,
            0.0,
            |acc, p| acc + p.valuation().ytm() * p.market_value(),
            |a, b| a + b,
        );
        let average_ytm_pct = if metrics.total_value == 0.0 {
            0.0
        } else {
            ytm_weighted / metrics.total_value * 100.0
        };

        let headline_impacts = HEADLINE_SHIFTS_BPS
            .iter()
            .filter_map(|shift| scenarios.iter().find(|p| p.shift_bps == *shift).copied())
            .collect();

        Self {
            bond_count: positions.len(),
            total_value: metrics.total_value,
            average_ytm_pct,
            duration: metrics.duration,
            dv01: metrics.dv01,
            duration_risk: DurationRisk::from_duration(metrics.duration),
            headline_impacts,
            one_day_var_95: metrics.dv01 * DAILY_YIELD_VOL_BPS * Z_95,
            hedging_suggested: metrics.duration > HEDGING_DURATION_THRESHOLD,
            low_confidence_bonds: positions
                .iter()
                .filter(|p| p.valuation().is_low_confidence())
                .map(|p| p.name().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::scenarios::{run_scenarios, ShiftGrid};
    use approx::assert_relative_eq;
    use bondlens_analytics::{BondTerms, BondValuation, Frequency};

    fn position(years: f64, price: f64) -> Position {
        let terms = BondTerms::builder()
            .name(format!("{years}Y"))
            .face_value(1000.0)
            .coupon_rate(0.05)
            .years_to_maturity(years)
            .frequency(Frequency::Annual)
            .market_price(price)
            .build()
            .unwrap();
        Position::new(BondValuation::new(terms).unwrap(), 1.0).unwrap()
    }

    #[test]
    fn test_duration_risk_tiers() {
        assert_eq!(DurationRisk::from_duration(0.0), DurationRisk::Low);
        assert_eq!(DurationRisk::from_duration(2.99), DurationRisk::Low);
        assert_eq!(DurationRisk::from_duration(3.0), DurationRisk::Moderate);
        assert_eq!(DurationRisk::from_duration(6.99), DurationRisk::Moderate);
        assert_eq!(DurationRisk::from_duration(7.0), DurationRisk::High);
        assert_eq!(DurationRisk::High.to_string(), "High");
    }

    #[test]
    fn test_summary_single_bond() {
        let config = AnalyticsConfig::default();
        let positions = vec![position(5.0, 1000.0)];
        let metrics = aggregate(&positions, &config);
        let scenarios = run_scenarios(&positions, &ShiftGrid::default(), &config).unwrap();

        let summary = ExecutiveSummary::from_analysis(&positions, &metrics, &scenarios, &config);

        assert_eq!(summary.bond_count, 1);
        assert_relative_eq!(summary.average_ytm_pct, 5.0, epsilon = 1e-6);
        assert_eq!(summary.duration_risk, DurationRisk::Moderate);
        assert!(!summary.hedging_suggested);
        assert_relative_eq!(summary.one_day_var_95, metrics.dv01 * 50.0 * 1.645);
        let shifts: Vec<_> = summary.headline_impacts.iter().map(|p| p.shift_bps).collect();
        assert_eq!(shifts, vec![50, 100, -50]);
        assert!(summary.low_confidence_bonds.is_empty());
    }

    #[test]
    fn test_summary_missing_headline_shifts() {
        let config = AnalyticsConfig::default();
        let positions = vec![position(10.0, 1000.0)];
        let metrics = aggregate(&positions, &config);
        let grid = ShiftGrid::new(-300, 300, 300).unwrap();
        let scenarios = run_scenarios(&positions, &grid, &config).unwrap();

        let summary = ExecutiveSummary::from_analysis(&positions, &metrics, &scenarios, &config);

        assert!(summary.headline_impacts.is_empty());
        assert_eq!(summary.duration_risk, DurationRisk::High);
        assert!(summary.hedging_suggested);
    }

    #[test]
    fn test_summary_empty() {
        let config = AnalyticsConfig::default();
        let metrics = aggregate(&[], &config);
        let summary = ExecutiveSummary::from_analysis(&[], &metrics, &[], &config);

        assert_eq!(summary.bond_count, 0);
        assert_relative_eq!(summary.average_ytm_pct, 0.0);
        assert_eq!(summary.duration_risk, DurationRisk::Low);
        assert_relative_eq!(summary.one_day_var_95, 0.0);
    }

    #[test]
    fn test_summary_flags_fallback() {
        let config = AnalyticsConfig::default();
        let positions = vec![position(5.0, 1000.0), position(5.0, 5000.0)];
        let metrics = aggregate(&positions, &config);
        let summary = ExecutiveSummary::from_analysis(&positions, &metrics, &[], &config);

        assert_eq!(summary.low_confidence_bonds, vec!["5Y".to_string()]);
    }
}
