//! Portfolio-level risk aggregation.
//!
//! ## Formulas
//!
//! ```text
//! total_value = Σ price_i × qty_i
//! dv01        = Σ dv01_i × qty_i
//! duration    = Σ D_i × price_i × qty_i / total_value
//! convexity   = Σ C_i × price_i × qty_i / total_value
//! ```
//!
//! Duration and convexity are 0 when the total value is 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_fold;
use crate::portfolio::Portfolio;
use crate::position::Position;

/// Aggregated portfolio risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Number of positions aggregated.
    pub position_count: usize,
    /// Total market value.
    pub total_value: f64,
    /// Value-weighted modified duration.
    pub duration: f64,
    /// Value-weighted convexity.
    pub convexity: f64,
    /// Summed position DV01.
    pub dv01: f64,
}

/// Metrics for one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundMetrics {
    /// Fund key ("Unassigned" for positions without one).
    pub fund: String,
    /// Aggregated metrics for the fund's positions.
    pub metrics: PortfolioMetrics,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    count: usize,
    value: f64,
    dv01: f64,
    duration_weighted: f64,
    convexity_weighted: f64,
}

impl Sums {
    fn add(self, position: &Position) -> Self {
        let value = position.market_value();
        let bond = position.valuation();
        Self {
            count: self.count + 1,
            value: self.value + value,
            dv01: self.dv01 + position.position_dv01(),
            duration_weighted: self.duration_weighted + bond.modified_duration() * value,
            convexity_weighted: self.convexity_weighted + bond.convexity() * value,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            value: self.value + other.value,
            dv01: self.dv01 + other.dv01,
            duration_weighted: self.duration_weighted + other.duration_weighted,
            convexity_weighted: self.convexity_weighted + other.convexity_weighted,
        }
    }
}

/// Aggregates positions into portfolio metrics.
///
/// Fund-agnostic: filter with [`Portfolio::for_fund`] first.
#[must_use]
pub fn aggregate(positions: &[Position], config: &AnalyticsConfig) -> PortfolioMetrics {
    let sums = maybe_parallel_fold(
        positions,
        config,
        Sums::default(),
        Sums::add,
        Sums::merge,
    );

    let (duration, convexity) = if sums.value == 0.0 {
        (0.0, 0.0)
    } else {
        (
            sums.duration_weighted / sums.value,
            sums.convexity_weighted / sums.value,
        )
    };

    debug!(
        positions = sums.count,
        total_value = sums.value,
        duration,
        dv01 = sums.dv01,
        "portfolio aggregated"
    );

    PortfolioMetrics {
        position_count: sums.count,
        total_value: sums.value,
        duration,
        convexity,
        dv01: sums.dv01,
    }
}

/// Aggregates each fund separately, in sorted fund order.
#[must_use]
pub fn aggregate_by_fund(portfolio: &Portfolio, config: &AnalyticsConfig) -> Vec<FundMetrics> {
    portfolio
        .partition_by_fund()
        .into_iter()
        .map(|(fund, positions)| FundMetrics {
            metrics: aggregate(positions.positions(), config),
            fund,
        })
        .collect()
}

impl Portfolio {
    /// Aggregates every position; shorthand for [`aggregate`].
    #[must_use]
    pub fn metrics(&self, config: &AnalyticsConfig) -> PortfolioMetrics {
        aggregate(self.positions(), config)
    }
}
