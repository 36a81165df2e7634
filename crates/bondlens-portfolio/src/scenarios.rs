//! Parallel yield-shift scenarios.
//!
//! Every position is re-priced at `ytm + shift / 10_000` and summed. Deltas
//! are measured against the current market value of the positions.

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::error::{PortfolioError, PortfolioResult};
use crate::parallel::{maybe_parallel_fold, maybe_parallel_map};
use crate::position::Position;

/// Lowest accepted shift; a -100% yield move or beyond has no price.
pub const MIN_SHIFT_BPS: i32 = -9_999;

/// Highest accepted shift.
pub const MAX_SHIFT_BPS: i32 = 10_000;

/// An inclusive grid of yield shifts in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftGrid {
    /// First shift.
    pub start_bps: i32,
    /// Last shift (included when on the step grid).
    pub end_bps: i32,
    /// Distance between shifts.
    pub step_bps: i32,
}

impl Default for ShiftGrid {
    fn default() -> Self {
        Self {
            start_bps: -200,
            end_bps: 200,
            step_bps: 25,
        }
    }
}

impl ShiftGrid {
    /// Creates a validated grid.
    pub fn new(start_bps: i32, end_bps: i32, step_bps: i32) -> PortfolioResult<Self> {
        let grid = Self {
            start_bps,
            end_bps,
            step_bps,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Checks the step is positive, the range is ascending and both ends
    /// lie within [`MIN_SHIFT_BPS`, `MAX_SHIFT_BPS`].
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.step_bps <= 0 {
            return Err(PortfolioError::invalid_grid(format!(
                "step must be positive (got {})",
                self.step_bps
            )));
        }
        if self.start_bps > self.end_bps {
            return Err(PortfolioError::invalid_grid(format!(
                "start {} is above end {}",
                self.start_bps, self.end_bps
            )));
        }
        if self.start_bps < MIN_SHIFT_BPS || self.end_bps > MAX_SHIFT_BPS {
            return Err(PortfolioError::invalid_grid(format!(
                "shifts must lie within {MIN_SHIFT_BPS}..={MAX_SHIFT_BPS} bps (got {}..={})",
                self.start_bps, self.end_bps
            )));
        }
        Ok(())
    }

    /// Shifts in ascending order.
    ///
    /// Empty for an invalid grid.
    #[must_use]
    pub fn shifts(&self) -> Vec<i32> {
        if self.validate().is_err() {
            return Vec::new();
        }
        let count = (i64::from(self.end_bps) - i64::from(self.start_bps)) / i64::from(self.step_bps);
        (0..=count)
            .map(|k| (i64::from(self.start_bps) + k * i64::from(self.step_bps)) as i32)
            .collect()
    }
}

/// Portfolio value under one yield shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    /// Shift in basis points.
    pub shift_bps: i32,
    /// Re-priced portfolio value.
    pub value: f64,
    /// `value − current_value`.
    pub delta: f64,
    /// Delta as a percentage of current value; 0 when current value ≤ 0.
    pub percent_delta: f64,
}

/// Re-prices `positions` under every shift of `grid`.
///
/// Output follows the grid in ascending order and is recomputed on every
/// call. An empty position list yields zero values and zero percent deltas.
/// Fails on the first position that cannot be re-priced under a shift.
pub fn run_scenarios(
    positions: &[Position],
    grid: &ShiftGrid,
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<ScenarioPoint>> {
    grid.validate()?;

    let current_value = maybe_parallel_fold(
        positions,
        config,
        0.0,
        |acc, p| acc + p.market_value(),
        |a, b| a + b,
    );

    let points = maybe_parallel_map(&grid.shifts(), config, |&shift_bps| {
        let value = positions.iter().try_fold(0.0, |acc, p| {
            p.value_at_shift(f64::from(shift_bps)).map(|v| acc + v)
        })?;
        let delta = value - current_value;
        let percent_delta = if current_value > 0.0 {
            delta / current_value * 100.0
        } else {
            0.0
        };
        Ok(ScenarioPoint {
            shift_bps,
            value,
            delta,
            percent_delta,
        })
    });

    points.into_iter().collect()
}
