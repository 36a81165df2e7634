//! # Bondlens Portfolio
//!
//! Portfolio-level aggregation and yield-shift scenarios built on
//! per-bond valuations from `bondlens-analytics`.
//!
//! ## Design Philosophy
//!
//! - **Derived, never stored**: portfolio metrics are pure functions of the
//!   position list, so filtering by fund can never leave stale aggregates
//! - **Config-driven parallelism**: optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use bondlens_analytics::{BondTerms, BondValuation, Frequency};
//! use bondlens_portfolio::prelude::*;
//!
//! let terms = BondTerms::builder()
//!     .name("Treasury 5Y")
//!     .face_value(1000.0)
//!     .coupon_rate(0.05)
//!     .years_to_maturity(5.0)
//!     .frequency(Frequency::Annual)
//!     .market_price(1000.0)
//!     .build()
//!     .unwrap();
//! let position = Position::new(BondValuation::new(terms).unwrap(), 10.0).unwrap();
//! let portfolio = Portfolio::new(vec![position]);
//!
//! let config = AnalyticsConfig::default();
//! let metrics = portfolio.metrics(&config);
//! let scenarios = run_scenarios(portfolio.positions(), &ShiftGrid::default(), &config).unwrap();
//!
//! assert_eq!(scenarios.len(), 17);
//! assert!((metrics.total_value - 10_000.0).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large portfolios

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod metrics;
pub mod parallel;
pub mod portfolio;
pub mod position;
pub mod scenarios;
pub mod summary;

pub use aggregate::{aggregate, aggregate_by_fund, FundMetrics, PortfolioMetrics};
pub use config::AnalyticsConfig;
pub use error::{PortfolioError, PortfolioResult};
pub use metrics::{bond_metrics, BondMetrics};
pub use parallel::{maybe_parallel_fold, maybe_parallel_map};
pub use portfolio::{FundSelection, Portfolio, UNASSIGNED_FUND};
pub use position::Position;
pub use scenarios::{run_scenarios, ScenarioPoint, ShiftGrid, MAX_SHIFT_BPS, MIN_SHIFT_BPS};
pub use summary::{DurationRisk, ExecutiveSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{aggregate, aggregate_by_fund, FundMetrics, PortfolioMetrics};
    pub use crate::config::AnalyticsConfig;
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::metrics::{bond_metrics, BondMetrics};
    pub use crate::portfolio::{FundSelection, Portfolio, UNASSIGNED_FUND};
    pub use crate::position::Position;
    pub use crate::scenarios::{run_scenarios, ScenarioPoint, ShiftGrid};
    pub use crate::summary::{DurationRisk, ExecutiveSummary};
}
