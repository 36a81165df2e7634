//! Bond valuation at the solved yield.
//!
//! A [`BondValuation`] is computed once from a [`BondTerms`] and never
//! mutated. Re-pricing at a new market price means building a new valuation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ensure_finite, AnalyticsError, AnalyticsResult};
use crate::settings::YieldSolverSettings;
use crate::terms::BondTerms;

/// One basis point as a decimal yield.
pub const BASIS_POINT: f64 = 0.0001;

/// How a yield-to-maturity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldConfidence {
    /// The root finder converged on the market price.
    Solved,
    /// The solver failed; the coupon rate stands in for the yield.
    CouponFallback,
}

impl YieldConfidence {
    /// Short label for reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            YieldConfidence::Solved => "solved",
            YieldConfidence::CouponFallback => "coupon fallback",
        }
    }
}

/// Outcome of yield solving, including the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSolution {
    /// Annualized yield-to-maturity as a decimal.
    pub ytm: f64,
    /// Whether `ytm` is a real solve or the coupon-rate fallback.
    pub confidence: YieldConfidence,
    /// Solver iterations used (0 on fallback).
    pub iterations: u32,
}

impl YieldSolution {
    /// Solves the yield for `terms` at its market price, falling back to the
    /// coupon rate when the solver cannot find a root.
    ///
    /// Only invalid solver settings are returned as errors.
    pub fn solve(terms: &BondTerms, settings: &YieldSolverSettings) -> AnalyticsResult<Self> {
        match terms.solve_yield(terms.market_price(), settings) {
            Ok(result) => Ok(Self {
                ytm: result.root,
                confidence: YieldConfidence::Solved,
                iterations: result.iterations,
            }),
            Err(AnalyticsError::YieldSolverFailed(reason)) => {
                warn!(
                    bond = %terms.name(),
                    market_price = terms.market_price(),
                    %reason,
                    "yield solver failed, using coupon rate"
                );
                Ok(Self {
                    ytm: terms.coupon_rate(),
                    confidence: YieldConfidence::CouponFallback,
                    iterations: 0,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Returns true when the yield is the coupon-rate fallback.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.confidence == YieldConfidence::CouponFallback
    }
}

/// Derived valuation of a bond at its own solved yield.
///
/// # Example
///
/// ```rust
/// use bondlens_analytics::{BondTerms, BondValuation, Frequency};
///
/// let terms = BondTerms::builder()
///     .face_value(1000.0)
///     .coupon_rate(0.05)
///     .years_to_maturity(5.0)
///     .frequency(Frequency::Annual)
///     .market_price(1000.0)
///     .build()
///     .unwrap();
///
/// let bond = BondValuation::new(terms).unwrap();
/// assert!((bond.ytm() - 0.05).abs() < 1e-8);
/// assert!((bond.modified_duration() - 4.3295).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondValuation {
    terms: BondTerms,
    yield_solution: YieldSolution,
    coupon_payment: f64,
    macaulay_duration: f64,
    modified_duration: f64,
    convexity: f64,
    dv01: f64,
}

impl BondValuation {
    /// Values a bond with the default solver settings.
    pub fn new(terms: BondTerms) -> AnalyticsResult<Self> {
        Self::with_settings(terms, &YieldSolverSettings::default())
    }

    /// Values a bond with explicit solver settings.
    pub fn with_settings(terms: BondTerms, settings: &YieldSolverSettings) -> AnalyticsResult<Self> {
        let yield_solution = YieldSolution::solve(&terms, settings)?;
        let metrics = RiskMetrics::compute(&terms, yield_solution.ytm)?;

        Ok(Self {
            coupon_payment: terms.coupon_payment(),
            terms,
            yield_solution,
            macaulay_duration: metrics.macaulay,
            modified_duration: metrics.modified,
            convexity: metrics.convexity,
            dv01: metrics.dv01,
        })
    }

    /// The terms this valuation was built from.
    #[must_use]
    pub fn terms(&self) -> &BondTerms {
        &self.terms
    }

    /// Display name of the bond.
    #[must_use]
    pub fn name(&self) -> &str {
        self.terms.name()
    }

    /// Observed market price.
    #[must_use]
    pub fn market_price(&self) -> f64 {
        self.terms.market_price()
    }

    /// Solved yield-to-maturity (annualized, decimal). May be negative.
    #[must_use]
    pub fn ytm(&self) -> f64 {
        self.yield_solution.ytm
    }

    /// Full yield solution including its confidence.
    #[must_use]
    pub fn yield_solution(&self) -> &YieldSolution {
        &self.yield_solution
    }

    /// How the yield was obtained.
    #[must_use]
    pub fn confidence(&self) -> YieldConfidence {
        self.yield_solution.confidence
    }

    /// True when the yield is the coupon-rate fallback rather than a solve.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.yield_solution.is_low_confidence()
    }

    /// Coupon paid each period.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.coupon_payment
    }

    /// Macaulay duration in years.
    #[must_use]
    pub fn macaulay_duration(&self) -> f64 {
        self.macaulay_duration
    }

    /// Modified duration in years.
    #[must_use]
    pub fn modified_duration(&self) -> f64 {
        self.modified_duration
    }

    /// Convexity in years squared.
    #[must_use]
    pub fn convexity(&self) -> f64 {
        self.convexity
    }

    /// Dollar value of one basis point per bond.
    #[must_use]
    pub fn dv01(&self) -> f64 {
        self.dv01
    }

    /// Prices the bond at an arbitrary yield. Used for scenario re-pricing.
    #[must_use]
    pub fn price_at_yield(&self, y: f64) -> f64 {
        self.terms.price_at_yield(y)
    }

    /// Prices the bond at its own yield shifted by `shift_bps` basis points.
    #[must_use]
    pub fn price_at_shift(&self, shift_bps: f64) -> f64 {
        self.price_at_yield(self.ytm() + shift_bps * BASIS_POINT)
    }

    /// Solves the yield for another market price without the fallback.
    pub fn solve_yield(&self, market_price: f64) -> AnalyticsResult<f64> {
        self.terms
            .solve_yield(market_price, &YieldSolverSettings::default())
            .map(|result| result.root)
    }
}

/// Duration, convexity and DV01 at a given yield.
struct RiskMetrics {
    macaulay: f64,
    modified: f64,
    convexity: f64,
    dv01: f64,
}

impl RiskMetrics {
    fn compute(terms: &BondTerms, ytm: f64) -> AnalyticsResult<Self> {
        let freq = terms.frequency().as_f64();
        let y_p = ytm / freq;
        let growth = 1.0 + y_p;
        let price = terms.market_price();

        let mut time_weighted = 0.0;
        let mut curvature = 0.0;
        for (t, cash_flow) in terms.cash_flows() {
            let t = f64::from(t);
            let pv = cash_flow / growth.powf(t);
            time_weighted += t * pv;
            curvature += t * (t + 1.0) * pv;
        }

        let macaulay = ensure_finite("macaulay_duration", time_weighted / price / freq)?;
        let modified = ensure_finite("modified_duration", macaulay / growth)?;
        let convexity = ensure_finite(
            "convexity",
            curvature / (price * growth * growth * freq * freq),
        )?;
        let dv01 = ensure_finite("dv01", modified * price * BASIS_POINT)?;

        Ok(Self {
            macaulay,
            modified,
            convexity,
            dv01,
        })
    }
}
