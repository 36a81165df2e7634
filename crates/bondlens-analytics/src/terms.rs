//! Static bond terms and the discrete coupon-bond pricing model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bondlens_math::solvers::SolverResult;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::frequency::Frequency;
use crate::settings::YieldSolverSettings;

/// Immutable terms of a fixed-coupon bond together with its observed price.
///
/// Construct through [`BondTerms::builder`]; every accessor returns a value
/// that passed the bound checks in [`BondTermsBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    name: String,
    fund_id: Option<String>,
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    frequency: Frequency,
    market_price: f64,
    periods: u32,
}

impl BondTerms {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::new()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional fund / grouping key.
    #[must_use]
    pub fn fund_id(&self) -> Option<&str> {
        self.fund_id.as_deref()
    }

    /// Face (par) value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate as a fraction (0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity.
    #[must_use]
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Observed market price.
    #[must_use]
    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Number of coupon periods, `round(years × frequency)`.
    #[must_use]
    pub fn periods(&self) -> u32 {
        self.periods
    }

    /// Coupon paid each period: `face × coupon_rate / frequency`.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.face_value * self.coupon_rate / self.frequency.as_f64()
    }

    /// Cash flow paid at period `t` (1-based). The final period includes principal.
    #[must_use]
    pub fn cash_flow(&self, t: u32) -> f64 {
        if t == self.periods {
            self.coupon_payment() + self.face_value
        } else {
            self.coupon_payment()
        }
    }

    /// Iterates `(period, cash_flow)` pairs from the first coupon to maturity.
    pub fn cash_flows(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        (1..=self.periods).map(move |t| (t, self.cash_flow(t)))
    }

    /// Prices the bond at an annualized yield `y`.
    ///
    /// With `y_p = y / frequency` and `n` periods:
    ///
    /// ```text
    /// y_p == 0:  P = n × C + F
    /// otherwise: P = C × (1 − (1+y_p)^−n) / y_p + F × (1+y_p)^−n
    /// ```
    #[must_use]
    pub fn price_at_yield(&self, y: f64) -> f64 {
        let y_p = y / self.frequency.as_f64();
        let n = self.periods as i32;
        let coupon = self.coupon_payment();

        if y_p == 0.0 {
            return f64::from(self.periods) * coupon + self.face_value;
        }

        let discount = (1.0 + y_p).powi(-n);
        coupon * (1.0 - discount) / y_p + self.face_value * discount
    }

    /// Solves for the yield at which [`price_at_yield`](Self::price_at_yield)
    /// equals `market_price`.
    ///
    /// Root-finding runs on `price_at_yield(y) − market_price` over the
    /// configured bracket. Fails when the bracket holds no sign change or the
    /// solver reports an error; no fallback is applied here.
    pub fn solve_yield(
        &self,
        market_price: f64,
        settings: &YieldSolverSettings,
    ) -> AnalyticsResult<SolverResult> {
        settings.validate()?;
        if !(market_price.is_finite() && market_price > 0.0) {
            return Err(AnalyticsError::invalid_terms(
                "market_price",
                format!("must be positive (got {market_price})"),
            ));
        }

        let config = settings.solver_config(self.face_value);
        let objective = |y: f64| self.price_at_yield(y) - market_price;

        let result = settings.method.solve(
            objective,
            settings.lower_bound,
            settings.upper_bound,
            &config,
        )?;

        debug!(
            bond = %self.name,
            ytm = result.root,
            iterations = result.iterations,
            residual = result.residual,
            "yield solved"
        );
        Ok(result)
    }

    /// Returns a copy of these terms re-priced at a new market price.
    ///
    /// Terms are never mutated in place; valuations built on the old terms
    /// stay consistent with the old price.
    pub fn with_market_price(&self, market_price: f64) -> AnalyticsResult<Self> {
        BondTermsBuilder::from(self.clone())
            .market_price(market_price)
            .build()
    }
}

/// Builder for [`BondTerms`].
///
/// # Example
///
/// ```rust
/// use bondlens_analytics::{BondTerms, Frequency};
///
/// let terms = BondTerms::builder()
///     .name("Treasury 5Y")
///     .face_value(1000.0)
///     .coupon_rate(0.05)
///     .years_to_maturity(5.0)
///     .frequency(Frequency::Annual)
///     .market_price(1000.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(terms.periods(), 5);
/// assert_eq!(terms.coupon_payment(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    name: Option<String>,
    fund_id: Option<String>,
    face_value: Option<f64>,
    coupon_rate: Option<f64>,
    years_to_maturity: Option<f64>,
    frequency: Frequency,
    market_price: Option<f64>,
}

impl BondTermsBuilder {
    /// Creates a builder with semi-annual frequency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the fund / grouping key.
    #[must_use]
    pub fn fund_id(mut self, fund_id: impl Into<String>) -> Self {
        self.fund_id = Some(fund_id.into());
        self
    }

    /// Sets or clears the fund / grouping key.
    #[must_use]
    pub fn maybe_fund_id(mut self, fund_id: Option<String>) -> Self {
        self.fund_id = fund_id;
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the annual coupon rate as a fraction (0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(mut self, coupon_rate: f64) -> Self {
        self.coupon_rate = Some(coupon_rate);
        self
    }

    /// Sets the years to maturity.
    #[must_use]
    pub fn years_to_maturity(mut self, years: f64) -> Self {
        self.years_to_maturity = Some(years);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the observed market price.
    #[must_use]
    pub fn market_price(mut self, market_price: f64) -> Self {
        self.market_price = Some(market_price);
        self
    }

    /// Validates the terms and builds a [`BondTerms`].
    pub fn build(self) -> AnalyticsResult<BondTerms> {
        let face_value = self
            .face_value
            .ok_or(AnalyticsError::MissingTerm("face_value"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or(AnalyticsError::MissingTerm("coupon_rate"))?;
        let years_to_maturity = self
            .years_to_maturity
            .ok_or(AnalyticsError::MissingTerm("years_to_maturity"))?;
        let market_price = self
            .market_price
            .ok_or(AnalyticsError::MissingTerm("market_price"))?;

        require_positive("face_value", face_value)?;
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(AnalyticsError::invalid_terms(
                "coupon_rate",
                format!("cannot be negative (got {coupon_rate})"),
            ));
        }
        require_positive("years_to_maturity", years_to_maturity)?;
        require_positive("market_price", market_price)?;

        let raw_periods = (years_to_maturity * self.frequency.as_f64()).round();
        if raw_periods < 1.0 {
            return Err(AnalyticsError::invalid_terms(
                "years_to_maturity",
                format!(
                    "{years_to_maturity} years at {} gives no coupon periods",
                    self.frequency
                ),
            ));
        }
        if raw_periods > f64::from(i32::MAX) {
            return Err(AnalyticsError::invalid_terms(
                "years_to_maturity",
                format!("{years_to_maturity} years gives too many coupon periods"),
            ));
        }

        Ok(BondTerms {
            name: self.name.unwrap_or_else(|| "Bond".to_string()),
            fund_id: self.fund_id.filter(|f| !f.trim().is_empty()),
            face_value,
            coupon_rate,
            years_to_maturity,
            frequency: self.frequency,
            market_price,
            periods: raw_periods as u32,
        })
    }
}

impl From<BondTerms> for BondTermsBuilder {
    fn from(terms: BondTerms) -> Self {
        Self {
            name: Some(terms.name),
            fund_id: terms.fund_id,
            face_value: Some(terms.face_value),
            coupon_rate: Some(terms.coupon_rate),
            years_to_maturity: Some(terms.years_to_maturity),
            frequency: terms.frequency,
            market_price: Some(terms.market_price),
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> AnalyticsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::invalid_terms(
            field,
            format!("must be positive (got {value})"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn five_year_annual(price: f64) -> BondTerms {
        BondTerms::builder()
            .name("5Y")
            .face_value(1000.0)
            .coupon_rate(0.05)
            .years_to_maturity(5.0)
            .frequency(Frequency::Annual)
            .market_price(price)
            .build()
            .unwrap()
    }

    #[test]
    fn test_coupon_and_periods() {
        let terms = BondTerms::builder()
            .face_value(1000.0)
            .coupon_rate(0.06)
            .years_to_maturity(10.0)
            .market_price(1035.66)
            .build()
            .unwrap();

        assert_eq!(terms.frequency(), Frequency::SemiAnnual);
        assert_eq!(terms.periods(), 20);
        assert_relative_eq!(terms.coupon_payment(), 30.0);
        assert_relative_eq!(terms.cash_flow(1), 30.0);
        assert_relative_eq!(terms.cash_flow(20), 1030.0);
        assert_eq!(terms.cash_flows().count(), 20);
        assert_eq!(terms.name(), "Bond");
    }

    #[test]
    fn test_periods_are_rounded() {
        let terms = BondTerms::builder()
            .face_value(100.0)
            .coupon_rate(0.04)
            .years_to_maturity(2.3)
            .frequency(Frequency::Quarterly)
            .market_price(100.0)
            .build()
            .unwrap();

        // 2.3 × 4 = 9.2 → 9
        assert_eq!(terms.periods(), 9);
    }

    #[test]
    fn test_price_at_par_yield() {
        let terms = five_year_annual(1000.0);
        assert_relative_eq!(terms.price_at_yield(0.05), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_price_at_zero_yield() {
        let terms = five_year_annual(1000.0);
        // 5 coupons of 50 plus principal
        assert_relative_eq!(terms.price_at_yield(0.0), 1250.0);
    }

    #[test]
    fn test_price_decreases_with_yield() {
        let terms = five_year_annual(1000.0);
        let mut last = f64::INFINITY;
        for bps in (-1000..=10000).step_by(250) {
            let price = terms.price_at_yield(f64::from(bps) / 10000.0);
            assert!(price < last);
            last = price;
        }
    }

    #[test]
    fn test_solve_yield_par() {
        let terms = five_year_annual(1000.0);
        let result = terms
            .solve_yield(1000.0, &YieldSolverSettings::default())
            .unwrap();
        assert_relative_eq!(result.root, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_solve_yield_no_bracket() {
        let terms = five_year_annual(1000.0);
        // Above the undiscounted cash flows at -10%
        let result = terms.solve_yield(5000.0, &YieldSolverSettings::default());
        assert!(matches!(
            result,
            Err(AnalyticsError::YieldSolverFailed(ref e)) if e.is_invalid_bracket()
        ));
    }

    #[test]
    fn test_solve_yield_rejects_bad_price() {
        let terms = five_year_annual(1000.0);
        assert!(terms
            .solve_yield(0.0, &YieldSolverSettings::default())
            .is_err());
    }

    #[test]
    fn test_builder_rejects_negative_face() {
        let err = BondTerms::builder()
            .face_value(-100.0)
            .coupon_rate(0.05)
            .years_to_maturity(5.0)
            .market_price(100.0)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("face_value"));
        assert!(err.to_string().contains("must be positive (got -100)"));
    }

    #[test]
    fn test_builder_rejects_negative_coupon() {
        let err = BondTerms::builder()
            .face_value(100.0)
            .coupon_rate(-0.01)
            .years_to_maturity(5.0)
            .market_price(100.0)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("coupon_rate"));
    }

    #[test]
    fn test_builder_rejects_zero_periods() {
        let err = BondTerms::builder()
            .face_value(100.0)
            .coupon_rate(0.05)
            .years_to_maturity(0.1)
            .frequency(Frequency::Annual)
            .market_price(100.0)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("years_to_maturity"));
    }

    #[test]
    fn test_builder_missing_term() {
        let err = BondTerms::builder().face_value(100.0).build().unwrap_err();
        assert_eq!(err, AnalyticsError::MissingTerm("coupon_rate"));
    }

    #[test]
    fn test_blank_fund_id_is_dropped() {
        let terms = BondTerms::builder()
            .face_value(100.0)
            .coupon_rate(0.05)
            .years_to_maturity(1.0)
            .market_price(100.0)
            .fund_id("  ")
            .build()
            .unwrap();
        assert_eq!(terms.fund_id(), None);
    }

    #[test]
    fn test_with_market_price_returns_new_terms() {
        let terms = five_year_annual(1000.0);
        let repriced = terms.with_market_price(950.0).unwrap();
        assert_relative_eq!(terms.market_price(), 1000.0);
        assert_relative_eq!(repriced.market_price(), 950.0);
        assert_eq!(repriced.periods(), terms.periods());
        assert!(terms.with_market_price(-1.0).is_err());
    }
}
