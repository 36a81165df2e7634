//! A valued bond held in some quantity.

use bondlens_analytics::{BondValuation, BASIS_POINT};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// A (valuation, quantity) pair.
///
/// Quantity must be positive and finite; it need not be integral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    valuation: BondValuation,
    quantity: f64,
}

impl Position {
    /// Creates a position, rejecting non-positive or non-finite quantities.
    pub fn new(valuation: BondValuation, quantity: f64) -> PortfolioResult<Self> {
        if !(quantity.is_finite() && quantity > 0.0) {
            return Err(PortfolioError::invalid_position(
                valuation.name(),
                format!("quantity must be positive (got {quantity})"),
            ));
        }
        Ok(Self {
            valuation,
            quantity,
        })
    }

    /// The bond valuation.
    #[must_use]
    pub fn valuation(&self) -> &BondValuation {
        &self.valuation
    }

    /// Number of bonds held.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Bond name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.valuation.name()
    }

    /// Fund key, if any.
    #[must_use]
    pub fn fund_id(&self) -> Option<&str> {
        self.valuation.terms().fund_id()
    }

    /// `market_price × quantity`.
    #[must_use]
    pub fn market_value(&self) -> f64 {
        self.valuation.market_price() * self.quantity
    }

    /// `dv01 × quantity`.
    #[must_use]
    pub fn position_dv01(&self) -> f64 {
        self.valuation.dv01() * self.quantity
    }

    /// Position value with the bond re-priced at its yield plus `shift_bps`.
    ///
    /// Fails when the shifted periodic yield reaches -100% or the re-priced
    /// value is not finite.
    pub fn value_at_shift(&self, shift_bps: f64) -> PortfolioResult<f64> {
        let shifted = self.valuation.ytm() + shift_bps * BASIS_POINT;
        let growth = 1.0 + shifted / self.valuation.terms().frequency().as_f64();
        if growth <= 0.0 || growth.is_nan() {
            return Err(PortfolioError::scenario_failed(
                self.name(),
                shift_bps,
                format!("shifted yield {:.2}% leaves no positive discount base", shifted * 100.0),
            ));
        }

        let value = self.valuation.price_at_shift(shift_bps) * self.quantity;
        if !value.is_finite() {
            return Err(PortfolioError::scenario_failed(
                self.name(),
                shift_bps,
                format!("re-priced value is not finite ({value})"),
            ));
        }
        Ok(value)
    }

    /// Returns a copy holding `factor` times the quantity.
    pub fn scaled(&self, factor: f64) -> PortfolioResult<Self> {
        Self::new(self.valuation.clone(), self.quantity * factor)
    }
}
