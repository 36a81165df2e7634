//! Yield solver configuration.

use bondlens_math::solvers::{
    BisectionSolver, BracketingSolver, BrentSolver, SolverConfig, SolverResult,
};
use bondlens_math::MathResult;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Lowest annualized yield searched by default (-10%).
pub const DEFAULT_LOWER_BOUND: f64 = -0.10;

/// Highest annualized yield searched by default (100%).
pub const DEFAULT_UPPER_BOUND: f64 = 1.00;

/// Default price tolerance, expressed as a fraction of face value.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-8;

/// Default iteration cap for the yield solver.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Root-finding method used for yield solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Brent's method (bisection + secant + inverse quadratic interpolation).
    #[default]
    Brent,
    /// Plain bisection.
    Bisection,
}

impl SolverMethod {
    /// Runs the selected solver over `[a, b]`.
    pub fn solve<F>(self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            SolverMethod::Brent => BrentSolver.solve(f, a, b, config),
            SolverMethod::Bisection => BisectionSolver.solve(f, a, b, config),
        }
    }
}

/// Settings controlling how yield-to-maturity is solved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolverSettings {
    /// Lower end of the yield search bracket (annualized, decimal).
    pub lower_bound: f64,
    /// Upper end of the yield search bracket (annualized, decimal).
    pub upper_bound: f64,
    /// Price tolerance as a fraction of face value.
    pub relative_tolerance: f64,
    /// Maximum solver iterations.
    pub max_iterations: u32,
    /// Root-finding method.
    pub method: SolverMethod,
}

impl Default for YieldSolverSettings {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            method: SolverMethod::Brent,
        }
    }
}

impl YieldSolverSettings {
    /// Creates settings with the default bracket and tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the yield search bracket.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sets the relative price tolerance.
    #[must_use]
    pub fn with_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.method = method;
        self
    }

    /// Checks the bracket and tolerances are usable.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.lower_bound.is_finite()
            || !self.upper_bound.is_finite()
            || self.lower_bound >= self.upper_bound
        {
            return Err(AnalyticsError::InvalidSettings(format!(
                "yield bracket [{}, {}] must be finite and increasing",
                self.lower_bound, self.upper_bound
            )));
        }
        if !(self.relative_tolerance.is_finite() && self.relative_tolerance > 0.0) {
            return Err(AnalyticsError::InvalidSettings(format!(
                "relative tolerance must be positive (got {})",
                self.relative_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(AnalyticsError::InvalidSettings(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the solver configuration for a bond with the given face value.
    #[must_use]
    pub fn solver_config(&self, face_value: f64) -> SolverConfig {
        SolverConfig::default()
            .with_tolerance(self.relative_tolerance * face_value)
            .with_max_iterations(self.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = YieldSolverSettings::default();
        assert_eq!(settings.lower_bound, -0.10);
        assert_eq!(settings.upper_bound, 1.00);
        assert_eq!(settings.method, SolverMethod::Brent);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_solver_config_scales_with_face() {
        let config = YieldSolverSettings::default().solver_config(1000.0);
        assert!((config.tolerance - 1e-5).abs() < 1e-18);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_validate_rejects_inverted_bracket() {
        let settings = YieldSolverSettings::new().with_bounds(0.5, 0.1);
        assert!(matches!(
            settings.validate(),
            Err(AnalyticsError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let settings = YieldSolverSettings::new().with_max_iterations(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_serde_partial() {
        let parsed: YieldSolverSettings =
            serde_json::from_str(r#"{"method": "bisection", "max_iterations": 60}"#).unwrap();
        assert_eq!(parsed.method, SolverMethod::Bisection);
        assert_eq!(parsed.max_iterations, 60);
        assert_eq!(parsed.lower_bound, DEFAULT_LOWER_BOUND);
    }

    #[test]
    fn test_method_dispatch() {
        let config = SolverConfig::default();
        let f = |x: f64| x - 0.25;
        for method in [SolverMethod::Brent, SolverMethod::Bisection] {
            let result = method.solve(f, 0.0, 1.0, &config).unwrap();
            assert!((result.root - 0.25).abs() < 1e-9);
        }
    }
}
