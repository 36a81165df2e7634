//! Root-finding algorithms.
//!
//! This module provides bracketing solvers for finding roots of
//! one-dimensional equations:
//!
//! - [`brent`]: Robust method combining bisection, secant, and inverse quadratic
//! - [`bisection`]: Simple and reliable bracketing method
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use bondlens_math::solvers::{brent, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let result = brent(price_fn, -0.10, 1.00, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);  // YTM > coupon rate for discount bond
//! ```

mod bisection;
mod brent;

pub use bisection::bisection;
pub use brent::brent;

use crate::error::{MathError, MathResult};

/// Default residual tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default tolerance on the width of the bracketing interval.
pub const DEFAULT_X_TOLERANCE: f64 = 1e-14;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on `|f(x)|`.
    pub tolerance: f64,
    /// Convergence threshold on the width of the bracket.
    pub x_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            x_tolerance: DEFAULT_X_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the bracket-width tolerance.
    #[must_use]
    pub fn with_x_tolerance(mut self, x_tolerance: f64) -> Self {
        self.x_tolerance = x_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Trait for solvers that search a sign-changing interval `[a, b]`.
///
/// # Example
///
/// ```rust
/// use bondlens_math::solvers::{BracketingSolver, BrentSolver, SolverConfig};
///
/// let solver = BrentSolver;
/// let result = solver.solve(|x| x * x - 2.0, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait BracketingSolver: Send + Sync {
    /// Solves for a root of `f` inside `[a, b]`.
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Brent's method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl BracketingSolver for BrentSolver {
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        brent(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl BracketingSolver for BisectionSolver {
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Evaluates both endpoints and checks that they bracket a root.
///
/// Returns `(f(a), f(b))` on success.
pub(crate) fn evaluate_bracket<F>(f: &F, a: f64, b: f64) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() || a >= b {
        return Err(MathError::invalid_input(format!(
            "bracket [{a}, {b}] must be finite with a < b"
        )));
    }

    let fa = f(a);
    if !fa.is_finite() {
        return Err(MathError::NonFiniteValue { x: a });
    }
    let fb = f(b);
    if !fb.is_finite() {
        return Err(MathError::NonFiniteValue { x: b });
    }

    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    Ok((fa, fb))
}
