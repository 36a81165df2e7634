//! Bisection root-finding algorithm.

use tracing::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{evaluate_bracket, SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if the bracket is invalid.
///
/// # Example
///
/// ```rust
/// use bondlens_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (f_lo, f_hi) = evaluate_bracket(&f, a, b)?;

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut lo = a;
    let mut hi = b;
    let mut f_lo = f_lo;
    let mut mid = (lo + hi) / 2.0;
    let mut f_mid = f_lo;

    for iteration in 0..config.max_iterations {
        mid = (lo + hi) / 2.0;
        f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(MathError::NonFiniteValue { x: mid });
        }

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.x_tolerance {
            trace!(iteration, root = mid, residual = f_mid, "bisection converged");
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    trace!(root = mid, residual = f_mid, "bisection hit iteration cap");
    Err(MathError::convergence_failed(
        config.max_iterations,
        f_mid.abs(),
    ))
}
