//! # Bondlens Math
//!
//! Numerical building blocks for the Bondlens bond analytics workspace.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root-finding algorithms (Brent, Bisection)
//!
//! Both solvers require a sign change over the supplied interval and are
//! bounded by an iteration cap, so a call always terminates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, brent, BisectionSolver, BracketingSolver, BrentSolver, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
