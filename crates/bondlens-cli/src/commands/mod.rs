//! CLI command implementations.

pub mod analyze;
pub mod funds;
pub mod sample;
pub mod validate;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use funds::FundsArgs;
pub use sample::SampleArgs;
pub use validate::ValidateArgs;

use bondlens_validation::ValidationReport;

use crate::output::{print_error, print_warning};

/// Writes every diagnostic to stderr, errors first.
pub fn print_diagnostics(report: &ValidationReport) {
    for error in &report.errors {
        print_error(&error.message);
    }
    for warning in &report.warnings {
        print_warning(&warning.message);
    }
}
