//! # Bondlens Validation
//!
//! The tabular input model and the checks that run before any bond is
//! valued.
//!
//! - [`BondTable`] / [`BondRecord`]: raw rows with every field optional
//! - [`validate`]: schema errors, per-row errors and warnings in separate channels
//! - [`load_positions`]: converts rows into valued positions, collecting row failures
//! - [`sample_table`]: the demonstration portfolio
//!
//! ```rust
//! use bondlens_portfolio::AnalyticsConfig;
//! use bondlens_validation::{load_positions, sample_table, validate, ValidationSettings};
//!
//! let table = sample_table();
//! let config = AnalyticsConfig::default();
//!
//! let report = validate(&table, &ValidationSettings::default(), &config);
//! assert!(report.is_valid());
//!
//! let loaded = load_positions(&table, &config).unwrap();
//! assert_eq!(loaded.portfolio.len(), 8);
//! assert!(loaded.rejected.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod convert;
pub mod error;
pub mod record;
pub mod report;
pub mod sample;
pub mod settings;
pub mod validate;

pub use convert::{check_schema, load_positions, LoadedPositions};
pub use error::{InputError, RowError, RowErrorKind};
pub use record::{BondRecord, BondTable, Column, FieldIssue};
pub use report::{Diagnostic, Severity, ValidationReport};
pub use sample::sample_table;
pub use settings::ValidationSettings;
pub use validate::{group_digits, validate, NO_FUND_COLUMN_WARNING};
