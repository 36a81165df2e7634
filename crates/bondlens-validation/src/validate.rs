//! Completeness and plausibility checks run before any bond is valued.
//!
//! Schema problems stop validation with a single table-level error. Row
//! checks are independent: each row collects its own errors and warnings,
//! and the yield plausibility check runs only for rows without errors.

use bondlens_analytics::{BondValuation, Frequency};
use bondlens_portfolio::{maybe_parallel_map, AnalyticsConfig};
use tracing::debug;

use crate::error::{InputError, RowErrorKind};
use crate::record::{BondRecord, BondTable, Column};
use crate::report::{Diagnostic, Severity, ValidationReport};
use crate::settings::ValidationSettings;

/// Message used when the table has no `Fund_ID` column.
pub const NO_FUND_COLUMN_WARNING: &str =
    "Fund_ID column not found. All bonds will be treated as a single portfolio.";

/// Validates a bond table.
///
/// # Example
///
/// ```rust
/// use bondlens_portfolio::AnalyticsConfig;
/// use bondlens_validation::{validate, BondRecord, BondTable, ValidationSettings};
///
/// let table = BondTable::from_records(vec![BondRecord::new(
///     None, "Bad", -100.0, 5.0, 5.0, 1000.0, 1.0, 2.0,
/// )]);
/// let report = validate(&table, &ValidationSettings::default(), &AnalyticsConfig::default());
///
/// assert!(!report.is_valid());
/// assert!(report.errors[0].message.contains("Face Value must be positive"));
/// ```
#[must_use]
pub fn validate(
    table: &BondTable,
    settings: &ValidationSettings,
    config: &AnalyticsConfig,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    let missing = table.missing_required();
    if !missing.is_empty() {
        let error = InputError::MissingColumns(missing);
        report.push(Diagnostic::table(Severity::Error, error.to_string()));
        return report;
    }

    if !table.has_column(Column::FundId) {
        report.push(Diagnostic::table(Severity::Warning, NO_FUND_COLUMN_WARNING));
    }

    if table.is_empty() {
        report.push(Diagnostic::table(
            Severity::Error,
            InputError::EmptyDataSet.to_string(),
        ));
        return report;
    }

    let indexed: Vec<(usize, &BondRecord)> = table.records().iter().enumerate().collect();
    let per_row = maybe_parallel_map(&indexed, config, |(index, record)| {
        RowCheck::new(*index, record, settings, config).run()
    });
    for diagnostics in per_row {
        report.extend(diagnostics);
    }

    debug!(
        rows = table.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

struct RowCheck<'a> {
    index: usize,
    label: String,
    record: &'a BondRecord,
    settings: &'a ValidationSettings,
    config: &'a AnalyticsConfig,
    found: Vec<Diagnostic>,
}

impl<'a> RowCheck<'a> {
    fn new(
        index: usize,
        record: &'a BondRecord,
        settings: &'a ValidationSettings,
        config: &'a AnalyticsConfig,
    ) -> Self {
        Self {
            index,
            label: record.label(index),
            record,
            settings,
            config,
            found: Vec::new(),
        }
    }

    fn error(&mut self, message: impl std::fmt::Display) {
        self.found
            .push(Diagnostic::row(self.index, Severity::Error, &self.label, message));
    }

    fn warning(&mut self, message: impl std::fmt::Display) {
        self.found
            .push(Diagnostic::row(self.index, Severity::Warning, &self.label, message));
    }

    fn has_errors(&self) -> bool {
        self.found.iter().any(|d| d.severity == Severity::Error)
    }

    fn run(mut self) -> Vec<Diagnostic> {
        self.check_completeness();
        self.check_face_value();
        self.check_coupon();
        self.check_maturity();
        self.check_price();
        self.check_quantity();
        self.check_frequency();
        if !self.has_errors() {
            self.check_yield();
        }
        self.found
    }

    fn check_completeness(&mut self) {
        for column in Column::REQUIRED {
            if self.record.is_missing(column) {
                self.error(format_args!("Missing value for {column}"));
            }
        }
        for issue in &self.record.issues {
            let message = format!("Invalid number for {} ({})", issue.column, issue.raw);
            self.found
                .push(Diagnostic::row(self.index, Severity::Error, &self.label, message));
        }
    }

    fn check_face_value(&mut self) {
        let Some(face) = self.record.face_value else {
            return;
        };
        if face <= 0.0 || face.is_nan() {
            self.error(format_args!("Face Value must be positive (got {face})"));
        } else if face > self.settings.max_face_value {
            self.warning(format_args!(
                "Face Value seems unusually high (${})",
                group_thousands(face)
            ));
        }
    }

    fn check_coupon(&mut self) {
        let Some(coupon) = self.record.coupon_rate else {
            return;
        };
        if coupon < 0.0 || coupon.is_nan() {
            self.error(format_args!("Coupon Rate cannot be negative (got {coupon}%)"));
        } else if coupon > self.settings.max_coupon_pct {
            self.warning(format_args!("Coupon Rate seems unusually high ({coupon}%)"));
        }
    }

    fn check_maturity(&mut self) {
        let Some(years) = self.record.years_to_maturity else {
            return;
        };
        if years <= 0.0 || years.is_nan() {
            self.error(format_args!(
                "Years to Maturity must be positive (got {years})"
            ));
        } else if years > self.settings.max_maturity_years {
            self.error(format_args!(
                "Years to Maturity seems unrealistic (got {years} years)"
            ));
        } else if years > self.settings.long_maturity_years {
            self.warning(format_args!("Years to Maturity is very long ({years} years)"));
        }
    }

    fn check_price(&mut self) {
        let (Some(price), Some(face)) = (self.record.market_price, self.record.face_value) else {
            return;
        };
        if price <= 0.0 || price.is_nan() {
            self.error(format_args!("Market Price must be positive (got ${price})"));
            return;
        }
        if face <= 0.0 {
            return;
        }
        let ratio = price / face;
        if ratio < self.settings.min_price_ratio {
            self.warning(format_args!(
                "Trading at extreme discount ({:.1}% of face value)",
                ratio * 100.0
            ));
        } else if ratio > self.settings.max_price_ratio {
            self.warning(format_args!(
                "Trading at extreme premium ({:.1}% of face value)",
                ratio * 100.0
            ));
        }
    }

    fn check_quantity(&mut self) {
        let Some(quantity) = self.record.quantity else {
            return;
        };
        if quantity <= 0.0 || quantity.is_nan() {
            self.error(format_args!("Quantity must be positive (got {quantity})"));
        } else if quantity.is_infinite() {
            self.error(format_args!("Quantity must be finite (got {quantity})"));
        } else if quantity.fract() != 0.0 {
            self.warning(format_args!("Quantity is not a whole number ({quantity})"));
        }
    }

    fn check_frequency(&mut self) {
        let Some(frequency) = self.record.frequency else {
            return;
        };
        if Frequency::from_f64(frequency).is_err() {
            self.error(
                "Frequency must be 1 (annual), 2 (semi-annual), 4 (quarterly), or 12 (monthly)",
            );
        }
    }

    fn check_yield(&mut self) {
        let valuation = self
            .record
            .to_terms(self.index)
            .map_err(|e| e.kind.to_string())
            .and_then(|terms| {
                BondValuation::with_settings(terms, &self.config.solver)
                    .map_err(|e| RowErrorKind::from(e).to_string())
            });

        let bond = match valuation {
            Ok(bond) => bond,
            Err(message) => {
                self.error(message);
                return;
            }
        };

        if bond.is_low_confidence() {
            self.warning(format_args!(
                "Could not solve YTM at the market price; using coupon rate ({:.2}%)",
                bond.ytm() * 100.0
            ));
        }

        let ytm = bond.ytm();
        if ytm < self.settings.min_ytm {
            self.warning(format_args!(
                "Calculated YTM is negative ({:.2}%)",
                ytm * 100.0
            ));
        } else if ytm > self.settings.max_ytm {
            self.warning(format_args!(
                "Calculated YTM is very high ({:.2}%)",
                ytm * 100.0
            ));
        }
    }
}

/// Inserts comma thousands separators into a run of ASCII digits.
///
/// `"2500000"` → `"2,500,000"`.
#[must_use]
pub fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a value with comma thousands separators and no decimals.
fn group_thousands(value: f64) -> String {
    let grouped = group_digits(&format!("{:.0}", value.abs()));
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
