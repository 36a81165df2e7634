//! Row → terms → position conversion.

use bondlens_analytics::{BondTerms, BondValuation, Frequency, YieldSolverSettings};
use bondlens_portfolio::{maybe_parallel_map, AnalyticsConfig, Portfolio, Position};
use tracing::{info, warn};

use crate::error::{InputError, RowError, RowErrorKind};
use crate::record::{BondRecord, BondTable, Column};

/// Positions built from a table plus the rows that were rejected.
#[derive(Debug, Clone)]
pub struct LoadedPositions {
    /// Valued positions, in row order.
    pub portfolio: Portfolio,
    /// Rows that could not be converted, in row order.
    pub rejected: Vec<RowError>,
}

impl BondRecord {
    /// Converts the record into bond terms.
    ///
    /// The coupon is converted from percent to a fraction and the frequency
    /// defaults to semi-annual.
    pub fn to_terms(&self, index: usize) -> Result<BondTerms, RowError> {
        let label = self.label(index);
        let fail = |kind: RowErrorKind| RowError::new(index, label.clone(), kind);

        if let Some(issue) = self.issues.first() {
            return Err(fail(RowErrorKind::InvalidNumber {
                column: issue.column,
                raw: issue.raw.clone(),
            }));
        }
        let required = |column: Column| {
            self.number(column)
                .ok_or_else(|| fail(RowErrorKind::MissingValue(column)))
        };

        let face_value = required(Column::FaceValue)?;
        let coupon_pct = required(Column::CouponRate)?;
        let years = required(Column::YearsToMaturity)?;
        let market_price = required(Column::MarketPrice)?;
        let frequency = match self.frequency {
            Some(value) => Frequency::from_f64(value).map_err(|e| fail(e.into()))?,
            None => Frequency::default(),
        };

        BondTerms::builder()
            .name(label.clone())
            .maybe_fund_id(self.fund_id.clone())
            .face_value(face_value)
            .coupon_rate(coupon_pct / 100.0)
            .years_to_maturity(years)
            .frequency(frequency)
            .market_price(market_price)
            .build()
            .map_err(|e| fail(e.into()))
    }

    /// Converts and values the record as a position.
    pub fn to_position(
        &self,
        index: usize,
        solver: &YieldSolverSettings,
    ) -> Result<Position, RowError> {
        let terms = self.to_terms(index)?;
        let label = terms.name().to_string();
        let quantity = self.quantity.ok_or_else(|| {
            RowError::new(
                index,
                label.clone(),
                RowErrorKind::MissingValue(Column::Quantity),
            )
        })?;

        let valuation = BondValuation::with_settings(terms, solver)
            .map_err(|e| RowError::new(index, label.clone(), e))?;
        Position::new(valuation, quantity).map_err(|e| RowError::new(index, label, e))
    }
}

/// Checks the batch-level shape of a table.
pub fn check_schema(table: &BondTable) -> Result<(), InputError> {
    let missing = table.missing_required();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns(missing));
    }
    if table.is_empty() {
        return Err(InputError::EmptyDataSet);
    }
    Ok(())
}

/// Values every row independently.
///
/// Schema errors fail the batch. Row failures are collected in
/// [`LoadedPositions::rejected`] and never stop other rows.
pub fn load_positions(
    table: &BondTable,
    config: &AnalyticsConfig,
) -> Result<LoadedPositions, InputError> {
    check_schema(table)?;

    let indexed: Vec<(usize, &BondRecord)> = table.records().iter().enumerate().collect();
    let results = maybe_parallel_map(&indexed, config, |(index, record)| {
        record.to_position(*index, &config.solver)
    });

    let mut positions = Vec::with_capacity(results.len());
    let mut rejected = Vec::new();
    for result in results {
        match result {
            Ok(position) => positions.push(position),
            Err(error) => {
                warn!(row = error.row, %error, "row rejected");
                rejected.push(error);
            }
        }
    }

    info!(
        accepted = positions.len(),
        rejected = rejected.len(),
        "positions loaded"
    );

    Ok(LoadedPositions {
        portfolio: Portfolio::new(positions),
        rejected,
    })
}
