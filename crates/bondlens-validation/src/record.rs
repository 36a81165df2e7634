//! Tabular bond input: columns, raw records and the table that holds them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognised input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    /// `Fund_ID` (optional grouping key).
    #[serde(rename = "Fund_ID")]
    FundId,
    /// `Bond_Name`.
    #[serde(rename = "Bond_Name")]
    BondName,
    /// `Face_Value`.
    #[serde(rename = "Face_Value")]
    FaceValue,
    /// `Coupon_Rate`, in percent.
    #[serde(rename = "Coupon_Rate")]
    CouponRate,
    /// `Years_To_Maturity`.
    #[serde(rename = "Years_To_Maturity")]
    YearsToMaturity,
    /// `Market_Price`.
    #[serde(rename = "Market_Price")]
    MarketPrice,
    /// `Quantity`.
    #[serde(rename = "Quantity")]
    Quantity,
    /// `Frequency` (optional, default 2).
    #[serde(rename = "Frequency")]
    Frequency,
}

impl Column {
    /// Every column in canonical order.
    pub const ALL: [Column; 8] = [
        Column::FundId,
        Column::BondName,
        Column::FaceValue,
        Column::CouponRate,
        Column::YearsToMaturity,
        Column::MarketPrice,
        Column::Quantity,
        Column::Frequency,
    ];

    /// Columns every table must carry.
    pub const REQUIRED: [Column; 6] = [
        Column::BondName,
        Column::FaceValue,
        Column::CouponRate,
        Column::YearsToMaturity,
        Column::MarketPrice,
        Column::Quantity,
    ];

    /// The header text.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::FundId => "Fund_ID",
            Column::BondName => "Bond_Name",
            Column::FaceValue => "Face_Value",
            Column::CouponRate => "Coupon_Rate",
            Column::YearsToMaturity => "Years_To_Maturity",
            Column::MarketPrice => "Market_Price",
            Column::Quantity => "Quantity",
            Column::Frequency => "Frequency",
        }
    }

    /// Matches a header exactly; unknown headers give `None`.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == header.trim())
    }

    /// Returns true for required columns.
    #[must_use]
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell that was present but could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// The column of the cell.
    pub column: Column,
    /// The raw cell text.
    pub raw: String,
}

/// One raw input row. Every field is optional so gaps can be diagnosed.
///
/// Numeric fields use input units: `coupon_rate` is in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Fund / grouping key.
    #[serde(rename = "Fund_ID", default)]
    pub fund_id: Option<String>,
    /// Display name.
    #[serde(rename = "Bond_Name", default)]
    pub bond_name: Option<String>,
    /// Face value.
    #[serde(rename = "Face_Value", default)]
    pub face_value: Option<f64>,
    /// Annual coupon in percent (5.0 = 5%).
    #[serde(rename = "Coupon_Rate", default)]
    pub coupon_rate: Option<f64>,
    /// Years to maturity.
    #[serde(rename = "Years_To_Maturity", default)]
    pub years_to_maturity: Option<f64>,
    /// Market price.
    #[serde(rename = "Market_Price", default)]
    pub market_price: Option<f64>,
    /// Quantity held.
    #[serde(rename = "Quantity", default)]
    pub quantity: Option<f64>,
    /// Coupons per year.
    #[serde(rename = "Frequency", default)]
    pub frequency: Option<f64>,
    /// Cells that could not be parsed.
    #[serde(skip)]
    pub issues: Vec<FieldIssue>,
}

impl BondRecord {
    /// Builds a fully populated record.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fund_id: Option<&str>,
        bond_name: &str,
        face_value: f64,
        coupon_rate: f64,
        years_to_maturity: f64,
        market_price: f64,
        quantity: f64,
        frequency: f64,
    ) -> Self {
        Self {
            fund_id: fund_id.map(str::to_string),
            bond_name: Some(bond_name.to_string()),
            face_value: Some(face_value),
            coupon_rate: Some(coupon_rate),
            years_to_maturity: Some(years_to_maturity),
            market_price: Some(market_price),
            quantity: Some(quantity),
            frequency: Some(frequency),
            issues: Vec::new(),
        }
    }

    /// Display label: the bond name, or `Row N` (1-based) when absent.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        match self.bond_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Row {}", index + 1),
        }
    }

    /// Numeric value of a column, if the column is numeric and present.
    #[must_use]
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::FaceValue => self.face_value,
            Column::CouponRate => self.coupon_rate,
            Column::YearsToMaturity => self.years_to_maturity,
            Column::MarketPrice => self.market_price,
            Column::Quantity => self.quantity,
            Column::Frequency => self.frequency,
            Column::FundId | Column::BondName => None,
        }
    }

    /// Returns true if the cell for `column` is missing or blank.
    #[must_use]
    pub fn is_missing(&self, column: Column) -> bool {
        match column {
            Column::FundId => is_blank(self.fund_id.as_deref()),
            Column::BondName => is_blank(self.bond_name.as_deref()),
            numeric => {
                self.number(numeric).is_none() && !self.issues.iter().any(|i| i.column == numeric)
            }
        }
    }

    /// Sets a cell from text. Blank text leaves the field missing; unreadable
    /// numbers are recorded as a [`FieldIssue`].
    pub fn set_text(&mut self, column: Column, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let slot = match column {
            Column::FundId => {
                self.fund_id = Some(text.to_string());
                return;
            }
            Column::BondName => {
                self.bond_name = Some(text.to_string());
                return;
            }
            Column::FaceValue => &mut self.face_value,
            Column::CouponRate => &mut self.coupon_rate,
            Column::YearsToMaturity => &mut self.years_to_maturity,
            Column::MarketPrice => &mut self.market_price,
            Column::Quantity => &mut self.quantity,
            Column::Frequency => &mut self.frequency,
        };
        match text.parse::<f64>() {
            Ok(value) => *slot = Some(value),
            Err(_) => self.issues.push(FieldIssue {
                column,
                raw: text.to_string(),
            }),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Rows plus the set of columns the input actually carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondTable {
    columns: Vec<Column>,
    records: Vec<BondRecord>,
}

impl BondTable {
    /// Creates a table from known columns and records.
    #[must_use]
    pub fn new(columns: Vec<Column>, records: Vec<BondRecord>) -> Self {
        Self { columns, records }
    }

    /// Creates a table that carries every column.
    #[must_use]
    pub fn from_records(records: Vec<BondRecord>) -> Self {
        Self::new(Column::ALL.to_vec(), records)
    }

    /// Builds a table from header names and text rows.
    ///
    /// Unknown headers are ignored. Short rows leave trailing cells missing.
    pub fn from_text_rows<H, R, C>(headers: &[H], rows: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mapping: Vec<Option<Column>> = headers
            .iter()
            .map(|h| Column::from_header(h.as_ref()))
            .collect();
        let mut columns: Vec<Column> = mapping.iter().flatten().copied().collect();
        columns.dedup();

        let records = rows
            .into_iter()
            .map(|row| {
                let mut record = BondRecord::default();
                for (column, cell) in mapping.iter().zip(row) {
                    if let Some(column) = column {
                        record.set_text(*column, cell.as_ref());
                    }
                }
                record
            })
            .collect();

        Self { columns, records }
    }

    /// Columns present in the input.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns true if the input carried `column`.
    #[must_use]
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Required columns absent from the input, in canonical order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<Column> {
        Column::REQUIRED
            .into_iter()
            .filter(|c| !self.has_column(*c))
            .collect()
    }

    /// Records in input order.
    #[must_use]
    pub fn records(&self) -> &[BondRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A copy without the rows at the given 0-based indices.
    #[must_use]
    pub fn without_rows(&self, skip: &std::collections::BTreeSet<usize>) -> Self {
        Self {
            columns: self.columns.clone(),
            records: self
                .records
                .iter()
                .enumerate()
                .filter(|(i, _)| !skip.contains(i))
                .map(|(_, r)| r.clone())
                .collect(),
        }
    }
}
