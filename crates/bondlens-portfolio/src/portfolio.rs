//! Ordered position collection with fund partitioning.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Fund key used for positions without one when grouping by fund.
pub const UNASSIGNED_FUND: &str = "Unassigned";

/// Which positions to include when filtering by fund.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundSelection {
    /// Every position.
    #[default]
    All,
    /// Positions whose fund key equals the given value.
    Fund(String),
}

impl FundSelection {
    /// Builds a selection from an optional fund key.
    #[must_use]
    pub fn from_option(fund: Option<&str>) -> Self {
        fund.map_or(Self::All, |f| Self::Fund(f.to_string()))
    }

    /// Returns true if the position belongs to this selection.
    #[must_use]
    pub fn matches(&self, position: &Position) -> bool {
        match self {
            Self::All => true,
            Self::Fund(key) => position.fund_id() == Some(key.as_str()),
        }
    }
}

/// An ordered collection of positions.
///
/// Aggregates are never stored here; see [`crate::aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Creates a portfolio from positions, keeping their order.
    #[must_use]
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Appends a position.
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Positions in insertion order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Distinct fund keys, sorted.
    #[must_use]
    pub fn funds(&self) -> Vec<String> {
        self.positions
            .iter()
            .filter_map(Position::fund_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of funds; a portfolio without fund keys counts as one.
    #[must_use]
    pub fn fund_count(&self) -> usize {
        self.funds().len().max(1)
    }

    /// Positions matching `selection`, in original order.
    ///
    /// An unknown fund yields an empty portfolio.
    #[must_use]
    pub fn for_fund(&self, selection: &FundSelection) -> Portfolio {
        Portfolio::new(
            self.positions
                .iter()
                .filter(|p| selection.matches(p))
                .cloned()
                .collect(),
        )
    }

    /// Splits positions by fund key; keyless positions go under [`UNASSIGNED_FUND`].
    #[must_use]
    pub fn partition_by_fund(&self) -> BTreeMap<String, Portfolio> {
        let mut groups: BTreeMap<String, Portfolio> = BTreeMap::new();
        for position in &self.positions {
            let key = position.fund_id().unwrap_or(UNASSIGNED_FUND).to_string();
            groups.entry(key).or_default().push(position.clone());
        }
        groups
    }
}

impl FromIterator<Position> for Portfolio {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlens_analytics::{BondTerms, BondValuation};

    fn position(name: &str, fund: Option<&str>) -> Position {
        let terms = BondTerms::builder()
            .name(name)
            .maybe_fund_id(fund.map(str::to_string))
            .face_value(1000.0)
            .coupon_rate(0.05)
            .years_to_maturity(5.0)
            .market_price(1000.0)
            .build()
            .unwrap();
        Position::new(BondValuation::new(terms).unwrap(), 1.0).unwrap()
    }

    fn portfolio() -> Portfolio {
        Portfolio::new(vec![
            position("A1", Some("Fund_B")),
            position("A2", Some("Fund_A")),
            position("A3", None),
            position("A4", Some("Fund_B")),
        ])
    }

    #[test]
    fn test_funds_sorted_and_distinct() {
        let p = portfolio();
        assert_eq!(p.funds(), vec!["Fund_A".to_string(), "Fund_B".to_string()]);
        assert_eq!(p.fund_count(), 2);
    }

    #[test]
    fn test_fund_count_without_keys() {
        let p: Portfolio = vec![position("X", None), position("Y", None)]
            .into_iter()
            .collect();
        assert!(p.funds().is_empty());
        assert_eq!(p.fund_count(), 1);
    }

    #[test]
    fn test_for_fund_keeps_order() {
        let p = portfolio();
        let fund_b = p.for_fund(&FundSelection::Fund("Fund_B".to_string()));
        let names: Vec<_> = fund_b.positions().iter().map(Position::name).collect();
        assert_eq!(names, vec!["A1", "A4"]);

        assert_eq!(p.for_fund(&FundSelection::All).len(), 4);
        assert!(p
            .for_fund(&FundSelection::Fund("Fund_Z".to_string()))
            .is_empty());
    }

    #[test]
    fn test_partition_by_fund() {
        let groups = portfolio().partition_by_fund();
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["Fund_A", "Fund_B", UNASSIGNED_FUND]);
        assert_eq!(groups["Fund_B"].len(), 2);
        assert_eq!(groups[UNASSIGNED_FUND].len(), 1);
    }

    #[test]
    fn test_selection_from_option() {
        assert_eq!(FundSelection::from_option(None), FundSelection::All);
        assert_eq!(
            FundSelection::from_option(Some("Fund_A")),
            FundSelection::Fund("Fund_A".to_string())
        );
    }
}
