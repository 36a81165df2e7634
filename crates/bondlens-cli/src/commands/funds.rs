//! Funds command implementation.
//!
//! Lists the fund keys of a file with bond counts, total quantity and value.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_portfolio::Portfolio;
use bondlens_validation::load_positions;

use crate::config::Settings;
use crate::input::read_table;
use crate::output::{print_header, print_info, print_warning, RenderContext};

/// Arguments for the funds command.
#[derive(Args, Debug)]
pub struct FundsArgs {
    /// Bond portfolio CSV file
    pub file: PathBuf,
}

/// One fund in the listing.
#[derive(Debug, Clone, Serialize)]
pub struct FundSummary {
    /// Fund key, or "Unassigned".
    pub fund: String,
    /// Number of bonds.
    pub bonds: usize,
    /// Sum of quantities.
    pub total_quantity: f64,
    /// Sum of position values.
    pub total_value: f64,
}

#[derive(Tabled)]
struct FundRow {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Bonds")]
    bonds: usize,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Groups the portfolio by fund key.
pub fn summarize(portfolio: &Portfolio) -> Vec<FundSummary> {
    portfolio
        .partition_by_fund()
        .into_iter()
        .map(|(fund, members)| FundSummary {
            fund,
            bonds: members.len(),
            total_quantity: members.positions().iter().map(|p| p.quantity()).sum(),
            total_value: members.positions().iter().map(|p| p.market_value()).sum(),
        })
        .collect()
}

/// Execute the funds command.
pub fn execute(args: FundsArgs, settings: &Settings, ctx: &RenderContext) -> Result<()> {
    let table = read_table(&args.file)?;
    let loaded = load_positions(&table, &settings.analytics)?;
    for rejected in &loaded.rejected {
        print_warning(&format!("Skipped {rejected}"));
    }

    let funds = summarize(&loaded.portfolio);

    if ctx.is_table() {
        print_header("Funds");
    }
    ctx.print_records(&funds, |f| FundRow {
        fund: f.fund.clone(),
        bonds: f.bonds,
        quantity: format!("{}", f.total_quantity),
        value: ctx.money(f.total_value),
    })?;
    if ctx.is_table() {
        print_info(&format!(
            "{} fund(s), {} bond(s)",
            loaded.portfolio.fund_count(),
            loaded.portfolio.len()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlens_portfolio::AnalyticsConfig;
    use bondlens_validation::sample_table;

    #[test]
    fn test_summarize_sample() {
        let loaded = load_positions(&sample_table(), &AnalyticsConfig::default()).unwrap();
        let funds = summarize(&loaded.portfolio);

        let names: Vec<&str> = funds.iter().map(|f| f.fund.as_str()).collect();
        assert_eq!(names, vec!["Fund_A", "Fund_B", "Fund_C"]);
        assert_eq!(funds[0].bonds, 3);
        assert!((funds[0].total_quantity - 23.0).abs() < 1e-12);
        assert!((funds[1].total_quantity - 33.0).abs() < 1e-12);
        assert_eq!(funds.iter().map(|f| f.bonds).sum::<usize>(), 8);
    }
}
