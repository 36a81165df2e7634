//! Analyze command implementation.
//!
//! Validates a portfolio file, values every bond, aggregates by fund and
//! runs the yield-shift scenarios.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use bondlens_analytics::YieldConfidence;
use bondlens_portfolio::prelude::*;
use bondlens_validation::{load_positions, validate, BondTable, ValidationReport};

use crate::cli::OutputFormat;
use crate::commands::print_diagnostics;
use crate::config::Settings;
use crate::error::CliError;
use crate::input::read_table;
use crate::output::{
    print_header, print_info, print_json, print_table, print_warning, KeyValue, RenderContext,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Bond portfolio CSV file
    pub file: PathBuf,

    /// Only analyze bonds with this Fund_ID
    #[arg(long)]
    pub fund: Option<String>,

    /// First scenario shift in basis points
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i32>,

    /// Last scenario shift in basis points
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<i32>,

    /// Scenario step in basis points
    #[arg(long)]
    pub step: Option<i32>,

    /// Skip rows with validation errors instead of aborting
    #[arg(long)]
    pub allow_invalid: bool,
}

impl AnalyzeArgs {
    /// Command-line shifts override the configured grid field by field.
    pub fn shift_grid(&self, configured: &ShiftGrid) -> PortfolioResult<ShiftGrid> {
        ShiftGrid::new(
            self.start.unwrap_or(configured.start_bps),
            self.end.unwrap_or(configured.end_bps),
            self.step.unwrap_or(configured.step_bps),
        )
    }
}

/// Everything the analysis produces.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Report timestamp.
    pub as_of: DateTime<Utc>,
    /// Fund filter, if any.
    pub fund: Option<String>,
    /// Rows skipped or rejected, with reasons.
    pub skipped: Vec<String>,
    /// Validation warnings.
    pub warnings: Vec<String>,
    /// Per-bond detail.
    pub bonds: Vec<BondMetrics>,
    /// Whole-selection aggregates.
    pub portfolio: PortfolioMetrics,
    /// Aggregates per fund key.
    pub funds: Vec<FundMetrics>,
    /// Scenario grid results.
    pub scenarios: Vec<ScenarioPoint>,
    /// Headline figures.
    pub summary: ExecutiveSummary,
}

/// Values the rows of a table that passed (or skipped) validation and keeps
/// the requested fund. Also returns the rejection reasons of rows that could
/// not be valued.
pub fn select_portfolio(
    table: &BondTable,
    fund: Option<&str>,
    config: &AnalyticsConfig,
) -> Result<(Portfolio, Vec<String>)> {
    let loaded = load_positions(table, config)?;
    let rejected: Vec<String> = loaded.rejected.iter().map(ToString::to_string).collect();

    let selection = FundSelection::from_option(fund);
    let portfolio = loaded.portfolio.for_fund(&selection);
    if portfolio.is_empty() {
        return Err(match fund {
            Some(key) if !loaded.portfolio.is_empty() => {
                CliError::UnknownFund(key.to_string(), loaded.portfolio.funds().join(", ")).into()
            }
            _ => CliError::NoPositions.into(),
        });
    }

    Ok((portfolio, rejected))
}

/// Computes every report section for a selected portfolio.
pub fn build_analysis(
    portfolio: &Portfolio,
    grid: &ShiftGrid,
    config: &AnalyticsConfig,
    as_of: DateTime<Utc>,
) -> PortfolioResult<Analysis> {
    let positions = portfolio.positions();
    let bonds = bond_metrics(positions, config);
    let metrics = aggregate(positions, config);
    let funds = aggregate_by_fund(portfolio, config);
    let scenarios = run_scenarios(positions, grid, config)?;
    let summary = ExecutiveSummary::from_analysis(positions, &metrics, &scenarios, config);

    info!(
        bonds = positions.len(),
        total_value = metrics.total_value,
        duration = metrics.duration,
        "analysis complete"
    );

    Ok(Analysis {
        as_of,
        fund: None,
        skipped: Vec::new(),
        warnings: Vec::new(),
        bonds,
        portfolio: metrics,
        funds,
        scenarios,
        summary,
    })
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, settings: &Settings, ctx: &RenderContext) -> Result<()> {
    let table = read_table(&args.file)?;
    let report = validate(&table, &settings.validation, &settings.analytics);
    print_diagnostics(&report);

    let (table, mut skipped) = select_rows(table, &report, args.allow_invalid)?;
    let grid = args.shift_grid(&settings.scenarios)?;
    let (portfolio, rejected) =
        select_portfolio(&table, args.fund.as_deref(), &settings.analytics)?;
    for reason in &rejected {
        print_warning(&format!("Skipped {reason}"));
    }
    skipped.extend(rejected);

    let mut analysis = build_analysis(&portfolio, &grid, &settings.analytics, ctx.as_of)?;
    analysis.fund = args.fund;
    analysis.skipped = skipped;
    analysis.warnings = report.warning_messages();

    render(&analysis, ctx)
}

fn select_rows(
    table: BondTable,
    report: &ValidationReport,
    allow_invalid: bool,
) -> Result<(BondTable, Vec<String>)> {
    if report.is_valid() {
        return Ok((table, Vec::new()));
    }
    if report.has_schema_error() {
        anyhow::bail!("{}", report.error_messages().join("; "));
    }
    if !allow_invalid {
        return Err(CliError::ValidationFailed(report.errors.len()).into());
    }

    let invalid = report.invalid_rows();
    print_warning(&format!("Skipping {} invalid row(s)", invalid.len()));
    Ok((table.without_rows(&invalid), report.error_messages()))
}

// =============================================================================
// RENDERING
// =============================================================================

#[derive(Tabled)]
struct BondRow {
    #[tabled(rename = "Bond")]
    name: String,
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Mod Dur")]
    modified: String,
    #[tabled(rename = "Mac Dur")]
    macaulay: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
    #[tabled(rename = "DV01")]
    dv01: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl BondRow {
    fn new(bond: &BondMetrics, ctx: &RenderContext) -> Self {
        let mut ytm = ctx.pct(bond.ytm_pct);
        if bond.confidence == YieldConfidence::CouponFallback {
            ytm.push('*');
        }
        Self {
            name: bond.name.clone(),
            fund: bond.fund.clone().unwrap_or_else(|| UNASSIGNED_FUND.to_string()),
            quantity: format!("{}", bond.quantity),
            price: format!("{:.2}", bond.market_price),
            ytm,
            modified: ctx.num(bond.modified_duration),
            macaulay: ctx.num(bond.macaulay_duration),
            convexity: ctx.num(bond.convexity),
            dv01: ctx.num(bond.dv01),
            value: ctx.money(bond.position_value),
        }
    }
}

#[derive(Tabled)]
struct FundRow {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Bonds")]
    bonds: usize,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
    #[tabled(rename = "DV01")]
    dv01: String,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Shift (bps)")]
    shift: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Change")]
    delta: String,
    #[tabled(rename = "Change %")]
    percent: String,
}

fn scenario_row(point: &ScenarioPoint, ctx: &RenderContext) -> ScenarioRow {
    ScenarioRow {
        shift: format!("{:+}", point.shift_bps),
        value: ctx.money(point.value),
        delta: ctx.money(point.delta),
        percent: format!("{:+.2}%", point.percent_delta),
    }
}

fn metric_rows(metrics: &PortfolioMetrics, ctx: &RenderContext) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Bonds", metrics.position_count.to_string()),
        KeyValue::new("Total Value", ctx.money(metrics.total_value)),
        KeyValue::new("Modified Duration", ctx.num(metrics.duration)),
        KeyValue::new("Convexity", ctx.num(metrics.convexity)),
        KeyValue::new("DV01", ctx.money(metrics.dv01)),
    ]
}

fn summary_rows(summary: &ExecutiveSummary, ctx: &RenderContext) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Bonds", summary.bond_count.to_string()),
        KeyValue::new("Total Value", ctx.money(summary.total_value)),
        KeyValue::new("Average YTM", ctx.pct(summary.average_ytm_pct)),
        KeyValue::new("Duration", ctx.num(summary.duration)),
        KeyValue::new("Interest Rate Risk", summary.duration_risk.to_string()),
        KeyValue::new("DV01", ctx.money(summary.dv01)),
    ];
    for point in &summary.headline_impacts {
        rows.push(KeyValue::new(
            format!("Impact {:+} bps", point.shift_bps),
            format!("{} ({:+.2}%)", ctx.money(point.delta), point.percent_delta),
        ));
    }
    rows.push(KeyValue::new("1-Day VaR (95%)", ctx.money(summary.one_day_var_95)));
    rows.push(KeyValue::new(
        "Hedging Suggested",
        if summary.hedging_suggested { "Yes" } else { "No" },
    ));
    rows
}

fn render(analysis: &Analysis, ctx: &RenderContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(analysis),
        OutputFormat::Csv => ctx.print_records(&analysis.bonds, |b| BondRow::new(b, ctx)),
        OutputFormat::Table => {
            let title = match &analysis.fund {
                Some(fund) => format!("Bond Portfolio Analysis: {fund}"),
                None => "Bond Portfolio Analysis".to_string(),
            };
            print_header(&title);
            print_info(&format!("As of {}", analysis.as_of.format("%Y-%m-%d %H:%M:%S UTC")));

            print_header("Bonds");
            ctx.print_records(&analysis.bonds, |b| BondRow::new(b, ctx))?;
            if analysis.bonds.iter().any(|b| b.confidence == YieldConfidence::CouponFallback) {
                print_info("* yield could not be solved; coupon rate used");
            }

            print_header("Portfolio");
            print_table(&metric_rows(&analysis.portfolio, ctx));

            if analysis.fund.is_none() && analysis.funds.len() > 1 {
                print_header("Funds");
                let rows: Vec<FundRow> = analysis
                    .funds
                    .iter()
                    .map(|f| FundRow {
                        fund: f.fund.clone(),
                        bonds: f.metrics.position_count,
                        value: ctx.money(f.metrics.total_value),
                        duration: ctx.num(f.metrics.duration),
                        convexity: ctx.num(f.metrics.convexity),
                        dv01: ctx.money(f.metrics.dv01),
                    })
                    .collect();
                print_table(&rows);
            }

            print_header("Yield Shift Scenarios");
            let rows: Vec<ScenarioRow> =
                analysis.scenarios.iter().map(|p| scenario_row(p, ctx)).collect();
            print_table(&rows);

            print_header("Executive Summary");
            print_table(&summary_rows(&analysis.summary, ctx));
            if analysis.summary.hedging_suggested {
                print_info("Duration above 5: consider hedging interest-rate exposure");
            }
            Ok(())
        }
    }
}
