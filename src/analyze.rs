use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{info, warn};

use crate::{
    aggregate::{self, CategoryUnits, RegionSales, SummaryRow},
    cli::AnalyzeArgs,
    config::AnalysisConfig,
    data::format_number,
    dataset,
    error::PipelineError,
    features::{self, SalesRecord},
    impute::{self, Imputation},
    insights, io_utils,
    pivot::PivotTable,
    report, table,
};

/// Default summary destination when `-o` is not given.
pub const DEFAULT_SUMMARY_FILE: &str = "sales_summary.csv";

const HEAD_ROWS: usize = 5;

/// Everything one pipeline run produces, before any printing or file output.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub records: Vec<SalesRecord>,
    pub missing_prices: usize,
    pub imputation: Imputation,
    pub sales_by_region: Vec<RegionSales>,
    pub units_by_category: Vec<CategoryUnits>,
    pub summary: Vec<SummaryRow>,
    pub pivot: PivotTable,
}

/// The whole pipeline as a pure function of input path and configuration:
/// load, impute, derive, aggregate, pivot. No console output and no writes
/// happen here; `execute` owns the side effects.
pub fn run_analysis(
    input: &Path,
    config: &AnalysisConfig,
    delimiter: u8,
    encoding: &'static Encoding,
) -> std::result::Result<AnalysisOutcome, PipelineError> {
    let raw = dataset::load_table(input, &config.columns, delimiter, encoding)?;
    let missing_prices = raw.iter().filter(|row| row.unit_price.is_none()).count();
    let (priced, imputation) = impute::fill_missing_prices(raw, &config.columns.unit_price)?;
    let records = features::derive(priced, config.revenue_threshold);

    let sales_by_region = aggregate::sales_by_region(&records);
    let units_by_category = aggregate::units_by_category(&records);
    let summary = aggregate::region_category_summary(&records);
    let pivot = PivotTable::build(&records);

    Ok(AnalysisOutcome {
        missing_prices,
        imputation,
        sales_by_region,
        units_by_category,
        summary,
        pivot,
        records,
    })
}

pub fn execute(args: &AnalyzeArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    info!(
        "Analyzing '{}' (revenue threshold {})",
        args.input.display(),
        config.revenue_threshold
    );

    let outcome = run_analysis(&args.input, &config, delimiter, encoding)
        .with_context(|| format!("Analyzing {:?}", args.input))?;
    if outcome.records.is_empty() {
        warn!("Input has a valid header but no data rows; summaries are empty");
    }

    if !args.quiet {
        print_report(&outcome, &config);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_FILE));
    let output_delimiter = io_utils::resolve_output_delimiter(&output, delimiter);
    report::export_summary(&output, &outcome.summary, output_delimiter)
        .with_context(|| format!("Exporting summary for {:?}", args.input))?;
    info!("Analysis complete. Summary saved to '{}'", output.display());
    Ok(())
}

fn print_report(outcome: &AnalysisOutcome, config: &AnalysisConfig) {
    print_head(outcome, config);
    print_missing_counts(outcome, config);

    println!("\nTotal sales by region:");
    table::print_table(
        &[config.columns.region.clone(), "TotalSales".to_string()],
        &outcome
            .sales_by_region
            .iter()
            .map(|row| vec![row.region.clone(), format_number(row.total_sales)])
            .collect::<Vec<_>>(),
    );

    println!("\nUnits sold by product category:");
    table::print_table(
        &[config.columns.product_category.clone(), "UnitsSold".to_string()],
        &outcome
            .units_by_category
            .iter()
            .map(|row| vec![row.product_category.clone(), row.units_sold.to_string()])
            .collect::<Vec<_>>(),
    );

    println!("\nGrouped summary:");
    table::print_table(
        &report::SUMMARY_HEADERS.map(String::from),
        &outcome
            .summary
            .iter()
            .map(|row| report::summary_cells(row).to_vec())
            .collect::<Vec<_>>(),
    );

    println!("\nRevenue pivot (region x category):");
    let (pivot_headers, pivot_rows) = outcome.pivot.render_rows(&config.columns.region);
    table::print_table(&pivot_headers, &pivot_rows);
    println!();

    match (
        insights::best_region(&outcome.sales_by_region),
        insights::best_category(&outcome.units_by_category),
    ) {
        (Some(region), Some(category)) => {
            println!(
                "Best performing region: {} with revenue {}",
                region.region,
                format_number(region.total_sales)
            );
            println!(
                "Best selling category: {} with {} units sold",
                category.product_category, category.units_sold
            );
        }
        _ => println!("No rows to rank."),
    }
}

fn print_head(outcome: &AnalysisOutcome, config: &AnalysisConfig) {
    let headers = vec![
        config.columns.order_date.clone(),
        config.columns.region.clone(),
        config.columns.product_category.clone(),
        config.columns.units_sold.clone(),
        config.columns.unit_price.clone(),
        "TotalSales".to_string(),
        "Month".to_string(),
        "Year".to_string(),
        "RevenueCategory".to_string(),
    ];
    let rows = outcome
        .records
        .iter()
        .take(HEAD_ROWS)
        .map(|row| {
            vec![
                row.order_date.format("%Y-%m-%d").to_string(),
                row.region.clone(),
                row.product_category.clone(),
                row.units_sold.to_string(),
                format_number(row.unit_price),
                format_number(row.total_sales),
                row.month.to_string(),
                row.year.to_string(),
                row.revenue_category.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    println!("First {} row(s) after cleaning:", rows.len());
    table::print_table(&headers, &rows);
}

fn print_missing_counts(outcome: &AnalysisOutcome, config: &AnalysisConfig) {
    println!("\nMissing values before imputation:");
    let rows = config
        .columns
        .required()
        .iter()
        .map(|column| {
            let missing = if *column == config.columns.unit_price {
                outcome.missing_prices
            } else {
                0
            };
            vec![column.to_string(), missing.to_string()]
        })
        .collect::<Vec<_>>();
    table::print_table(&["column".to_string(), "missing".to_string()], &rows);
    if let Some(median_price) = outcome.imputation.median_price
        && outcome.imputation.filled_rows > 0
    {
        println!(
            "Filled {} row(s) with median price {}",
            outcome.imputation.filled_rows,
            format_number(median_price)
        );
    }
}
