use anyhow::{Context, Result};
use log::info;

use crate::{cli::PreviewArgs, config::AnalysisConfig, data, dataset, io_utils, table};

/// Prints the first rows of the input plus a per-column missing-value count,
/// without running the pipeline. The counts cover the whole file, not just
/// the displayed rows.
pub fn execute(args: &PreviewArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    let indexes = dataset::locate_columns(&headers, &config.columns)?;

    let mut display_rows = Vec::new();
    let mut missing = vec![0usize; headers.len()];
    let mut row_count = 0usize;
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        for (idx, cell) in decoded.iter().enumerate().take(missing.len()) {
            if data::is_missing(cell) {
                missing[idx] += 1;
            }
        }
        if row_idx < args.rows {
            display_rows.push(decoded);
        }
        row_count += 1;
    }

    println!("First {} row(s) of {}:", display_rows.len(), args.input.display());
    table::print_table(&headers, &display_rows);

    println!("\nMissing values ({row_count} row(s) scanned):");
    let missing_rows = headers
        .iter()
        .zip(&missing)
        .map(|(header, count)| vec![header.clone(), count.to_string()])
        .collect::<Vec<_>>();
    table::print_table(&["column".to_string(), "missing".to_string()], &missing_rows);

    info!(
        "Previewed {} of {} row(s); {} missing '{}' value(s)",
        display_rows.len(),
        row_count,
        missing[indexes.unit_price],
        config.columns.unit_price
    );
    Ok(())
}
