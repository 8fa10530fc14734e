use std::path::Path;

use chrono::NaiveDate;
use encoding_rs::Encoding;
use log::debug;

use crate::{
    config::ColumnNames,
    data,
    error::{PipelineError, Result},
    io_utils,
};

/// One input row as loaded, before imputation. `unit_price` is the only
/// nullable column in the source schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub order_date: NaiveDate,
    pub region: String,
    pub product_category: String,
    pub units_sold: u64,
    pub unit_price: Option<f64>,
}

/// Positions of the required columns within the header row. Columns are
/// resolved by name, so extra columns and arbitrary ordering are fine.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndexes {
    pub order_date: usize,
    pub region: usize,
    pub product_category: usize,
    pub units_sold: usize,
    pub unit_price: usize,
}

pub fn locate_columns(headers: &[String], columns: &ColumnNames) -> Result<ColumnIndexes> {
    let find = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| PipelineError::Schema {
                column: name.to_string(),
            })
    };
    Ok(ColumnIndexes {
        order_date: find(&columns.order_date)?,
        region: find(&columns.region)?,
        product_category: find(&columns.product_category)?,
        units_sold: find(&columns.units_sold)?,
        unit_price: find(&columns.unit_price)?,
    })
}

/// Reads the whole input into memory, preserving row order. Row numbers in
/// errors count the header as row 1, matching what an editor shows.
pub fn load_table(
    path: &Path,
    columns: &ColumnNames,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Vec<RawRecord>> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .map_err(|err| PipelineError::format(1, err.to_string()))?;
    let indexes = locate_columns(&headers, columns)?;
    debug!("Resolved column indexes: {indexes:?}");

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let row_number = row_idx + 2;
        let record = record
            .map_err(|err| PipelineError::format(row_number, format!("malformed record: {err}")))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .map_err(|err| PipelineError::format(row_number, err.to_string()))?;
        rows.push(parse_record(&decoded, &indexes, columns, row_number)?);
    }
    debug!("Loaded {} row(s) from {path:?}", rows.len());
    Ok(rows)
}

fn parse_record(
    decoded: &[String],
    indexes: &ColumnIndexes,
    columns: &ColumnNames,
    row_number: usize,
) -> Result<RawRecord> {
    let cell = |idx: usize| decoded.get(idx).map(|s| s.as_str()).unwrap_or("");
    let cell_error = |column: &str, err: anyhow::Error| {
        PipelineError::format(row_number, format!("column '{column}': {err}"))
    };

    let order_date = data::parse_naive_date(cell(indexes.order_date).trim())
        .map_err(|err| cell_error(&columns.order_date, err))?;
    let units_raw = cell(indexes.units_sold);
    if data::is_missing(units_raw) {
        return Err(PipelineError::format(
            row_number,
            format!("column '{}': unit count is required", columns.units_sold),
        ));
    }
    let units_sold =
        data::parse_units(units_raw).map_err(|err| cell_error(&columns.units_sold, err))?;
    let region = cell(indexes.region).trim().to_string();
    let product_category = cell(indexes.product_category).trim().to_string();
    for (column, value) in [
        (&columns.region, region.as_str()),
        (&columns.product_category, product_category.as_str()),
    ] {
        // A missing group key would silently drop the row from every
        // aggregate, so reject it here instead.
        if data::is_missing(value) {
            return Err(PipelineError::format(
                row_number,
                format!("column '{column}': value is required"),
            ));
        }
    }
    let price_raw = cell(indexes.unit_price);
    let unit_price = if data::is_missing(price_raw) {
        None
    } else {
        Some(data::parse_price(price_raw).map_err(|err| cell_error(&columns.unit_price, err))?)
    };

    Ok(RawRecord {
        order_date,
        region,
        product_category,
        units_sold,
        unit_price,
    })
}
