use log::info;

use crate::{
    dataset::RawRecord,
    error::{PipelineError, Result},
};

/// A row whose price gaps have been filled. From this point on `total_sales`
/// is always `units_sold * unit_price` with a concrete price.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedRecord {
    pub order_date: chrono::NaiveDate,
    pub region: String,
    pub product_category: String,
    pub units_sold: u64,
    pub unit_price: f64,
    pub total_sales: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imputation {
    /// Median of the prices that were present before any replacement.
    /// `None` only for an empty table, where there is nothing to fill.
    pub median_price: Option<f64>,
    /// How many rows had their price filled in.
    pub filled_rows: usize,
}

/// Median of an unordered sample; even-sized samples average the two middle
/// values. `None` on an empty sample.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Replaces every missing `unit_price` with the median of the prices present
/// in the input, then computes `total_sales` for all rows. Fails when there is
/// no observed price at all, rather than letting a NaN ripple through the
/// aggregates.
pub fn fill_missing_prices(
    rows: Vec<RawRecord>,
    price_column: &str,
) -> Result<(Vec<PricedRecord>, Imputation)> {
    if rows.is_empty() {
        return Ok((
            Vec::new(),
            Imputation {
                median_price: None,
                filled_rows: 0,
            },
        ));
    }
    let observed = rows
        .iter()
        .filter_map(|row| row.unit_price)
        .collect::<Vec<_>>();
    let median_price = median(&observed).ok_or_else(|| PipelineError::Imputation {
        column: price_column.to_string(),
    })?;

    let mut filled_rows = 0usize;
    let priced = rows
        .into_iter()
        .map(|row| {
            let unit_price = match row.unit_price {
                Some(price) => price,
                None => {
                    filled_rows += 1;
                    median_price
                }
            };
            PricedRecord {
                total_sales: row.units_sold as f64 * unit_price,
                order_date: row.order_date,
                region: row.region,
                product_category: row.product_category,
                units_sold: row.units_sold,
                unit_price,
            }
        })
        .collect::<Vec<_>>();

    if filled_rows > 0 {
        info!("Filled {filled_rows} missing '{price_column}' value(s) with median {median_price}");
    }
    Ok((
        priced,
        Imputation {
            median_price: Some(median_price),
            filled_rows,
        },
    ))
}
