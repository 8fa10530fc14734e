use chrono::Datelike;

use crate::impute::PricedRecord;

/// A fully derived analysis row: calendar fields and the revenue label are in
/// place and every monetary column is concrete.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_date: chrono::NaiveDate,
    pub region: String,
    pub product_category: String,
    pub units_sold: u64,
    pub unit_price: f64,
    pub total_sales: f64,
    pub month: u32,
    pub year: i32,
    pub revenue_category: RevenueCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueCategory {
    High,
    Standard,
}

impl RevenueCategory {
    /// The threshold is exclusive: a total of exactly the threshold value is
    /// still standard revenue.
    pub fn classify(total_sales: f64, threshold: f64) -> Self {
        if total_sales > threshold {
            RevenueCategory::High
        } else {
            RevenueCategory::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueCategory::High => "High Revenue",
            RevenueCategory::Standard => "Standard Revenue",
        }
    }
}

impl std::fmt::Display for RevenueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adds `Month`, `Year`, and the revenue label to every row, preserving order.
pub fn derive(rows: Vec<PricedRecord>, revenue_threshold: f64) -> Vec<SalesRecord> {
    rows.into_iter()
        .map(|row| SalesRecord {
            month: row.order_date.month(),
            year: row.order_date.year(),
            revenue_category: RevenueCategory::classify(row.total_sales, revenue_threshold),
            order_date: row.order_date,
            region: row.region,
            product_category: row.product_category,
            units_sold: row.units_sold,
            unit_price: row.unit_price,
            total_sales: row.total_sales,
        })
        .collect()
}
