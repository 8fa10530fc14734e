use std::collections::BTreeMap;

use crate::features::SalesRecord;

/// Summed `TotalSales` for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSales {
    pub region: String,
    pub total_sales: f64,
}

/// Summed `UnitsSold` for one product category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUnits {
    pub product_category: String,
    pub units_sold: u64,
}

/// One row of the combined `(Region, ProductCategory)` summary. Groups with no
/// matching rows are absent; the pivot is where zero-filling happens.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub region: String,
    pub product_category: String,
    pub total_units_sold: u64,
    pub total_revenue: f64,
    pub average_unit_price: f64,
}

/// Output order for all three reductions is sorted by group key, so repeated
/// runs over the same input render and export identically.
pub fn sales_by_region(rows: &[SalesRecord]) -> Vec<RegionSales> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.region.as_str()).or_insert(0.0) += row.total_sales;
    }
    totals
        .into_iter()
        .map(|(region, total_sales)| RegionSales {
            region: region.to_string(),
            total_sales,
        })
        .collect()
}

pub fn units_by_category(rows: &[SalesRecord]) -> Vec<CategoryUnits> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.product_category.as_str()).or_insert(0) += row.units_sold;
    }
    totals
        .into_iter()
        .map(|(product_category, units_sold)| CategoryUnits {
            product_category: product_category.to_string(),
            units_sold,
        })
        .collect()
}

#[derive(Default)]
struct GroupAccumulator {
    units: u64,
    revenue: f64,
    price_sum: f64,
    row_count: usize,
}

pub fn region_category_summary(rows: &[SalesRecord]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<(&str, &str), GroupAccumulator> = BTreeMap::new();
    for row in rows {
        let group = groups
            .entry((row.region.as_str(), row.product_category.as_str()))
            .or_default();
        group.units += row.units_sold;
        group.revenue += row.total_sales;
        group.price_sum += row.unit_price;
        group.row_count += 1;
    }
    groups
        .into_iter()
        .map(|((region, product_category), group)| SummaryRow {
            region: region.to_string(),
            product_category: product_category.to_string(),
            total_units_sold: group.units,
            total_revenue: group.revenue,
            average_unit_price: group.price_sum / group.row_count as f64,
        })
        .collect()
}

/// Grand total of `TotalSales` across the whole table; the conservation
/// anchor the grouped sums and the pivot are checked against.
pub fn grand_total_sales(rows: &[SalesRecord]) -> f64 {
    rows.iter().map(|row| row.total_sales).sum()
}
