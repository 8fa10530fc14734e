use itertools::Itertools;

use crate::{data::format_number, features::SalesRecord};

/// `Region x ProductCategory` cross-tabulation of summed `TotalSales`.
/// Labels are the sorted distinct values observed in the table; combinations
/// with no matching rows hold an explicit 0 rather than being absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub regions: Vec<String>,
    pub categories: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl PivotTable {
    pub fn build(rows: &[SalesRecord]) -> Self {
        let regions = rows
            .iter()
            .map(|row| row.region.clone())
            .sorted()
            .dedup()
            .collect_vec();
        let categories = rows
            .iter()
            .map(|row| row.product_category.clone())
            .sorted()
            .dedup()
            .collect_vec();

        let mut cells = vec![vec![0.0; categories.len()]; regions.len()];
        for row in rows {
            // Both lookups are over sorted label vectors built from the same
            // rows, so they always hit.
            if let Ok(region_idx) = regions.binary_search(&row.region)
                && let Ok(category_idx) = categories.binary_search(&row.product_category)
            {
                cells[region_idx][category_idx] += row.total_sales;
            }
        }
        PivotTable {
            regions,
            categories,
            cells,
        }
    }

    pub fn cell(&self, region: &str, category: &str) -> Option<f64> {
        let region_idx = self.regions.iter().position(|r| r == region)?;
        let category_idx = self.categories.iter().position(|c| c == category)?;
        Some(self.cells[region_idx][category_idx])
    }

    pub fn grand_total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Header row and body rows for the console table renderer: one leading
    /// region column, then one column per category.
    pub fn render_rows(&self, region_header: &str) -> (Vec<String>, Vec<Vec<String>>) {
        let mut headers = Vec::with_capacity(self.categories.len() + 1);
        headers.push(region_header.to_string());
        headers.extend(self.categories.iter().cloned());

        let rows = self
            .regions
            .iter()
            .zip(&self.cells)
            .map(|(region, row)| {
                let mut cells = Vec::with_capacity(row.len() + 1);
                cells.push(region.clone());
                cells.extend(row.iter().map(|value| format_number(*value)));
                cells
            })
            .collect();
        (headers, rows)
    }
}
