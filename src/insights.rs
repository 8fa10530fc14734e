use crate::aggregate::{CategoryUnits, RegionSales};

/// The region with the highest summed revenue. Ties resolve to the region
/// that sorts first; callers pass key-sorted slices, so the strictly-greater
/// comparison keeps the earliest (lowest-key) contender.
pub fn best_region(rows: &[RegionSales]) -> Option<&RegionSales> {
    rows.iter().fold(None, |best, row| match best {
        Some(current) if row.total_sales <= current.total_sales => best,
        _ => Some(row),
    })
}

/// The category with the highest summed unit count, same tie-break rule.
pub fn best_category(rows: &[CategoryUnits]) -> Option<&CategoryUnits> {
    rows.iter().fold(None, |best, row| match best {
        Some(current) if row.units_sold <= current.units_sold => best,
        _ => Some(row),
    })
}
