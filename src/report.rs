use std::path::Path;

use log::info;

use crate::{
    aggregate::SummaryRow,
    data::format_number,
    error::{PipelineError, Result},
    io_utils,
};

/// Column order of the exported summary file. No index column is written.
pub const SUMMARY_HEADERS: [&str; 5] = [
    "Region",
    "ProductCategory",
    "Total_Units_Sold",
    "Total_Revenue",
    "Average_Unit_Price",
];

/// Formats one summary row for export and console display alike, so both
/// surfaces show identical figures.
pub fn summary_cells(row: &SummaryRow) -> [String; 5] {
    [
        row.region.clone(),
        row.product_category.clone(),
        row.total_units_sold.to_string(),
        format_number(row.total_revenue),
        format_number(row.average_unit_price),
    ]
}

/// Writes the combined summary to `path` (`-` for stdout). Rows arrive
/// key-sorted from the aggregator, and the formatting is deterministic, so
/// re-running over the same input yields byte-identical output.
pub fn export_summary(path: &Path, rows: &[SummaryRow], delimiter: u8) -> Result<()> {
    let write_error = |source: csv::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    writer.write_record(SUMMARY_HEADERS).map_err(write_error)?;
    for row in rows {
        writer.write_record(summary_cells(row)).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|err| write_error(csv::Error::from(err)))?;
    info!("Wrote {} summary row(s) to {path:?}", rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_row() -> SummaryRow {
        SummaryRow {
            region: "North".to_string(),
            product_category: "Electronics".to_string(),
            total_units_sold: 3,
            total_revenue: 300.0,
            average_unit_price: 100.0,
        }
    }

    #[test]
    fn export_writes_header_and_plain_rows() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("summary.csv");
        export_summary(&path, &[summary_row()], b',').expect("export");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(
            written,
            "Region,ProductCategory,Total_Units_Sold,Total_Revenue,Average_Unit_Price\n\
             North,Electronics,3,300,100\n"
        );
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let err = export_summary(Path::new("/no/such/dir/summary.csv"), &[summary_row()], b',')
            .expect_err("should fail");
        assert!(matches!(err, PipelineError::Write { .. }));
    }

    #[test]
    fn fractional_metrics_keep_four_decimals() {
        let row = SummaryRow {
            average_unit_price: 33.3333333,
            total_revenue: 99.99,
            ..summary_row()
        };
        let cells = summary_cells(&row);
        assert_eq!(cells[3], "99.9900");
        assert_eq!(cells[4], "33.3333");
    }
}
