mod common;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

use common::{SAMPLE_SUMMARY, TestWorkspace};

fn sales_report() -> Command {
    Command::cargo_bin("sales-report").expect("binary exists")
}

#[test]
fn analyze_exports_the_grouped_summary_and_prints_insights() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_sample();
    let output = workspace.path().join("summary.csv");

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(
            contains("Total sales by region:")
                .and(contains("Grouped summary:"))
                .and(contains("Revenue pivot (region x category):"))
                .and(contains("Best performing region: South with revenue 3600"))
                .and(contains("Best selling category: Furniture with 45 units sold")),
        );

    let written = std::fs::read_to_string(&output).expect("read summary");
    assert_eq!(written, SAMPLE_SUMMARY);
}

#[test]
fn analyze_reports_the_imputed_median() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_sample();

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(workspace.path().join("summary.csv"))
        .assert()
        .success()
        .stdout(contains("Filled 1 row(s) with median price 90"));
}

#[test]
fn repeated_runs_produce_byte_identical_output() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_sample();
    let first = workspace.path().join("first.csv");
    let second = workspace.path().join("second.csv");

    for output in [&first, &second] {
        sales_report()
            .args(["analyze", "--quiet", "-i"])
            .arg(&input)
            .arg("-o")
            .arg(output)
            .assert()
            .success();
    }

    let first_bytes = std::fs::read(&first).expect("first run output");
    let second_bytes = std::fs::read(&second).expect("second run output");
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn quiet_suppresses_tables_but_still_exports() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_sample();
    let output = workspace.path().join("summary.csv");

    sales_report()
        .args(["analyze", "--quiet", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Grouped summary:").not());

    assert!(output.exists());
}

#[test]
fn summary_can_stream_to_stdout() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_sample();

    sales_report()
        .args(["analyze", "--quiet", "-i"])
        .arg(&input)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout(contains(
            "Region,ProductCategory,Total_Units_Sold,Total_Revenue,Average_Unit_Price",
        ));
}

#[test]
fn missing_required_column_fails_with_a_schema_message() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "sales.csv",
        "OrderDate,Region,UnitsSold,UnitPrice\n2024-01-01,North,2,10\n",
    );

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("required column 'ProductCategory'"));
}

#[test]
fn unparsable_date_fails_with_the_row_number() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "sales.csv",
        "OrderDate,Region,ProductCategory,UnitsSold,UnitPrice\n\
         2024-01-01,North,Electronics,2,10\n\
         mid-January,North,Electronics,1,10\n",
    );

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("row 3").and(contains("OrderDate")));
}

#[test]
fn all_missing_prices_fail_instead_of_propagating_nan() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "sales.csv",
        "OrderDate,Region,ProductCategory,UnitsSold,UnitPrice\n\
         2024-01-01,North,Electronics,2,\n\
         2024-01-02,South,Furniture,1,NA\n",
    );

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("cannot impute 'UnitPrice'"));
}

#[test]
fn absent_input_file_fails_cleanly() {
    let workspace = TestWorkspace::new();
    sales_report()
        .args(["analyze", "-i"])
        .arg(workspace.path().join("nope.csv"))
        .assert()
        .failure()
        .stderr(contains("cannot open input file"));
}

#[test]
fn config_file_overrides_threshold_and_column_names() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "sales.csv",
        "Date,Territory,Line,Qty,Price\n\
         2024-03-01,EMEA,Gadgets,10,400\n\
         2024-03-02,APAC,Gadgets,1,5\n",
    );
    let config = workspace.write(
        "config.yml",
        "revenue_threshold: 1000\n\
         columns:\n  \
         order_date: Date\n  \
         region: Territory\n  \
         product_category: Line\n  \
         units_sold: Qty\n  \
         unit_price: Price\n",
    );
    let output = workspace.path().join("summary.csv");

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(
            contains("Best performing region: EMEA with revenue 4000")
                .and(contains("High Revenue"))
                .and(contains("Standard Revenue")),
        );

    let written = std::fs::read_to_string(&output).expect("read summary");
    assert!(written.starts_with("Region,ProductCategory,"));
    assert!(written.contains("EMEA,Gadgets,10,4000,400"));
}

#[test]
fn high_threshold_demotes_every_row_to_standard_revenue() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_sample();
    let config = workspace.write("config.yml", "revenue_threshold: 100000\n");

    sales_report()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(workspace.path().join("summary.csv"))
        .assert()
        .success()
        .stdout(contains("High Revenue").not());
}
