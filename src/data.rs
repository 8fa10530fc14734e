use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

/// Cell spellings treated as a missing value, matching the leniency of the
/// spreadsheet exports this tool typically ingests.
const MISSING_MARKERS: &[&str] = &["na", "n/a", "nan", "null"];

pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed.to_ascii_lowercase().as_str())
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("cannot parse '{value}' as a date"))
}

/// Unit counts are non-negative by contract, so the parse target is `u64` and
/// a negative cell fails here rather than flowing into the aggregates.
pub fn parse_units(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("cannot parse '{value}' as a non-negative unit count"))
}

pub fn parse_price(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("cannot parse '{value}' as a price"))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(anyhow!("price '{value}' must be a non-negative number"));
    }
    Ok(parsed)
}

/// Render a metric the way the console tables and the summary export both
/// expect: integral values without a fractional part, everything else with at
/// most four decimal places.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
