use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Rows with `TotalSales` strictly above this are labelled high revenue.
pub const DEFAULT_REVENUE_THRESHOLD: f64 = 3000.0;

/// Header names as they appear in the source dataset.
pub const DEFAULT_ORDER_DATE_COLUMN: &str = "OrderDate";
pub const DEFAULT_REGION_COLUMN: &str = "Region";
pub const DEFAULT_PRODUCT_CATEGORY_COLUMN: &str = "ProductCategory";
pub const DEFAULT_UNITS_SOLD_COLUMN: &str = "UnitsSold";
pub const DEFAULT_UNIT_PRICE_COLUMN: &str = "UnitPrice";

/// Tunable parameters for one analysis run. Loadable from a YAML file so the
/// pipeline itself never hard-codes column names or the revenue threshold.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub revenue_threshold: f64,
    pub columns: ColumnNames,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub order_date: String,
    pub region: String,
    pub product_category: String,
    pub units_sold: String,
    pub unit_price: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            revenue_threshold: DEFAULT_REVENUE_THRESHOLD,
            columns: ColumnNames::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            order_date: DEFAULT_ORDER_DATE_COLUMN.to_string(),
            region: DEFAULT_REGION_COLUMN.to_string(),
            product_category: DEFAULT_PRODUCT_CATEGORY_COLUMN.to_string(),
            units_sold: DEFAULT_UNITS_SOLD_COLUMN.to_string(),
            unit_price: DEFAULT_UNIT_PRICE_COLUMN.to_string(),
        }
    }
}

impl ColumnNames {
    /// Required columns in canonical reporting order.
    pub fn required(&self) -> [&str; 5] {
        [
            self.order_date.as_str(),
            self.region.as_str(),
            self.product_category.as_str(),
            self.units_sold.as_str(),
            self.unit_price.as_str(),
        ]
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut raw = String::new();
        File::open(path)
            .with_context(|| format!("Opening config file {path:?}"))?
            .read_to_string(&mut raw)
            .with_context(|| format!("Reading config file {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_dataset() {
        let config = AnalysisConfig::default();
        assert_eq!(config.revenue_threshold, 3000.0);
        assert_eq!(
            config.columns.required(),
            ["OrderDate", "Region", "ProductCategory", "UnitsSold", "UnitPrice"]
        );
    }

    #[test]
    fn partial_yaml_overrides_keep_remaining_defaults() {
        let config: AnalysisConfig =
            serde_yaml::from_str("revenue_threshold: 1500.5\n").expect("parse config");
        assert_eq!(config.revenue_threshold, 1500.5);
        assert_eq!(config.columns.unit_price, "UnitPrice");

        let config: AnalysisConfig =
            serde_yaml::from_str("columns:\n  region: Territory\n").expect("parse config");
        assert_eq!(config.columns.region, "Territory");
        assert_eq!(config.columns.order_date, "OrderDate");
        assert_eq!(config.revenue_threshold, 3000.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = serde_yaml::from_str::<AnalysisConfig>("revenue_treshold: 10\n");
        assert!(parsed.is_err());
    }
}
