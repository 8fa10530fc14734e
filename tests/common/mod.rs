#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// A sales file covering two regions and two categories, with one missing
/// price (row 3, median-imputed to 90). Per-group expectations:
/// North/Electronics 3 units / 290 revenue, North/Furniture 5 / 100,
/// South/Furniture 40 / 3600.
pub const SAMPLE_SALES: &str = "\
OrderDate,Region,ProductCategory,UnitsSold,UnitPrice
2024-01-15,North,Electronics,2,100
2024-01-20,North,Electronics,1,
2024-02-03,South,Furniture,40,90
2024-02-11,North,Furniture,5,20
";

pub const SAMPLE_SUMMARY: &str = "\
Region,ProductCategory,Total_Units_Sold,Total_Revenue,Average_Unit_Price
North,Electronics,3,290,95
North,Furniture,5,100,20
South,Furniture,40,3600,90
";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes the standard sample sales file and returns its path.
    pub fn write_sample(&self) -> PathBuf {
        self.write("sales.csv", SAMPLE_SALES)
    }
}
