use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the analysis pipeline. Every variant is fatal to the
/// run; the binary surfaces the chain and exits non-zero.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file is missing or unreadable.
    #[error("cannot open input file {path:?}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A required column is absent from the header row.
    #[error("required column '{column}' is missing from the header row")]
    Schema { column: String },
    /// A cell (or a whole record) could not be parsed. `row` is the file row
    /// number, counting the header as row 1.
    #[error("row {row}: {detail}")]
    Format { row: usize, detail: String },
    /// Median imputation is undefined because every value is missing.
    #[error("cannot impute '{column}': no non-missing values to take a median of")]
    Imputation { column: String },
    /// The summary output destination could not be written.
    #[error("cannot write summary to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl PipelineError {
    pub fn format(row: usize, detail: impl Into<String>) -> Self {
        PipelineError::Format {
            row,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
