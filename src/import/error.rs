use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("unsupported file type: {} (expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read workbook {}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {} has no sheets", .path.display())]
    NoSheets { path: PathBuf },

    #[error("failed to read CSV file {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column(s): {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("row {line}: column '{column}' is empty")]
    EmptyCell { line: usize, column: &'static str },

    #[error("row {line}: correct choice '{value}' is not a number")]
    InvalidCorrectChoice { line: usize, value: String },

    #[error("row {line}: correct choice {value} is outside 1..=4")]
    CorrectChoiceOutOfRange { line: usize, value: i64 },

    #[error("row {line}: failed to store the question")]
    Store {
        line: usize,
        #[source]
        source: StoreError,
    },

    #[error("import transaction failed")]
    Transaction(#[from] StoreError),
}

pub type ImportResult<T> = Result<T, ImportError>;
