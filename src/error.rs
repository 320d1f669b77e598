use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Error type covering the different failure cases that can occur while the
/// reviewer loads budgets, extracts subawards, or emits the report.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Wrapper for IO failures such as opening budgets or talking to the console.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of the report fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook opens but has no usable first worksheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the operator does not provide a folder path.
    #[error("You must enter a path to the folder containing the Subaward Budgets.")]
    MissingFolderPath,

    /// Raised when the operator provides a folder that does not exist.
    #[error("The path you entered does not exist: {}", .0.display())]
    FolderNotFound(PathBuf),

    /// Raised when a subaward row is found before the "Total" column is known.
    #[error("{file}: subaward on row {row} appears before any \"Total\" column marker")]
    MissingTotalColumn { file: String, row: usize },

    /// Raised when the amount in the total column is not a decimal number.
    #[error("{file}: invalid amount '{value}' on row {row}")]
    InvalidAmount {
        file: String,
        row: usize,
        value: String,
    },

    /// Raised when a running total no longer fits the amount type.
    #[error("total for '{0}' is too large to represent")]
    AmountOverflow(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ReviewError {
    /// Returns `true` for the operator input problems that end the run
    /// cleanly instead of failing it.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ReviewError::MissingFolderPath | ReviewError::FolderNotFound(_)
        )
    }
}
