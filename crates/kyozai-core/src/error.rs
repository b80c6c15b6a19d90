use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KyozaiError {
    #[error("required columns missing from input: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("failed to read worksheet: {0}")]
    WorkbookRead(String),

    #[error("workbook contains no data rows")]
    EmptyWorkbook,

    #[error("failed to load keyword tables from {path}: {reason}")]
    KeywordsLoad { path: PathBuf, reason: String },

    #[error("invalid keyword tables: {0}")]
    KeywordsInvalid(String),

    #[error("no orders found for school '{0}'")]
    SchoolNotFound(String),

    #[error("bulk threshold {0} outside supported range 1..=50")]
    BulkThresholdRange(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
