use thiserror::Error;

/// The file could not be turned into rows: missing, unreadable or with the
/// wrong schema.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: invalid value {value:?} in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("the file has no data rows")]
    Empty,

    #[error("{0}")]
    Malformed(String),
}

/// Fatal startup failures. Per-request validation never produces these.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("data load error: {0}")]
    Load(#[from] LoadError),

    #[error("data integrity error: team codes missing from the reference table: {}", .0.join(", "))]
    Integrity(Vec<String>),
}

