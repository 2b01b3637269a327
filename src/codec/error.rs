/// Errors that can occur during container I/O
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during dataset encoding
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error serializing manifest or attribute JSON
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A group handle that this sink never issued
    #[error("unknown group handle {0}")]
    UnknownGroup(usize),

    /// Write attempted after the sink was closed
    #[error("container sink is closed")]
    Closed,
}
