//! Error types for matrix loading, configuration and report export.

use std::path::PathBuf;

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Primary error type for the benchmark library.
///
/// Kernel shape violations are not represented here: they are programming
/// errors and panic at the call site.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// The coordinate file does not exist.
    #[error("matrix file not found: {}", path.display())]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The coordinate source exists but could not be read.
    #[error("failed to read {origin}: {cause}")]
    FileUnreadable {
        /// File path or reader label.
        origin: String,
        /// Underlying I/O failure.
        #[source]
        cause: std::io::Error,
    },

    /// The header line is missing or is not `rows cols nnz`.
    #[error("malformed header in {origin} at line {line}: {detail}")]
    MalformedHeader {
        /// File path or reader label.
        origin: String,
        /// 1-based line number (0 when the input ended before a header).
        line: usize,
        /// What was wrong with it.
        detail: String,
    },

    /// Shapes that must agree do not.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing the CSV report failed.
    #[error("report export failed: {0}")]
    Export(#[from] csv::Error),

    /// Any other I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
