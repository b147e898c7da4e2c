//! Error types for model construction.

use thiserror::Error;

/// Errors raised when building a model value from raw data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Rows do not form an N×N square.
    #[error("expected a {order}x{order} grid, found {rows} rows with a row of width {width}")]
    NotSquare {
        order: usize,
        rows: usize,
        width: usize,
    },

    /// A matrix cell is not 0 or 1.
    #[error("matrix cell [{row},{column}] must be 0 or 1, found {value}")]
    NotBinary { row: usize, column: usize, value: u8 },

    /// The constant is not a one-byte hex value.
    #[error("invalid affine constant '{input}': expected two hex digits (00-FF)")]
    InvalidConstant { input: String },

    /// Unknown export format name.
    #[error("unknown export format '{0}' (expected xlsx or csv)")]
    UnknownExportFormat(String),

    /// Unknown export section name.
    #[error("unknown export section '{0}' (expected matrix, sbox, or analysis)")]
    UnknownExportSection(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
