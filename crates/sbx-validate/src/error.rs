//! Validation diagnostics.
//!
//! Every diagnostic pinpoints where the grid went wrong: row and column
//! numbers are 1-indexed, and value errors carry the raw cell text.

use std::fmt;

use thiserror::Error;

/// The grid does not have the expected dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Wrong number of (non-blank) rows.
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    /// A row has the wrong number of cells.
    #[error("row {row}: expected {expected} columns, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The value rule a cell failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainRule {
    /// Matrix cells: exactly 0 or 1.
    Binary,
    /// Table cells: an integer in 0..=255.
    Byte,
}

impl fmt::Display for DomainRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("0 or 1"),
            Self::Byte => f.write_str("an integer from 0 to 255"),
        }
    }
}

/// A cell holds a value outside the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}, column {column}: expected {rule}, found {}", display_raw(.value))]
pub struct DomainError {
    /// 1-indexed row.
    pub row: usize,
    /// 1-indexed column.
    pub column: usize,
    /// The raw cell value as it appeared in the file.
    pub value: String,
    pub rule: DomainRule,
}

fn display_raw(value: &str) -> String {
    if value.is_empty() {
        "an empty cell".to_string()
    } else {
        format!("\"{value}\"")
    }
}

/// Why a grid could not become a typed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Binary matrix is singular over GF(2) (only with `require_invertible`).
    #[error("matrix must be invertible (rank {order}), found rank {rank}")]
    NotInvertible { rank: usize, order: usize },
}

impl ValidationError {
    /// One-shot message for the upload control.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Shape(_) => format!("Wrong dimensions: {self}."),
            Self::Domain(_) => format!("Invalid value at {self}."),
            Self::NotInvertible { .. } => format!("Matrix rejected: {self}."),
        }
    }
}

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
