//! Per-cell value coercion.

use sbx_ingest::Cell;

use crate::error::{DomainError, DomainRule};

/// Coerces a matrix cell: the numeric value must be exactly 0 or 1.
pub(crate) fn coerce_binary(cell: &Cell, row: usize, column: usize) -> Result<u8, DomainError> {
    match cell.to_number() {
        Some(v) if v == 0.0 => Ok(0),
        Some(v) if v == 1.0 => Ok(1),
        _ => Err(reject(cell, row, column, DomainRule::Binary)),
    }
}

/// Coerces a table cell: the numeric value must be an integer in 0..=255.
pub(crate) fn coerce_byte(cell: &Cell, row: usize, column: usize) -> Result<u8, DomainError> {
    match cell.to_number() {
        Some(v) if v.fract() == 0.0 && (0.0..=255.0).contains(&v) => Ok(v as u8),
        _ => Err(reject(cell, row, column, DomainRule::Byte)),
    }
}

/// Builds the diagnostic for zero-based `(row, column)`.
fn reject(cell: &Cell, row: usize, column: usize, rule: DomainRule) -> DomainError {
    DomainError {
        row: row + 1,
        column: column + 1,
        value: cell.to_string(),
        rule,
    }
}
