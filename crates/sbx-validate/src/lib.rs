//! Shape and value validation for uploaded grids.
//!
//! [`validate`] turns a decoded [`Grid`] into a typed [`Artifact`] or a
//! precise [`ValidationError`]. It is pure: the same grid and kind always
//! produce the same artifact or the same diagnostic.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. Row count equals the artifact order.
//! 2. Every row has exactly `order` cells (first offending row reported).
//! 3. Every cell coerces to an allowed value (first offending cell in
//!    row-major order reported).
//! 4. Optionally, a binary matrix must be invertible over GF(2).
//!
//! # Example
//!
//! ```
//! use sbx_ingest::{Cell, Grid};
//! use sbx_model::ArtifactKind;
//! use sbx_validate::validate;
//!
//! let grid = Grid::from_rows(vec![
//!     vec![Cell::Text("1".into()), Cell::Text("0".into())],
//!     vec![Cell::Text("0".into()), Cell::Text("1".into())],
//! ]);
//! let artifact = validate(&grid, ArtifactKind::Matrix { order: 2 }).unwrap();
//! assert_eq!(artifact.as_matrix().unwrap().rank(), 2);
//! ```

mod checks;
mod error;

pub use error::{DomainError, DomainRule, Result, ShapeError, ValidationError};

use sbx_ingest::Grid;
use sbx_model::{Artifact, ArtifactKind, BinaryMatrix, SubstitutionTable};

use crate::checks::{check_shape, coerce_binary, coerce_byte};

/// Extra checks beyond shape and cell values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Reject binary matrices that are singular over GF(2).
    pub require_invertible: bool,
}

/// Validates a grid against `kind` with default options.
pub fn validate(grid: &Grid, kind: ArtifactKind) -> Result<Artifact> {
    validate_with(grid, kind, ValidateOptions::default())
}

/// Validates a grid against `kind`.
///
/// The returned artifact is freshly allocated and shares nothing with `grid`.
pub fn validate_with(grid: &Grid, kind: ArtifactKind, options: ValidateOptions) -> Result<Artifact> {
    let order = kind.order();
    check_shape(grid, order)?;

    let artifact = match kind {
        ArtifactKind::Matrix { .. } => {
            let rows = coerce_rows(grid, coerce_binary)?;
            // Shape and values are already checked, so construction cannot fail.
            let matrix = BinaryMatrix::new(rows).map_err(|_| ShapeError::RowCount {
                expected: order,
                found: grid.len(),
            })?;

            if options.require_invertible {
                let rank = matrix.rank();
                if rank != order {
                    return Err(ValidationError::NotInvertible { rank, order });
                }
            }
            Artifact::Matrix(matrix)
        }
        ArtifactKind::Table { .. } => {
            let rows = coerce_rows(grid, coerce_byte)?;
            let table = SubstitutionTable::new(rows).map_err(|_| ShapeError::RowCount {
                expected: order,
                found: grid.len(),
            })?;
            Artifact::Table(table)
        }
    };

    tracing::debug!(kind = %kind, "Grid validated");
    Ok(artifact)
}

fn coerce_rows<F>(grid: &Grid, coerce: F) -> Result<Vec<Vec<u8>>>
where
    F: Fn(&sbx_ingest::Cell, usize, usize) -> std::result::Result<u8, DomainError>,
{
    grid.rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| coerce(cell, r, c).map_err(ValidationError::from))
                .collect::<Result<Vec<u8>>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_ingest::Cell;

    fn text_grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| Cell::from_text(s)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_singular_matrix_passes_by_default() {
        let grid = text_grid(&[&["1", "1"], &["1", "1"]]);
        assert!(validate(&grid, ArtifactKind::Matrix { order: 2 }).is_ok());
    }

    #[test]
    fn test_singular_matrix_rejected_when_required() {
        let grid = text_grid(&[&["1", "1"], &["1", "1"]]);
        let options = ValidateOptions {
            require_invertible: true,
        };
        let err = validate_with(&grid, ArtifactKind::Matrix { order: 2 }, options).unwrap_err();
        assert_eq!(err, ValidationError::NotInvertible { rank: 1, order: 2 });
    }

    #[test]
    fn test_table_kind_returns_table() {
        let grid = text_grid(&[&["0", "255"], &["17", "3"]]);
        let artifact = validate(&grid, ArtifactKind::Table { order: 2 }).unwrap();
        assert_eq!(artifact.as_table().unwrap().to_flat(), vec![0, 255, 17, 3]);
    }

    #[test]
    fn test_matrix_kind_rejects_byte_values() {
        let grid = text_grid(&[&["0", "255"], &["1", "0"]]);
        let err = validate(&grid, ArtifactKind::Matrix { order: 2 }).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Domain(DomainError {
                row: 1,
                column: 2,
                ..
            })
        ));
    }
}
