//! Dimension checks.

use sbx_ingest::Grid;

use crate::error::ShapeError;

/// Checks that `grid` is exactly `order` rows of `order` cells.
///
/// Row count is checked before any row width, so a grid with both problems
/// reports the row count.
pub(crate) fn check_shape(grid: &Grid, order: usize) -> Result<(), ShapeError> {
    if grid.len() != order {
        return Err(ShapeError::RowCount {
            expected: order,
            found: grid.len(),
        });
    }

    for (index, row) in grid.rows().iter().enumerate() {
        if row.len() != order {
            return Err(ShapeError::RowWidth {
                row: index + 1,
                expected: order,
                found: row.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_ingest::Cell;

    fn grid(widths: &[usize]) -> Grid {
        Grid::from_rows(
            widths
                .iter()
                .map(|&w| vec![Cell::Number(0.0); w])
                .collect(),
        )
    }

    #[test]
    fn test_square_grid_passes() {
        assert!(check_shape(&grid(&[3, 3, 3]), 3).is_ok());
    }

    #[test]
    fn test_row_count_reported_first() {
        let err = check_shape(&grid(&[3, 2]), 3).unwrap_err();
        assert_eq!(
            err,
            ShapeError::RowCount {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_short_row_is_one_indexed() {
        let err = check_shape(&grid(&[3, 3, 4]), 3).unwrap_err();
        assert_eq!(
            err,
            ShapeError::RowWidth {
                row: 3,
                expected: 3,
                found: 4
            }
        );
    }
}
