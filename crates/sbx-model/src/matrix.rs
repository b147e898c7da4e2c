//! Binary (GF(2)) square matrices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Order of the affine matrices used by the analysis service.
pub const MATRIX_ORDER: usize = 8;

/// An N×N matrix whose cells are all 0 or 1.
///
/// Serialized as a plain nested array (`[[1,0,...],...]`), which is the shape
/// the analysis service expects for `customMatrix`.
///
/// # Example
///
/// ```
/// use sbx_model::BinaryMatrix;
///
/// let identity = BinaryMatrix::identity(8);
/// assert_eq!(identity.order(), 8);
/// assert_eq!(identity.rank(), 8);
/// assert!(identity.is_invertible());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct BinaryMatrix {
    rows: Vec<Vec<u8>>,
}

impl BinaryMatrix {
    /// Builds a matrix from rows, checking squareness and binary cells.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self> {
        let order = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != order) {
            return Err(ModelError::NotSquare {
                order,
                rows: order,
                width: bad.len(),
            });
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value > 1 {
                    return Err(ModelError::NotBinary {
                        row: r + 1,
                        column: c + 1,
                        value,
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// The N×N identity matrix.
    #[must_use]
    pub fn identity(order: usize) -> Self {
        let rows = (0..order)
            .map(|r| (0..order).map(|c| u8::from(r == c)).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at zero-based `(row, column)`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Borrow the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Rank over GF(2), by Gaussian elimination with XOR row operations.
    #[must_use]
    pub fn rank(&self) -> usize {
        let mut work: Vec<Vec<u8>> = self.rows.clone();
        let order = self.order();
        let mut rank = 0;

        for column in 0..order {
            let Some(pivot) = (rank..order).find(|&r| work[r][column] == 1) else {
                continue;
            };
            work.swap(rank, pivot);
            let pivot_row = work[rank].clone();
            for (r, row) in work.iter_mut().enumerate() {
                if r != rank && row[column] == 1 {
                    for (cell, &p) in row.iter_mut().zip(&pivot_row) {
                        *cell ^= p;
                    }
                }
            }
            rank += 1;
        }

        rank
    }

    /// Whether the matrix has full rank over GF(2).
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        self.rank() == self.order()
    }
}

impl TryFrom<Vec<Vec<u8>>> for BinaryMatrix {
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<BinaryMatrix> for Vec<Vec<u8>> {
    fn from(matrix: BinaryMatrix) -> Self {
        matrix.rows
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(u8::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
