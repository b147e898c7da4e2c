//! Byte substitution tables (S-boxes).

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Order of the substitution tables used by the analysis service (16×16 = 256 entries).
pub const TABLE_ORDER: usize = 16;

/// An M×M table of bytes, read row-major as a lookup table.
///
/// Cell range is guaranteed by the `u8` element type. Uniqueness of values is
/// *not* required; use [`SubstitutionTable::is_bijective`] to check it.
///
/// # Example
///
/// ```
/// use sbx_model::SubstitutionTable;
///
/// let identity = SubstitutionTable::identity();
/// assert_eq!(identity.lookup(0x53), Some(0x53));
/// assert_eq!(identity.fixed_points().len(), 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct SubstitutionTable {
    rows: Vec<Vec<u8>>,
}

impl SubstitutionTable {
    /// Builds a table from rows, checking squareness.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self> {
        let order = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != order) {
            return Err(ModelError::NotSquare {
                order,
                rows: order,
                width: bad.len(),
            });
        }
        Ok(Self { rows })
    }

    /// The 16×16 identity table (`S[x] = x`).
    #[must_use]
    pub fn identity() -> Self {
        let rows = (0..TABLE_ORDER)
            .map(|r| {
                (0..TABLE_ORDER)
                    .map(|c| u8::try_from(r * TABLE_ORDER + c).unwrap_or(u8::MAX))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    /// Borrow the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Row-major flattening of the table.
    #[must_use]
    pub fn to_flat(&self) -> Vec<u8> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Value stored at flat `index`.
    #[must_use]
    pub fn lookup(&self, index: usize) -> Option<u8> {
        let order = self.order();
        if order == 0 {
            return None;
        }
        self.rows.get(index / order)?.get(index % order).copied()
    }

    /// Indices whose value equals the index itself.
    #[must_use]
    pub fn fixed_points(&self) -> Vec<usize> {
        self.to_flat()
            .into_iter()
            .enumerate()
            .filter(|&(index, value)| index == usize::from(value))
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether the table is a permutation of 0..=255.
    #[must_use]
    pub fn is_bijective(&self) -> bool {
        let flat = self.to_flat();
        if flat.len() != 256 {
            return false;
        }
        let mut seen = [false; 256];
        for value in flat {
            let slot = &mut seen[usize::from(value)];
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }
}

impl TryFrom<Vec<Vec<u8>>> for SubstitutionTable {
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<SubstitutionTable> for Vec<Vec<u8>> {
    fn from(table: SubstitutionTable) -> Self {
        table.rows
    }
}
