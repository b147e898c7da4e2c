//! Raw cell grids produced by decoding.

use std::fmt;

/// A single untyped cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value (blank CSV field or empty sheet cell).
    Empty,
    /// A numeric spreadsheet cell.
    Number(f64),
    /// Any other value, as text.
    Text(String),
}

impl Cell {
    /// Builds a cell from raw text, treating whitespace-only text as empty.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Coerces the cell to a finite number.
    ///
    /// Text is parsed as a decimal number after trimming. Empty cells,
    /// non-numeric text, NaN and infinities yield `None`.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Self::Empty => return None,
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Ordered rows of raw cells.
///
/// Rows whose cells are all empty are removed at construction, so trailing
/// blank lines in a source file never reach validation. Rows may still have
/// different widths; the validator reports that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid, dropping blank rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let total = rows.len();
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .filter(|row| !row.iter().all(Cell::is_empty))
            .collect();

        let dropped = total - rows.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped blank rows");
        }

        Self { rows }
    }

    /// Number of (non-blank) rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}
