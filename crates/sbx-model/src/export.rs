//! Export container formats and report sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Container format of an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook, one sheet per section.
    #[default]
    Xlsx,
    /// CSV of the S-box with hex row/column headers.
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(ModelError::UnknownExportFormat(other.to_string())),
        }
    }
}

/// A part of the report that can be included in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportSection {
    /// The affine matrix.
    Matrix,
    /// The substitution table.
    Sbox,
    /// The metric set.
    Analysis,
}

impl ExportSection {
    /// All sections, in report order.
    pub const ALL: [Self; 3] = [Self::Matrix, Self::Sbox, Self::Analysis];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Sbox => "sbox",
            Self::Analysis => "analysis",
        }
    }
}

impl fmt::Display for ExportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportSection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "matrix" => Ok(Self::Matrix),
            "sbox" | "table" => Ok(Self::Sbox),
            "analysis" => Ok(Self::Analysis),
            other => Err(ModelError::UnknownExportSection(other.to_string())),
        }
    }
}
