//! Artifact kinds, catalogue entries, and request variants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constant::AffineConstant;
use crate::matrix::{BinaryMatrix, MATRIX_ORDER};
use crate::table::{SubstitutionTable, TABLE_ORDER};

/// The shape an uploaded grid is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// N×N binary matrix.
    Matrix { order: usize },
    /// M×M byte substitution table.
    Table { order: usize },
}

impl ArtifactKind {
    /// 8×8 affine matrix.
    #[must_use]
    pub const fn matrix() -> Self {
        Self::Matrix {
            order: MATRIX_ORDER,
        }
    }

    /// 16×16 substitution table.
    #[must_use]
    pub const fn table() -> Self {
        Self::Table { order: TABLE_ORDER }
    }

    /// Expected number of rows and columns.
    #[must_use]
    pub const fn order(&self) -> usize {
        match self {
            Self::Matrix { order } | Self::Table { order } => *order,
        }
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Matrix { .. } => "affine matrix",
            Self::Table { .. } => "S-box",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order();
        write!(f, "{order}x{order} {}", self.label())
    }
}

/// A validated, fully typed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Matrix(BinaryMatrix),
    Table(SubstitutionTable),
}

impl Artifact {
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Matrix(m) => ArtifactKind::Matrix { order: m.order() },
            Self::Table(t) => ArtifactKind::Table { order: t.order() },
        }
    }

    #[must_use]
    pub fn as_matrix(&self) -> Option<&BinaryMatrix> {
        match self {
            Self::Matrix(m) => Some(m),
            Self::Table(_) => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&SubstitutionTable> {
        match self {
            Self::Table(t) => Some(t),
            Self::Matrix(_) => None,
        }
    }
}

/// Which S-box the analysis service should build or use.
///
/// Exactly one source is named, so a request can never carry an
/// inconsistent combination of id, matrix, and table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactRef {
    /// A catalogue matrix, combined with `constant`.
    Predefined { id: String, constant: AffineConstant },
    /// An uploaded matrix, combined with `constant`.
    CustomMatrix {
        matrix: BinaryMatrix,
        constant: AffineConstant,
    },
    /// An uploaded table, analyzed as-is.
    CustomTable { table: SubstitutionTable },
}

impl ArtifactRef {
    /// Short label for logs and report headers.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Predefined { id, constant } => format!("{id} (constant {constant})"),
            Self::CustomMatrix { constant, .. } => format!("custom matrix (constant {constant})"),
            Self::CustomTable { .. } => "custom S-box".to_string(),
        }
    }

    /// The constant, when the source is matrix-based.
    #[must_use]
    pub fn constant(&self) -> Option<AffineConstant> {
        match self {
            Self::Predefined { constant, .. } | Self::CustomMatrix { constant, .. } => {
                Some(*constant)
            }
            Self::CustomTable { .. } => None,
        }
    }
}

/// Catalogue entry for a predefined matrix (matrix data withheld).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub has_matrix: bool,
}

/// Full details of a predefined matrix.
///
/// `matrix` is absent for placeholder entries that have no data yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub matrix: Option<BinaryMatrix>,
    #[serde(default)]
    pub constant: Option<AffineConstant>,
}

fn default_status() -> String {
    "placeholder".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        assert_eq!(ArtifactKind::matrix().order(), 8);
        assert_eq!(ArtifactKind::table().order(), 16);
        assert_eq!(ArtifactKind::table().to_string(), "16x16 S-box");
    }

    #[test]
    fn test_summary_deserializes_service_payload() {
        let json = r#"{"id":"k44","name":"K44","author":null,"tags":["paper"],"status":"ready","hasMatrix":true}"#;
        let summary: ArtifactSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, "k44");
        assert!(summary.has_matrix);
        assert_eq!(summary.tags, vec!["paper"]);
    }

    #[test]
    fn test_detail_placeholder_has_no_matrix() {
        let json = r#"{"id":"x","name":"X","matrix":null,"constant":null}"#;
        let detail: ArtifactDetail = serde_json::from_str(json).unwrap();
        assert!(detail.matrix.is_none());
        assert_eq!(detail.status, "placeholder");
    }

    #[test]
    fn test_ref_constant_only_for_matrix_sources() {
        let table = ArtifactRef::CustomTable {
            table: SubstitutionTable::identity(),
        };
        assert_eq!(table.constant(), None);

        let predefined = ArtifactRef::Predefined {
            id: "aes".to_string(),
            constant: AffineConstant::AES,
        };
        assert_eq!(predefined.constant(), Some(AffineConstant::AES));
        assert_eq!(predefined.label(), "aes (constant 63)");
    }
}
