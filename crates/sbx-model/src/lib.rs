//! Domain types for S-box Studio.
//!
//! This crate provides type-safe representations of the artifacts a
//! researcher works with and the results the analysis service returns:
//!
//! - **Binary matrices**: N×N affine matrices over GF(2) (N = 8 by default)
//! - **Substitution tables**: M×M byte lookup tables (M = 16 by default)
//! - **Affine constants**: the byte added after the affine transform
//! - **Analysis results**: derived tables, metric sets, fixed points
//!
//! # Module Organization
//!
//! - [`matrix`]: [`BinaryMatrix`] and GF(2) rank
//! - [`table`]: [`SubstitutionTable`] and fixed points
//! - [`constant`]: [`AffineConstant`] hex parsing
//! - [`artifact`]: artifact kinds, catalogue entries, request variants
//! - [`analysis`]: metric sets and analysis/image results
//! - [`export`]: export formats and sections
//!
//! Every constructor checks its invariants, so a value of one of these types
//! is always well-formed.

pub mod analysis;
pub mod artifact;
pub mod constant;
pub mod error;
pub mod export;
pub mod matrix;
pub mod table;

pub use analysis::{AnalysisResult, ImageMetrics, MetricSet};
pub use artifact::{Artifact, ArtifactDetail, ArtifactKind, ArtifactRef, ArtifactSummary};
pub use constant::AffineConstant;
pub use error::{ModelError, Result};
pub use export::{ExportFormat, ExportSection};
pub use matrix::{BinaryMatrix, MATRIX_ORDER};
pub use table::{SubstitutionTable, TABLE_ORDER};
