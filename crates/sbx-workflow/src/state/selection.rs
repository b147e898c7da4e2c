//! The active input artifact.
//!
//! A selection holds at most one artifact: a predefined reference, an
//! uploaded matrix or an uploaded S-box. The single optional field makes
//! holding two at once unrepresentable; every operation below also keeps the
//! artifact consistent with the selection mode.

use sbx_client::ExportSource;
use sbx_model::{AffineConstant, ArtifactRef, BinaryMatrix, SubstitutionTable};

use crate::error::ExportError;

/// Which kind of input the user is working with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// A matrix from the service's catalogue.
    #[default]
    Predefined,
    /// A file uploaded by the user.
    Custom,
}

/// The artifact currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedArtifact {
    Predefined(String),
    UploadedMatrix {
        matrix: BinaryMatrix,
        source_name: String,
    },
    UploadedTable {
        table: SubstitutionTable,
        source_name: String,
    },
}

impl SelectedArtifact {
    /// The mode this artifact belongs to.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Predefined(_) => SelectionMode::Predefined,
            Self::UploadedMatrix { .. } | Self::UploadedTable { .. } => SelectionMode::Custom,
        }
    }
}

/// Selection mode, active artifact and affine constant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    mode: SelectionMode,
    artifact: Option<SelectedArtifact>,
    constant: AffineConstant,
}

impl Selection {
    /// An empty selection using `constant` for matrix-based artifacts.
    #[must_use]
    pub fn with_constant(constant: AffineConstant) -> Self {
        Self {
            constant,
            ..Self::default()
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Selects a catalogue entry, dropping any upload.
    pub fn choose_predefined(&mut self, id: impl Into<String>) {
        self.mode = SelectionMode::Predefined;
        self.artifact = Some(SelectedArtifact::Predefined(id.into()));
    }

    /// Selects an uploaded matrix, dropping any reference or uploaded table.
    pub fn set_uploaded_matrix(&mut self, matrix: BinaryMatrix, source_name: impl Into<String>) {
        self.mode = SelectionMode::Custom;
        self.artifact = Some(SelectedArtifact::UploadedMatrix {
            matrix,
            source_name: source_name.into(),
        });
    }

    /// Selects an uploaded S-box, dropping any reference or uploaded matrix.
    pub fn set_uploaded_table(&mut self, table: SubstitutionTable, source_name: impl Into<String>) {
        self.mode = SelectionMode::Custom;
        self.artifact = Some(SelectedArtifact::UploadedTable {
            table,
            source_name: source_name.into(),
        });
    }

    /// Drops an uploaded artifact. A predefined reference is left alone.
    pub fn clear_upload(&mut self) {
        if matches!(
            self.artifact,
            Some(SelectedArtifact::UploadedMatrix { .. } | SelectedArtifact::UploadedTable { .. })
        ) {
            self.artifact = None;
        }
    }

    pub fn set_constant(&mut self, constant: AffineConstant) {
        self.constant = constant;
    }

    /// Switches mode. Leaving a mode clears the artifact that belonged to it.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode != self.mode {
            self.artifact = None;
            self.mode = mode;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn artifact(&self) -> Option<&SelectedArtifact> {
        self.artifact.as_ref()
    }

    #[must_use]
    pub fn constant(&self) -> AffineConstant {
        self.constant
    }

    #[must_use]
    pub fn has_artifact(&self) -> bool {
        self.artifact.is_some()
    }

    #[must_use]
    pub fn predefined_id(&self) -> Option<&str> {
        match &self.artifact {
            Some(SelectedArtifact::Predefined(id)) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn uploaded_matrix(&self) -> Option<&BinaryMatrix> {
        match &self.artifact {
            Some(SelectedArtifact::UploadedMatrix { matrix, .. }) => Some(matrix),
            _ => None,
        }
    }

    #[must_use]
    pub fn uploaded_table(&self) -> Option<&SubstitutionTable> {
        match &self.artifact {
            Some(SelectedArtifact::UploadedTable { table, .. }) => Some(table),
            _ => None,
        }
    }

    /// Name of the uploaded file, if an upload is selected.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        match &self.artifact {
            Some(
                SelectedArtifact::UploadedMatrix { source_name, .. }
                | SelectedArtifact::UploadedTable { source_name, .. },
            ) => Some(source_name),
            _ => None,
        }
    }

    /// The request variant for the selected artifact.
    ///
    /// The constant only travels with matrix-based artifacts.
    #[must_use]
    pub fn artifact_ref(&self) -> Option<ArtifactRef> {
        let artifact = match self.artifact.as_ref()? {
            SelectedArtifact::Predefined(id) => ArtifactRef::Predefined {
                id: id.clone(),
                constant: self.constant,
            },
            SelectedArtifact::UploadedMatrix { matrix, .. } => ArtifactRef::CustomMatrix {
                matrix: matrix.clone(),
                constant: self.constant,
            },
            SelectedArtifact::UploadedTable { table, .. } => ArtifactRef::CustomTable {
                table: table.clone(),
            },
        };
        Some(artifact)
    }

    /// The export source for the selected artifact.
    pub fn export_source(&self) -> Result<ExportSource, ExportError> {
        match &self.artifact {
            None => Err(ExportError::NothingSelected),
            Some(SelectedArtifact::Predefined(id)) => Ok(ExportSource::Predefined { id: id.clone() }),
            Some(SelectedArtifact::UploadedMatrix { matrix, .. }) => Ok(ExportSource::CustomMatrix {
                matrix: matrix.clone(),
            }),
            Some(SelectedArtifact::UploadedTable { .. }) => Err(ExportError::UnsupportedArtifact),
        }
    }

    /// Whether the selected artifact can be exported.
    #[must_use]
    pub fn exportable(&self) -> bool {
        self.export_source().is_ok()
    }
}
