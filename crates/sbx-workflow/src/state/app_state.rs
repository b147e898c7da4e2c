//! Application-level state.
//!
//! `AppState` is the root of all state. It is owned by a
//! [`Session`](crate::Session) (or a test) and only changed through
//! [`update`](crate::update).

use sbx_client::{CipherOutput, DownloadedFile};
use sbx_model::{AffineConstant, ArtifactDetail, ArtifactSummary, ImageMetrics};
use sbx_validate::ValidateOptions;

use super::report::{ExportOptions, Report, TableView};
use super::selection::Selection;
use super::workflow::Workflow;
use crate::error::WorkflowError;

/// A file produced by the service, with the name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl SavedFile {
    /// Uses the service's file name when it sent one.
    pub(crate) fn from_download(download: DownloadedFile, fallback: &str) -> Self {
        Self {
            filename: download.filename_or(fallback),
            bytes: download.bytes,
        }
    }
}

/// Results of the non-analysis operations, one slot each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outputs {
    pub export: Option<SavedFile>,
    pub cipher: Option<CipherOutput>,
    pub image: Option<SavedFile>,
    pub image_metrics: Option<ImageMetrics>,
}

/// Top-level application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) selection: Selection,
    pub(crate) workflow: Workflow,
    pub(crate) report: Option<Report>,
    pub(crate) outputs: Outputs,
    pub(crate) preview: Option<ArtifactDetail>,
    pub(crate) catalogue: Vec<ArtifactSummary>,
    pub(crate) catalogue_error: Option<String>,
    pub(crate) upload_notice: Option<String>,
    pub(crate) rejection: Option<WorkflowError>,
    /// Display mode of the derived table.
    pub table_view: TableView,
    pub export_options: ExportOptions,
    /// Extra checks applied to uploads.
    pub validate_options: ValidateOptions,
}

impl AppState {
    /// Fresh state whose selection starts with `constant`.
    #[must_use]
    pub fn new(constant: AffineConstant) -> Self {
        Self {
            selection: Selection::with_constant(constant),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// The last successful analysis, if it is still current.
    #[must_use]
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Matrix and constant of the selected catalogue entry.
    #[must_use]
    pub fn preview(&self) -> Option<&ArtifactDetail> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn catalogue(&self) -> &[ArtifactSummary] {
        &self.catalogue
    }

    /// Why the last catalogue load failed, cleared by a successful one.
    #[must_use]
    pub fn catalogue_error(&self) -> Option<&str> {
        self.catalogue_error.as_deref()
    }

    /// One-shot message attached to the upload control.
    #[must_use]
    pub fn upload_notice(&self) -> Option<&str> {
        self.upload_notice.as_deref()
    }

    /// Why the last guarded action was refused.
    #[must_use]
    pub fn rejection(&self) -> Option<&WorkflowError> {
        self.rejection.as_ref()
    }

    /// Returns to `Idle`, dropping the report, outputs and notices.
    ///
    /// The selection and catalogue survive.
    pub(crate) fn reset(&mut self) {
        self.workflow.reset();
        self.report = None;
        self.outputs = Outputs::default();
        self.upload_notice = None;
        self.rejection = None;
        tracing::debug!("Workflow reset");
    }
}
