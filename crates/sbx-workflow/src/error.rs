//! Errors raised by workflow guards and local uploads.

use thiserror::Error;

use sbx_ingest::IngestError;
use sbx_validate::ValidationError;

use crate::state::{Operation, Ticket};

/// Export preconditions on the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("select a predefined matrix or upload a matrix before exporting")]
    NothingSelected,

    /// The service only exports matrix-based artifacts.
    #[error("export is not available for uploaded S-boxes; only matrix-based artifacts can be exported")]
    UnsupportedArtifact,

    #[error("choose at least one section to export")]
    NoSections,
}

/// A guarded workflow operation was refused. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("nothing is selected: choose a predefined matrix or upload a file first")]
    NothingSelected,

    #[error("{operation} is already in progress")]
    AlreadyInFlight { operation: Operation },

    /// A completion arrived for a submission that is no longer current.
    #[error("completion for {ticket} does not match the current submission")]
    StaleTicket { ticket: Ticket },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A local upload could not become an artifact.
///
/// Reported as a one-shot notice; never moves the workflow.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl UploadError {
    /// Text for the upload notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Ingest(err) => format!("Could not read the file: {err}."),
            Self::Validation(err) => err.user_message(),
        }
    }
}
