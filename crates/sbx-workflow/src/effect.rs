//! Follow-up work requested by [`update`](crate::update).

use sbx_client::{CipherRequest, ExportRequest, ImageCipherRequest, ImageUpload};
use sbx_model::ArtifactRef;

use crate::error::WorkflowError;
use crate::state::Ticket;

/// A collaborator call to perform, or why none is needed.
///
/// Effects that carry a [`Ticket`] settle the workflow when their completion
/// message comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    None,

    /// A guarded action was refused; no request is made.
    Rejected(WorkflowError),

    FetchCatalogue,

    /// Out-of-band preview of a catalogue entry. Never touches workflow status.
    FetchPreview { id: String },

    Analyze {
        ticket: Ticket,
        artifact: ArtifactRef,
    },

    Export {
        ticket: Ticket,
        request: ExportRequest,
    },

    Encrypt {
        ticket: Ticket,
        request: CipherRequest,
    },

    Decrypt {
        ticket: Ticket,
        request: CipherRequest,
    },

    ImageEncrypt {
        ticket: Ticket,
        request: ImageCipherRequest,
    },

    ImageDecrypt {
        ticket: Ticket,
        request: ImageCipherRequest,
    },

    ImageAnalyze {
        ticket: Ticket,
        original: ImageUpload,
        encrypted: ImageUpload,
    },
}

impl Effect {
    /// Whether performing this effect calls the service.
    #[must_use]
    pub fn is_request(&self) -> bool {
        !matches!(self, Self::None | Self::Rejected(_))
    }

    /// The ticket this effect will settle, if any.
    #[must_use]
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::Analyze { ticket, .. }
            | Self::Export { ticket, .. }
            | Self::Encrypt { ticket, .. }
            | Self::Decrypt { ticket, .. }
            | Self::ImageEncrypt { ticket, .. }
            | Self::ImageDecrypt { ticket, .. }
            | Self::ImageAnalyze { ticket, .. } => Some(*ticket),
            Self::None | Self::Rejected(_) | Self::FetchCatalogue | Self::FetchPreview { .. } => {
                None
            }
        }
    }
}
