//! Message hierarchy.
//!
//! All user actions and collaborator completions are variants of
//! [`Message`]. [`update`](crate::update) is the only place they change state.

use sbx_client::{ClientError, CipherOutput, DownloadedFile, ImageUpload};
use sbx_ingest::SourceFile;
use sbx_model::{
    AffineConstant, AnalysisResult, ArtifactDetail, ArtifactKind, ArtifactSummary, ExportFormat,
    ExportSection, ImageMetrics,
};

use crate::state::{SelectionMode, TableView, Ticket};

/// Root message.
#[derive(Debug, Clone)]
pub enum Message {
    /// Catalogue of predefined matrices
    Catalogue(CatalogueMessage),

    /// Choosing or uploading the input artifact
    Selection(SelectionMessage),

    /// Analysis submission and report display
    Analysis(AnalysisMessage),

    /// Report export
    Export(ExportMessage),

    /// AES over text and images
    Cipher(CipherMessage),

    /// Return to `Idle`, dropping the report and outputs
    Reset,
}

#[derive(Debug, Clone)]
pub enum CatalogueMessage {
    Refresh,
    Loaded(Result<Vec<ArtifactSummary>, ClientError>),
}

#[derive(Debug, Clone)]
pub enum SelectionMessage {
    ModeChanged(SelectionMode),

    /// A catalogue entry was picked; also fetches its preview.
    PredefinedChosen(String),

    /// A file was supplied; it is decoded and validated as `kind`.
    UploadProvided { file: SourceFile, kind: ArtifactKind },

    UploadCleared,

    ConstantChanged(AffineConstant),

    /// Preview fetch completed (from the session).
    PreviewLoaded {
        id: String,
        result: Result<ArtifactDetail, ClientError>,
    },

    NoticeDismissed,
}

#[derive(Debug, Clone)]
pub enum AnalysisMessage {
    Submit,

    /// Analysis call completed (from the session).
    Completed {
        ticket: Ticket,
        artifact_label: String,
        result: Result<AnalysisResult, ClientError>,
    },

    ViewChanged(TableView),

    ViewToggled,
}

#[derive(Debug, Clone)]
pub enum ExportMessage {
    FormatChanged(ExportFormat),

    SectionToggled(ExportSection),

    Submit,

    /// Export call completed (from the session).
    Completed {
        ticket: Ticket,
        suggested_filename: String,
        result: Result<DownloadedFile, ClientError>,
    },
}

#[derive(Debug, Clone)]
pub enum CipherMessage {
    Encrypt { plaintext: String, key: String },

    Decrypt { ciphertext: String, key: String },

    ImageEncrypt { image: ImageUpload, key: String },

    ImageDecrypt { image: ImageUpload, key: String },

    ImageAnalyze {
        original: ImageUpload,
        encrypted: ImageUpload,
    },

    /// Text cipher call completed (from the session).
    TextCompleted {
        ticket: Ticket,
        result: Result<CipherOutput, ClientError>,
    },

    /// Image cipher call completed (from the session).
    ImageCompleted {
        ticket: Ticket,
        fallback_filename: String,
        result: Result<DownloadedFile, ClientError>,
    },

    /// Image analysis completed (from the session).
    MetricsCompleted {
        ticket: Ticket,
        result: Result<ImageMetrics, ClientError>,
    },
}
