//! Analysis workflow for the S-box studio.
//!
//! Built with the Elm architecture: [`AppState`] holds everything,
//! [`Message`] describes what happened, and [`update`] is the only place
//! state changes. `update` returns an [`Effect`] naming the service call to
//! make; a [`Session`] performs it and feeds the completion back in.
//!
//! ```text
//! Message ─▶ update(&mut AppState) ─▶ Effect ─▶ Session ─▶ SboxApi
//!    ▲                                                       │
//!    └──────────────────── completion message ◀──────────────┘
//! ```
//!
//! Guarantees kept by `update`:
//!
//! - at most one artifact is selected, and it matches the selection mode
//! - at most one service call is in flight; a second submit is refused
//! - completions carry a [`Ticket`], and ones that no longer match are dropped
//! - a refused action makes no request and leaves the workflow status alone

pub mod effect;
pub mod error;
pub mod handler;
pub mod message;
pub mod runtime;
pub mod state;
pub mod update;
pub mod upload;

pub use effect::Effect;
pub use error::{ExportError, UploadError, WorkflowError};
pub use message::{
    AnalysisMessage, CatalogueMessage, CipherMessage, ExportMessage, Message, SelectionMessage,
};
pub use runtime::Session;
pub use state::{
    AppState, ExportOptions, Operation, Outputs, Report, SavedFile, SelectedArtifact, Selection,
    SelectionMode, TableRendering, TableView, Ticket, Workflow, WorkflowStatus,
};
pub use update::update;
pub use upload::load_upload;
