//! Application state management.
//!
//! - **AppState**: root state owned by the session
//! - **Selection**: the active input artifact
//! - **Workflow**: single-flight status of collaborator calls
//! - **Report**: last successful analysis, table views and export options

mod app_state;
mod report;
mod selection;
mod workflow;

pub use app_state::{AppState, Outputs, SavedFile};
pub use report::{ExportOptions, Report, TableRendering, TableView};
pub use selection::{SelectedArtifact, Selection, SelectionMode};
pub use workflow::{Operation, Ticket, Workflow, WorkflowStatus};
