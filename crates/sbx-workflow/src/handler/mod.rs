//! Message handlers.
//!
//! Each handler implements [`MessageHandler`] for one message type and
//! returns the [`Effect`] the session should perform next.
//! [`update`](crate::update) dispatches to them:
//!
//! ```ignore
//! match message {
//!     Message::Selection(msg) => SelectionHandler.handle(state, msg),
//!     Message::Analysis(msg) => AnalysisHandler.handle(state, msg),
//!     // ...
//! }
//! ```

mod analysis;
mod catalogue;
mod cipher;
mod export;
mod selection;

pub use analysis::AnalysisHandler;
pub use catalogue::CatalogueHandler;
pub use cipher::CipherHandler;
pub use export::ExportHandler;
pub use selection::SelectionHandler;

use crate::effect::Effect;
use crate::error::WorkflowError;
use crate::state::{AppState, Operation, Ticket};

/// Handles one message type, mutating state and returning a follow-up effect.
pub trait MessageHandler<M> {
    fn handle(&self, state: &mut AppState, msg: M) -> Effect;
}

/// Starts a guarded submission of `input` (`None` when nothing is selected).
///
/// On refusal the reason is recorded and `Err` carries the effect to return.
pub(crate) fn begin<T>(
    state: &mut AppState,
    operation: Operation,
    input: Option<T>,
) -> Result<(Ticket, T), Effect> {
    match state.workflow.begin(operation, input) {
        Ok(started) => {
            state.rejection = None;
            Ok(started)
        }
        Err(err) => Err(reject(state, err)),
    }
}

/// Records a refusal and turns it into an effect.
pub(crate) fn reject(state: &mut AppState, err: impl Into<WorkflowError>) -> Effect {
    let err = err.into();
    tracing::info!(reason = %err, "Action refused");
    state.rejection = Some(err.clone());
    Effect::Rejected(err)
}

/// Settles a completion and applies a successful value.
///
/// Completions whose ticket is no longer in flight are logged and dropped.
pub(crate) fn settle<T, E: std::fmt::Display>(
    state: &mut AppState,
    ticket: Ticket,
    result: Result<T, E>,
    apply: impl FnOnce(&mut AppState, T),
) {
    let outcome = match result {
        Ok(value) => state.workflow.settle_success(ticket).map(|_| Some(value)),
        Err(err) => state
            .workflow
            .settle_failure(ticket, err.to_string())
            .map(|_| None),
    };

    match outcome {
        Ok(Some(value)) => apply(state, value),
        Ok(None) => {}
        Err(stale) => tracing::debug!(reason = %stale, "Completion dropped"),
    }
}
