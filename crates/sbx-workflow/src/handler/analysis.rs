//! Analysis submission and report display.

use crate::effect::Effect;
use crate::handler::{MessageHandler, begin, settle};
use crate::message::AnalysisMessage;
use crate::state::{AppState, Operation, Report};

/// Handler for analysis messages.
pub struct AnalysisHandler;

impl MessageHandler<AnalysisMessage> for AnalysisHandler {
    fn handle(&self, state: &mut AppState, msg: AnalysisMessage) -> Effect {
        match msg {
            AnalysisMessage::Submit => {
                let artifact = state.selection.artifact_ref();
                match begin(state, Operation::Analyze, artifact) {
                    Ok((ticket, artifact)) => {
                        // The previous report is not kept as a fallback.
                        state.report = None;
                        tracing::info!(artifact = %artifact.label(), "Analysis submitted");
                        Effect::Analyze { ticket, artifact }
                    }
                    Err(rejected) => rejected,
                }
            }

            AnalysisMessage::Completed {
                ticket,
                artifact_label,
                result,
            } => {
                settle(state, ticket, result, |state, result| {
                    tracing::info!(
                        artifact = %artifact_label,
                        nl = result.metrics.nl,
                        elapsed_ms = result.elapsed_ms,
                        "Analysis settled"
                    );
                    state.report = Some(Report::new(artifact_label, result));
                });
                Effect::None
            }

            AnalysisMessage::ViewChanged(view) => {
                state.table_view = view;
                Effect::None
            }

            AnalysisMessage::ViewToggled => {
                state.table_view = state.table_view.toggled();
                Effect::None
            }
        }
    }
}
