//! Selection message handler.
//!
//! Uploads are decoded and validated here. Their errors become the upload
//! notice and never move the workflow.

use sbx_model::Artifact;

use crate::effect::Effect;
use crate::handler::MessageHandler;
use crate::message::SelectionMessage;
use crate::state::AppState;
use crate::upload::load_upload;

/// Handler for selection-related messages.
pub struct SelectionHandler;

impl MessageHandler<SelectionMessage> for SelectionHandler {
    fn handle(&self, state: &mut AppState, msg: SelectionMessage) -> Effect {
        match msg {
            SelectionMessage::ModeChanged(mode) => {
                state.selection.set_mode(mode);
                drop_stale_preview(state);
                Effect::None
            }

            SelectionMessage::PredefinedChosen(id) => {
                state.selection.choose_predefined(id.clone());
                state.upload_notice = None;
                drop_stale_preview(state);
                Effect::FetchPreview { id }
            }

            SelectionMessage::UploadProvided { file, kind } => {
                match load_upload(&file, kind, state.validate_options) {
                    Ok(Artifact::Matrix(matrix)) => {
                        state.selection.set_uploaded_matrix(matrix, file.name);
                        state.upload_notice = None;
                    }
                    Ok(Artifact::Table(table)) => {
                        state.selection.set_uploaded_table(table, file.name);
                        state.upload_notice = None;
                    }
                    Err(err) => {
                        tracing::info!(file = %file.name, error = %err, "Upload rejected");
                        state.upload_notice = Some(err.user_message());
                    }
                }
                drop_stale_preview(state);
                Effect::None
            }

            SelectionMessage::UploadCleared => {
                state.selection.clear_upload();
                state.upload_notice = None;
                Effect::None
            }

            SelectionMessage::ConstantChanged(constant) => {
                state.selection.set_constant(constant);
                Effect::None
            }

            SelectionMessage::PreviewLoaded { id, result } => {
                if state.selection.predefined_id() != Some(id.as_str()) {
                    tracing::debug!(%id, "Preview for a reference no longer selected, dropping");
                    return Effect::None;
                }
                match result {
                    Ok(detail) => state.preview = Some(detail),
                    Err(err) => {
                        tracing::warn!(%id, error = %err, "Preview fetch failed, keeping previous preview");
                    }
                }
                Effect::None
            }

            SelectionMessage::NoticeDismissed => {
                state.upload_notice = None;
                Effect::None
            }
        }
    }
}

/// Clears the preview once its reference is no longer selected.
fn drop_stale_preview(state: &mut AppState) {
    let current = state.selection.predefined_id();
    if state
        .preview
        .as_ref()
        .is_some_and(|preview| Some(preview.id.as_str()) != current)
    {
        state.preview = None;
    }
}
