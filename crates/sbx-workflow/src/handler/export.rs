//! Export flow message handler.

use crate::effect::Effect;
use crate::handler::{MessageHandler, begin, reject, settle};
use crate::message::ExportMessage;
use crate::state::{AppState, Operation, SavedFile};

/// Handler for export-related messages.
pub struct ExportHandler;

impl MessageHandler<ExportMessage> for ExportHandler {
    fn handle(&self, state: &mut AppState, msg: ExportMessage) -> Effect {
        match msg {
            ExportMessage::FormatChanged(format) => {
                state.export_options.format = format;
                Effect::None
            }

            ExportMessage::SectionToggled(section) => {
                state.export_options.toggle_section(section);
                Effect::None
            }

            ExportMessage::Submit => {
                let request = match state.export_options.plan(&state.selection) {
                    Ok(request) => request,
                    Err(err) => return reject(state, err),
                };
                match begin(state, Operation::Export, Some(request)) {
                    Ok((ticket, request)) => Effect::Export { ticket, request },
                    Err(rejected) => rejected,
                }
            }

            ExportMessage::Completed {
                ticket,
                suggested_filename,
                result,
            } => {
                settle(state, ticket, result, |state, download| {
                    let file = SavedFile::from_download(download, &suggested_filename);
                    tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "Export ready");
                    state.outputs.export = Some(file);
                });
                Effect::None
            }
        }
    }
}
