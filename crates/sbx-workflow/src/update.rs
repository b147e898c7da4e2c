//! Top-level message dispatcher.

use crate::effect::Effect;
use crate::handler::{
    AnalysisHandler, CatalogueHandler, CipherHandler, ExportHandler, MessageHandler,
    SelectionHandler,
};
use crate::message::Message;
use crate::state::AppState;

/// Applies `message` to `state` and returns the follow-up effect.
///
/// This is the only function that changes [`AppState`]. It never blocks and
/// never talks to the service; the returned [`Effect`] says what to call.
pub fn update(state: &mut AppState, message: Message) -> Effect {
    match message {
        Message::Catalogue(msg) => CatalogueHandler.handle(state, msg),
        Message::Selection(msg) => SelectionHandler.handle(state, msg),
        Message::Analysis(msg) => AnalysisHandler.handle(state, msg),
        Message::Export(msg) => ExportHandler.handle(state, msg),
        Message::Cipher(msg) => CipherHandler.handle(state, msg),
        Message::Reset => {
            state.reset();
            Effect::None
        }
    }
}
