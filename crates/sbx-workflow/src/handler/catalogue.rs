//! Catalogue of predefined matrices.

use crate::effect::Effect;
use crate::handler::MessageHandler;
use crate::message::CatalogueMessage;
use crate::state::AppState;

/// Handler for catalogue messages. A failed load keeps the previous entries.
pub struct CatalogueHandler;

impl MessageHandler<CatalogueMessage> for CatalogueHandler {
    fn handle(&self, state: &mut AppState, msg: CatalogueMessage) -> Effect {
        match msg {
            CatalogueMessage::Refresh => Effect::FetchCatalogue,

            CatalogueMessage::Loaded(Ok(entries)) => {
                tracing::debug!(count = entries.len(), "Catalogue loaded");
                state.catalogue = entries;
                state.catalogue_error = None;
                Effect::None
            }

            CatalogueMessage::Loaded(Err(err)) => {
                tracing::warn!(error = %err, "Failed to load catalogue");
                state.catalogue_error = Some(err.user_message());
                Effect::None
            }
        }
    }
}
