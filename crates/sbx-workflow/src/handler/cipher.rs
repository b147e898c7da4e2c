//! AES text and image operations.
//!
//! The service does the cryptography. This handler only picks which S-box
//! source to send from the current selection.

use sbx_client::{CipherRequest, ImageCipherRequest};

use crate::effect::Effect;
use crate::handler::{MessageHandler, begin, settle};
use crate::message::CipherMessage;
use crate::state::{AppState, Operation, SavedFile};

/// Handler for cipher messages.
pub struct CipherHandler;

impl MessageHandler<CipherMessage> for CipherHandler {
    fn handle(&self, state: &mut AppState, msg: CipherMessage) -> Effect {
        match msg {
            CipherMessage::Encrypt { plaintext, key } => {
                let request = state.selection.artifact_ref().map(|artifact| CipherRequest {
                    text: plaintext,
                    key,
                    artifact,
                });
                match begin(state, Operation::Encrypt, request) {
                    Ok((ticket, request)) => Effect::Encrypt { ticket, request },
                    Err(rejected) => rejected,
                }
            }

            CipherMessage::Decrypt { ciphertext, key } => {
                let request = state.selection.artifact_ref().map(|artifact| CipherRequest {
                    text: ciphertext,
                    key,
                    artifact,
                });
                match begin(state, Operation::Decrypt, request) {
                    Ok((ticket, request)) => Effect::Decrypt { ticket, request },
                    Err(rejected) => rejected,
                }
            }

            CipherMessage::ImageEncrypt { image, key } => {
                let request = state
                    .selection
                    .artifact_ref()
                    .map(|artifact| ImageCipherRequest {
                        image,
                        key,
                        artifact,
                    });
                match begin(state, Operation::ImageEncrypt, request) {
                    Ok((ticket, request)) => Effect::ImageEncrypt { ticket, request },
                    Err(rejected) => rejected,
                }
            }

            CipherMessage::ImageDecrypt { image, key } => {
                let request = state
                    .selection
                    .artifact_ref()
                    .map(|artifact| ImageCipherRequest {
                        image,
                        key,
                        artifact,
                    });
                match begin(state, Operation::ImageDecrypt, request) {
                    Ok((ticket, request)) => Effect::ImageDecrypt { ticket, request },
                    Err(rejected) => rejected,
                }
            }

            // Compares two images; no S-box involved.
            CipherMessage::ImageAnalyze {
                original,
                encrypted,
            } => match begin(state, Operation::ImageAnalyze, Some((original, encrypted))) {
                Ok((ticket, (original, encrypted))) => Effect::ImageAnalyze {
                    ticket,
                    original,
                    encrypted,
                },
                Err(rejected) => rejected,
            },

            CipherMessage::TextCompleted { ticket, result } => {
                settle(state, ticket, result, |state, output| {
                    state.outputs.cipher = Some(output);
                });
                Effect::None
            }

            CipherMessage::ImageCompleted {
                ticket,
                fallback_filename,
                result,
            } => {
                settle(state, ticket, result, |state, download| {
                    state.outputs.image = Some(SavedFile::from_download(download, &fallback_filename));
                });
                Effect::None
            }

            CipherMessage::MetricsCompleted { ticket, result } => {
                settle(state, ticket, result, |state, metrics| {
                    state.outputs.image_metrics = Some(metrics);
                });
                Effect::None
            }
        }
    }
}
