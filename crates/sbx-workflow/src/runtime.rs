//! Drives [`update`] against a live backend.
//!
//! A [`Session`] owns the state, performs each effect with a deadline and
//! feeds the completion back in as a message, until nothing is left to do.

use std::future::Future;
use std::time::Duration;

use sbx_client::{ClientError, SboxApi};

use crate::effect::Effect;
use crate::message::{
    AnalysisMessage, CatalogueMessage, CipherMessage, ExportMessage, Message, SelectionMessage,
};
use crate::state::AppState;
use crate::update::update;

/// File names used when the service does not name an image download.
const ENCRYPTED_IMAGE_FILENAME: &str = "encrypted.png";
const DECRYPTED_IMAGE_FILENAME: &str = "decrypted.png";

/// Application state bound to a backend.
pub struct Session<B> {
    backend: B,
    state: AppState,
    timeout: Duration,
}

impl<B: SboxApi> Session<B> {
    pub fn new(backend: B, state: AppState) -> Self {
        Self {
            backend,
            state,
            timeout: sbx_client::DEFAULT_TIMEOUT,
        }
    }

    /// Deadline applied to every collaborator call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Applies `message` and performs effects until the state is quiet.
    ///
    /// Returns the first effect produced, so callers can tell a refusal
    /// ([`Effect::Rejected`]) from a request that was made.
    pub async fn dispatch(&mut self, message: Message) -> Effect {
        let first = update(&mut self.state, message);
        let mut next = self.perform(first.clone()).await;

        while let Some(message) = next {
            let effect = update(&mut self.state, message);
            next = self.perform(effect).await;
        }
        first
    }

    /// Performs one effect and returns its completion message, if any.
    async fn perform(&self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::None | Effect::Rejected(_) => None,

            Effect::FetchCatalogue => {
                let result = self.deadline(self.backend.list_artifacts()).await;
                Some(Message::Catalogue(CatalogueMessage::Loaded(result)))
            }

            Effect::FetchPreview { id } => {
                let result = self.deadline(self.backend.fetch_artifact(&id)).await;
                Some(Message::Selection(SelectionMessage::PreviewLoaded { id, result }))
            }

            Effect::Analyze { ticket, artifact } => {
                let result = self.deadline(self.backend.analyze(&artifact)).await;
                Some(Message::Analysis(AnalysisMessage::Completed {
                    ticket,
                    artifact_label: artifact.label(),
                    result,
                }))
            }

            Effect::Export { ticket, request } => {
                let result = self.deadline(self.backend.export(&request)).await;
                Some(Message::Export(ExportMessage::Completed {
                    ticket,
                    suggested_filename: request.suggested_filename(),
                    result,
                }))
            }

            Effect::Encrypt { ticket, request } => {
                let result = self.deadline(self.backend.encrypt(&request)).await;
                Some(Message::Cipher(CipherMessage::TextCompleted { ticket, result }))
            }

            Effect::Decrypt { ticket, request } => {
                let result = self.deadline(self.backend.decrypt(&request)).await;
                Some(Message::Cipher(CipherMessage::TextCompleted { ticket, result }))
            }

            Effect::ImageEncrypt { ticket, request } => {
                let result = self.deadline(self.backend.image_encrypt(&request)).await;
                Some(Message::Cipher(CipherMessage::ImageCompleted {
                    ticket,
                    fallback_filename: ENCRYPTED_IMAGE_FILENAME.to_string(),
                    result,
                }))
            }

            Effect::ImageDecrypt { ticket, request } => {
                let result = self.deadline(self.backend.image_decrypt(&request)).await;
                Some(Message::Cipher(CipherMessage::ImageCompleted {
                    ticket,
                    fallback_filename: DECRYPTED_IMAGE_FILENAME.to_string(),
                    result,
                }))
            }

            Effect::ImageAnalyze {
                ticket,
                original,
                encrypted,
            } => {
                let result = self
                    .deadline(self.backend.image_analyze(&original, &encrypted))
                    .await;
                Some(Message::Cipher(CipherMessage::MetricsCompleted { ticket, result }))
            }
        }
    }

    /// Bounds a call by the session timeout.
    async fn deadline<T>(
        &self,
        call: impl Future<Output = sbx_client::Result<T>>,
    ) -> Result<T, ClientError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Service call timed out");
                Err(ClientError::Timeout)
            }
        }
    }
}
