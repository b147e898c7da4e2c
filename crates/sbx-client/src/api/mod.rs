//! Operations offered by the analysis service.

mod client;
mod types;
mod wire;

use std::future::Future;

use sbx_model::{AnalysisResult, ArtifactDetail, ArtifactRef, ArtifactSummary, ImageMetrics};

use crate::error::Result;

pub use client::{ApiClient, extract_error_message};
pub use types::{
    CipherOutput, CipherRequest, DownloadedFile, ExportRequest, ExportSource, ImageCipherRequest,
    ImageUpload, RemoteValidation,
};

/// The analysis service as seen by the workflow.
///
/// [`ApiClient`] talks HTTP; tests substitute an in-memory backend.
pub trait SboxApi: Send + Sync {
    /// `GET /api/matrices`
    fn list_artifacts(&self) -> impl Future<Output = Result<Vec<ArtifactSummary>>> + Send;

    /// `GET /api/matrices/{id}`
    fn fetch_artifact(&self, id: &str) -> impl Future<Output = Result<ArtifactDetail>> + Send;

    /// `POST /api/matrices/validate`: the service's own check of a matrix file.
    fn validate_remote(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<RemoteValidation>> + Send;

    /// `POST /api/analyze`
    fn analyze(&self, artifact: &ArtifactRef) -> impl Future<Output = Result<AnalysisResult>> + Send;

    /// `POST /api/export`
    fn export(&self, request: &ExportRequest) -> impl Future<Output = Result<DownloadedFile>> + Send;

    /// `POST /api/aes/encrypt`
    fn encrypt(&self, request: &CipherRequest) -> impl Future<Output = Result<CipherOutput>> + Send;

    /// `POST /api/aes/decrypt`
    fn decrypt(&self, request: &CipherRequest) -> impl Future<Output = Result<CipherOutput>> + Send;

    /// `POST /api/image/encrypt`
    fn image_encrypt(
        &self,
        request: &ImageCipherRequest,
    ) -> impl Future<Output = Result<DownloadedFile>> + Send;

    /// `POST /api/image/decrypt`
    fn image_decrypt(
        &self,
        request: &ImageCipherRequest,
    ) -> impl Future<Output = Result<DownloadedFile>> + Send;

    /// `POST /api/image/analyze`
    fn image_analyze(
        &self,
        original: &ImageUpload,
        encrypted: &ImageUpload,
    ) -> impl Future<Output = Result<ImageMetrics>> + Send;
}
