//! HTTP implementation of [`SboxApi`].

use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use sbx_model::{AnalysisResult, ArtifactDetail, ArtifactRef, ArtifactSummary, ImageMetrics};

use super::SboxApi;
use super::types::{
    CipherOutput, CipherRequest, DownloadedFile, ExportRequest, ImageCipherRequest, ImageUpload,
    RemoteValidation, bare_file_name,
};
use super::wire::{
    AnalyzePayload, AnalyzeResponse, ArtifactList, DecryptPayload, DecryptResponse,
    EncryptPayload, EncryptResponse, ExportPayload, SboxSource,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("sbox-studio/", env!("CARGO_PKG_VERSION"));

/// Client for the analysis service's `/api` endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.normalized_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// `/api/matrices/{id}` with `id` percent-encoded as one path segment.
    fn artifact_url(&self, id: &str) -> Result<reqwest::Url> {
        let invalid =
            || ClientError::InvalidConfig(format!("cannot build URL from {}", self.base_url));
        let mut url = reqwest::Url::parse(&self.url("/matrices")).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(id);
        Ok(url)
    }

    /// Sends a request and parses a JSON success body.
    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Sends a request and returns the raw success body.
    async fn send_download(&self, request: reqwest::RequestBuilder) -> Result<DownloadedFile> {
        let response = check_status(request.send().await?).await?;
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_filename);
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(bytes = bytes.len(), filename = ?filename, "Download received");
        Ok(DownloadedFile { filename, bytes })
    }

    async fn image_cipher(&self, path: &str, request: &ImageCipherRequest) -> Result<DownloadedFile> {
        let form = image_cipher_form(request)?;
        tracing::debug!(url = %self.url(path), image = %request.image.name, "Uploading image");
        self.send_download(self.client.post(self.url(path)).multipart(form))
            .await
    }
}

impl SboxApi for ApiClient {
    async fn list_artifacts(&self) -> Result<Vec<ArtifactSummary>> {
        let url = self.url("/matrices");
        tracing::debug!("Fetching catalogue from {}", url);

        let list: ArtifactList = self.send_json(self.client.get(&url)).await?;
        Ok(list.matrices)
    }

    async fn fetch_artifact(&self, id: &str) -> Result<ArtifactDetail> {
        let url = self.artifact_url(id)?;
        tracing::debug!("Fetching artifact from {}", url);

        self.send_json(self.client.get(url)).await
    }

    async fn validate_remote(&self, file_name: &str, bytes: Vec<u8>) -> Result<RemoteValidation> {
        let url = self.url("/matrices/validate");
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        self.send_json(self.client.post(&url).multipart(form)).await
    }

    async fn analyze(&self, artifact: &ArtifactRef) -> Result<AnalysisResult> {
        let url = self.url("/analyze");
        tracing::debug!(artifact = %artifact.label(), "Requesting analysis");

        let response: AnalyzeResponse = self
            .send_json(self.client.post(&url).json(&AnalyzePayload::from(artifact)))
            .await?;
        AnalysisResult::try_from(response)
    }

    async fn export(&self, request: &ExportRequest) -> Result<DownloadedFile> {
        let url = self.url("/export");
        tracing::debug!(format = %request.format, sections = request.include.len(), "Requesting export");

        self.send_download(self.client.post(&url).json(&ExportPayload::from(request)))
            .await
    }

    async fn encrypt(&self, request: &CipherRequest) -> Result<CipherOutput> {
        let payload = EncryptPayload {
            plaintext: &request.text,
            key: &request.key,
            source: SboxSource::from(&request.artifact),
        };
        let response: EncryptResponse = self
            .send_json(self.client.post(self.url("/aes/encrypt")).json(&payload))
            .await?;
        Ok(response.into())
    }

    async fn decrypt(&self, request: &CipherRequest) -> Result<CipherOutput> {
        let payload = DecryptPayload {
            ciphertext: &request.text,
            key: &request.key,
            source: SboxSource::from(&request.artifact),
        };
        let response: DecryptResponse = self
            .send_json(self.client.post(self.url("/aes/decrypt")).json(&payload))
            .await?;
        Ok(response.into())
    }

    async fn image_encrypt(&self, request: &ImageCipherRequest) -> Result<DownloadedFile> {
        self.image_cipher("/image/encrypt", request).await
    }

    async fn image_decrypt(&self, request: &ImageCipherRequest) -> Result<DownloadedFile> {
        self.image_cipher("/image/decrypt", request).await
    }

    async fn image_analyze(
        &self,
        original: &ImageUpload,
        encrypted: &ImageUpload,
    ) -> Result<ImageMetrics> {
        let form = Form::new()
            .part("originalImage", image_part(original))
            .part("encryptedImage", image_part(encrypted));

        self.send_json(self.client.post(self.url("/image/analyze")).multipart(form))
            .await
    }
}

fn image_part(image: &ImageUpload) -> Part {
    Part::bytes(image.bytes.clone()).file_name(image.name.clone())
}

/// Builds the multipart form for the image cipher endpoints.
///
/// Custom artifacts travel as JSON text fields, the way the service parses them.
fn image_cipher_form(request: &ImageCipherRequest) -> Result<Form> {
    let mut form = Form::new()
        .part("image", image_part(&request.image))
        .text("key", request.key.clone());

    match &request.artifact {
        ArtifactRef::Predefined { id, constant } => {
            form = form
                .text("sboxId", id.clone())
                .text("constant", constant.to_string());
        }
        ArtifactRef::CustomMatrix { matrix, constant } => {
            form = form
                .text("customMatrix", serde_json::to_string(matrix)?)
                .text("constant", constant.to_string());
        }
        ArtifactRef::CustomTable { table } => {
            form = form.text("customSBox", serde_json::to_string(table)?);
        }
    }
    Ok(form)
}

/// Passes success responses through; turns anything else into [`ClientError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), %message, "Service returned an error");

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pulls a human-readable message out of a service error body.
///
/// Recognized shapes, first match wins:
/// `{"detail": "..."}`, `{"detail": {"error": "..."}}`,
/// `{"detail": [{"msg": "..."}]}` and `{"error": "..."}`.
#[must_use]
pub fn extract_error_message(status: u16, body: &str) -> String {
    let fallback = || format!("request failed with status {status}");

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    let detail = value.get("detail");
    let message = detail
        .and_then(serde_json::Value::as_str)
        .or_else(|| {
            detail
                .and_then(|d| d.get("error"))
                .and_then(serde_json::Value::as_str)
        })
        .or_else(|| {
            detail
                .and_then(serde_json::Value::as_array)
                .and_then(|items| items.first())
                .and_then(|item| item.get("msg"))
                .and_then(serde_json::Value::as_str)
        })
        .or_else(|| value.get("error").and_then(serde_json::Value::as_str));

    message.map_or_else(fallback, str::to_string)
}

/// Reads `filename=` from a `Content-Disposition` header value, keeping only
/// its last path component.
fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .and_then(|name| bare_file_name(name.trim_matches('"')))
}
