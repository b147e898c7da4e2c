//! In-memory analysis service for workflow tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use sbx_client::{
    CipherOutput, CipherRequest, ClientError, DownloadedFile, ExportRequest, ImageCipherRequest,
    ImageUpload, RemoteValidation, SboxApi,
};
use sbx_model::{
    AffineConstant, AnalysisResult, ArtifactDetail, ArtifactRef, ArtifactSummary, BinaryMatrix,
    ImageMetrics, MetricSet, SubstitutionTable,
};

/// Records every call and answers with canned values.
pub struct FakeBackend {
    calls: Mutex<Vec<&'static str>>,
    analysis: Result<AnalysisResult, ClientError>,
    preview: Result<ArtifactDetail, ClientError>,
    catalogue: Result<Vec<ArtifactSummary>, ClientError>,
    delay: Duration,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            analysis: Ok(sample_result()),
            preview: Ok(sample_detail("aes")),
            catalogue: Ok(vec![sample_summary("aes"), sample_summary("kaisar")]),
            delay: Duration::ZERO,
        }
    }

    pub fn with_analysis(mut self, analysis: Result<AnalysisResult, ClientError>) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn with_preview(mut self, preview: Result<ArtifactDetail, ClientError>) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_catalogue(mut self, catalogue: Result<Vec<ArtifactSummary>, ClientError>) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Every call waits this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl SboxApi for FakeBackend {
    async fn list_artifacts(&self) -> sbx_client::Result<Vec<ArtifactSummary>> {
        self.record("list_artifacts").await;
        self.catalogue.clone()
    }

    async fn fetch_artifact(&self, id: &str) -> sbx_client::Result<ArtifactDetail> {
        self.record("fetch_artifact").await;
        self.preview.clone().map(|detail| ArtifactDetail {
            id: id.to_string(),
            ..detail
        })
    }

    async fn validate_remote(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> sbx_client::Result<RemoteValidation> {
        self.record("validate_remote").await;
        Ok(RemoteValidation {
            valid: true,
            matrix: Some(BinaryMatrix::identity(8)),
            rank: Some(8),
            invertible: Some(true),
            error: None,
        })
    }

    async fn analyze(&self, _artifact: &ArtifactRef) -> sbx_client::Result<AnalysisResult> {
        self.record("analyze").await;
        self.analysis.clone()
    }

    async fn export(&self, request: &ExportRequest) -> sbx_client::Result<DownloadedFile> {
        self.record("export").await;
        Ok(DownloadedFile {
            filename: Some(request.suggested_filename()),
            bytes: b"PK\x03\x04".to_vec(),
        })
    }

    async fn encrypt(&self, request: &CipherRequest) -> sbx_client::Result<CipherOutput> {
        self.record("encrypt").await;
        Ok(CipherOutput {
            text: "69c4e0d86a7b0430d8cdb78070b4c55a".to_string(),
            sbox_used: request.artifact.label(),
        })
    }

    async fn decrypt(&self, request: &CipherRequest) -> sbx_client::Result<CipherOutput> {
        self.record("decrypt").await;
        Ok(CipherOutput {
            text: "00112233445566778899aabbccddeeff".to_string(),
            sbox_used: request.artifact.label(),
        })
    }

    async fn image_encrypt(
        &self,
        request: &ImageCipherRequest,
    ) -> sbx_client::Result<DownloadedFile> {
        self.record("image_encrypt").await;
        Ok(DownloadedFile {
            filename: None,
            bytes: request.image.bytes.iter().rev().copied().collect(),
        })
    }

    async fn image_decrypt(
        &self,
        request: &ImageCipherRequest,
    ) -> sbx_client::Result<DownloadedFile> {
        self.record("image_decrypt").await;
        Ok(DownloadedFile {
            filename: Some("restored.png".to_string()),
            bytes: request.image.bytes.clone(),
        })
    }

    async fn image_analyze(
        &self,
        _original: &ImageUpload,
        _encrypted: &ImageUpload,
    ) -> sbx_client::Result<ImageMetrics> {
        self.record("image_analyze").await;
        Ok(ImageMetrics {
            entropy: 7.9972,
            npcr: 99.61,
            uaci: 33.46,
            correlation_horizontal: 0.0012,
            correlation_vertical: -0.0021,
            correlation_diagonal: 0.0008,
        })
    }
}

pub fn sample_metrics() -> MetricSet {
    MetricSet {
        nl: 112,
        sac: 0.5078,
        bic_nl: 112,
        bic_sac: 0.5046,
        lap: 0.0625,
        dap: 0.0156,
        du: 4,
        ad: 7,
        to: 7.8600,
        ci: 0,
    }
}

pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        derived_matrix: Some(BinaryMatrix::identity(8)),
        derived_table: SubstitutionTable::identity(),
        metrics: sample_metrics(),
        fixed_points: Vec::new(),
        elapsed_ms: 42,
    }
}

pub fn sample_summary(id: &str) -> ArtifactSummary {
    ArtifactSummary {
        id: id.to_string(),
        name: id.to_uppercase(),
        author: None,
        tags: vec!["reference".to_string()],
        status: "verified".to_string(),
        has_matrix: true,
    }
}

pub fn sample_detail(id: &str) -> ArtifactDetail {
    ArtifactDetail {
        id: id.to_string(),
        name: id.to_uppercase(),
        author: None,
        tags: Vec::new(),
        status: "verified".to_string(),
        matrix: Some(BinaryMatrix::identity(8)),
        constant: Some(AffineConstant::AES),
    }
}

/// An 8×8 identity matrix as CSV.
pub fn identity_matrix_csv() -> Vec<u8> {
    (0..8)
        .map(|r| {
            (0..8)
                .map(|c| if r == c { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

/// The identity S-box as a 16×16 CSV.
pub fn identity_table_csv() -> Vec<u8> {
    (0..16)
        .map(|r| {
            (0..16)
                .map(|c| (r * 16 + c).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}
