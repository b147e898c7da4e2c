//! JSON bodies as the service spells them.
//!
//! Every payload is built from an [`ArtifactRef`] by an exhaustive match, so a
//! request always names exactly one source.

use serde::{Deserialize, Serialize};

use sbx_model::{
    AffineConstant, AnalysisResult, ArtifactRef, ArtifactSummary, BinaryMatrix, ExportSection,
    MetricSet, SubstitutionTable,
};

use super::types::{CipherOutput, ExportRequest, ExportSource};
use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct ArtifactList {
    pub matrices: Vec<ArtifactSummary>,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_matrix: Option<&'a BinaryMatrix>,
    #[serde(rename = "customSBox", skip_serializing_if = "Option::is_none")]
    custom_sbox: Option<&'a SubstitutionTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constant: Option<AffineConstant>,
}

impl<'a> From<&'a ArtifactRef> for AnalyzePayload<'a> {
    fn from(artifact: &'a ArtifactRef) -> Self {
        match artifact {
            ArtifactRef::Predefined { id, constant } => Self {
                matrix_id: Some(id),
                custom_matrix: None,
                custom_sbox: None,
                constant: Some(*constant),
            },
            ArtifactRef::CustomMatrix { matrix, constant } => Self {
                matrix_id: None,
                custom_matrix: Some(matrix),
                custom_sbox: None,
                constant: Some(*constant),
            },
            ArtifactRef::CustomTable { table } => Self {
                matrix_id: None,
                custom_matrix: None,
                custom_sbox: Some(table),
                constant: None,
            },
        }
    }
}

/// Success body of `POST /api/analyze`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResponse {
    /// Empty when a substitution table was analyzed directly.
    matrix: Vec<Vec<u8>>,
    sbox: SubstitutionTable,
    analysis: MetricSet,
    #[serde(default)]
    fixed_points: Vec<usize>,
    #[serde(default)]
    calculation_time_ms: u64,
}

impl TryFrom<AnalyzeResponse> for AnalysisResult {
    type Error = ClientError;

    fn try_from(response: AnalyzeResponse) -> Result<Self> {
        let derived_matrix = if response.matrix.is_empty() {
            None
        } else {
            Some(
                BinaryMatrix::new(response.matrix)
                    .map_err(|e| ClientError::JsonParse(format!("derived matrix: {e}")))?,
            )
        };

        Ok(Self {
            derived_matrix,
            derived_table: response.sbox,
            metrics: response.analysis,
            fixed_points: response.fixed_points,
            elapsed_ms: response.calculation_time_ms,
        })
    }
}

/// Body of `POST /api/export`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_matrix: Option<&'a BinaryMatrix>,
    constant: AffineConstant,
    format: &'static str,
    include: &'a [ExportSection],
}

impl<'a> From<&'a ExportRequest> for ExportPayload<'a> {
    fn from(request: &'a ExportRequest) -> Self {
        let (matrix_id, custom_matrix) = match &request.source {
            ExportSource::Predefined { id } => (Some(id.as_str()), None),
            ExportSource::CustomMatrix { matrix } => (None, Some(matrix)),
        };
        Self {
            matrix_id,
            custom_matrix,
            constant: request.constant,
            format: request.format.extension(),
            include: &request.include,
        }
    }
}

/// S-box source fields shared by the AES endpoints.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SboxSource<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sbox_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_matrix: Option<&'a BinaryMatrix>,
    #[serde(rename = "customSBox", skip_serializing_if = "Option::is_none")]
    pub custom_sbox: Option<&'a SubstitutionTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<AffineConstant>,
}

impl<'a> From<&'a ArtifactRef> for SboxSource<'a> {
    fn from(artifact: &'a ArtifactRef) -> Self {
        match artifact {
            ArtifactRef::Predefined { id, constant } => Self {
                sbox_id: Some(id),
                constant: Some(*constant),
                ..Self::default()
            },
            ArtifactRef::CustomMatrix { matrix, constant } => Self {
                custom_matrix: Some(matrix),
                constant: Some(*constant),
                ..Self::default()
            },
            ArtifactRef::CustomTable { table } => Self {
                custom_sbox: Some(table),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EncryptPayload<'a> {
    pub plaintext: &'a str,
    pub key: &'a str,
    #[serde(flatten)]
    pub source: SboxSource<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DecryptPayload<'a> {
    pub ciphertext: &'a str,
    pub key: &'a str,
    #[serde(flatten)]
    pub source: SboxSource<'a>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EncryptResponse {
    ciphertext: String,
    sbox_used: String,
}

impl From<EncryptResponse> for CipherOutput {
    fn from(response: EncryptResponse) -> Self {
        Self {
            text: response.ciphertext,
            sbox_used: response.sbox_used,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DecryptResponse {
    plaintext: String,
    sbox_used: String,
}

impl From<DecryptResponse> for CipherOutput {
    fn from(response: DecryptResponse) -> Self {
        Self {
            text: response.plaintext,
            sbox_used: response.sbox_used,
        }
    }
}
