//! Request and response types exchanged with the analysis service.

use serde::Deserialize;

use sbx_model::{AffineConstant, ArtifactRef, BinaryMatrix, ExportFormat, ExportSection};

/// Result of the service's own check of an uploaded matrix file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteValidation {
    pub valid: bool,
    #[serde(default)]
    pub matrix: Option<BinaryMatrix>,
    #[serde(default)]
    pub rank: Option<usize>,
    #[serde(default)]
    pub invertible: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What an export report is generated from.
///
/// Uploaded substitution tables cannot be exported, so there is no variant
/// for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSource {
    Predefined { id: String },
    CustomMatrix { matrix: BinaryMatrix },
}

impl ExportSource {
    /// File name stem the service uses for this source.
    #[must_use]
    pub fn filename_prefix(&self) -> String {
        match self {
            Self::Predefined { id } => format!("sbox_{id}"),
            Self::CustomMatrix { .. } => "sbox_custom".to_string(),
        }
    }
}

/// Parameters for `POST /api/export`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub source: ExportSource,
    pub constant: AffineConstant,
    pub format: ExportFormat,
    /// Sections to include. Never empty.
    pub include: Vec<ExportSection>,
}

impl ExportRequest {
    /// An XLSX report with every section.
    pub fn new(source: ExportSource, constant: AffineConstant) -> Self {
        Self {
            source,
            constant,
            format: ExportFormat::default(),
            include: ExportSection::ALL.to_vec(),
        }
    }

    /// The file name the service will suggest for this export.
    #[must_use]
    pub fn suggested_filename(&self) -> String {
        let prefix = self.source.filename_prefix();
        match self.format {
            ExportFormat::Csv => format!("{prefix}_sbox.csv"),
            ExportFormat::Xlsx => match self.include.as_slice() {
                [ExportSection::Matrix] => format!("{prefix}_affine_matrix.xlsx"),
                [ExportSection::Sbox] => format!("{prefix}_sbox_table.xlsx"),
                [ExportSection::Analysis] => format!("{prefix}_analysis.xlsx"),
                _ => format!("{prefix}_report.xlsx"),
            },
        }
    }
}

/// A binary response body with the file name the service attached, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl DownloadedFile {
    /// The service's file name, or `fallback` when it sent none or sent one
    /// that is not a bare file name.
    #[must_use]
    pub fn filename_or(&self, fallback: &str) -> String {
        self.filename
            .as_deref()
            .and_then(bare_file_name)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Last path component of `name`, if it is a usable file name.
///
/// Both separators are stripped so a name written on another platform
/// cannot climb out of the directory it is saved to.
pub(crate) fn bare_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    match last {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}

/// Single-block AES request using the selected artifact as S-box source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherRequest {
    /// Plaintext for encryption, 32 hex digits for decryption.
    pub text: String,
    pub key: String,
    pub artifact: ArtifactRef,
}

/// Output of an AES call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherOutput {
    /// Ciphertext (hex) after encryption, plaintext after decryption.
    pub text: String,
    /// The S-box the service reports having used.
    pub sbox_used: String,
}

/// An image file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Image encryption or decryption request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCipherRequest {
    pub image: ImageUpload,
    pub key: String,
    pub artifact: ArtifactRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(format: ExportFormat, include: &[ExportSection]) -> ExportRequest {
        ExportRequest {
            source: ExportSource::Predefined {
                id: "k44".to_string(),
            },
            constant: AffineConstant::AES,
            format,
            include: include.to_vec(),
        }
    }

    #[test]
    fn test_suggested_filenames() {
        use ExportSection::{Analysis, Matrix, Sbox};

        assert_eq!(
            request(ExportFormat::Xlsx, &[Matrix]).suggested_filename(),
            "sbox_k44_affine_matrix.xlsx"
        );
        assert_eq!(
            request(ExportFormat::Xlsx, &[Sbox]).suggested_filename(),
            "sbox_k44_sbox_table.xlsx"
        );
        assert_eq!(
            request(ExportFormat::Xlsx, &[Analysis]).suggested_filename(),
            "sbox_k44_analysis.xlsx"
        );
        assert_eq!(
            request(ExportFormat::Xlsx, &[Matrix, Analysis]).suggested_filename(),
            "sbox_k44_report.xlsx"
        );
        assert_eq!(
            request(ExportFormat::Csv, &[Matrix]).suggested_filename(),
            "sbox_k44_sbox.csv"
        );
    }

    #[test]
    fn test_custom_matrix_prefix() {
        let source = ExportSource::CustomMatrix {
            matrix: BinaryMatrix::identity(8),
        };
        let request = ExportRequest::new(source, AffineConstant::AES);
        assert_eq!(request.include.len(), 3);
        assert_eq!(request.suggested_filename(), "sbox_custom_report.xlsx");
    }

    #[test]
    fn test_remote_validation_failure_shape() {
        let json = r#"{"valid":false,"matrix":null,"rank":null,"invertible":null,"error":"Matrix must be 8x8","details":{"rows":7}}"#;
        let result: RemoteValidation = serde_json::from_str(json).unwrap();
        assert!(!result.valid);
        assert_eq!(result.error.as_deref(), Some("Matrix must be 8x8"));
    }

    #[test]
    fn test_download_name_never_leaves_directory() {
        let download = |name: &str| DownloadedFile {
            filename: Some(name.to_string()),
            bytes: Vec::new(),
        };
        let fallback = "sbox_k44_report.xlsx";

        assert_eq!(download("../x").filename_or(fallback), "x");
        assert_eq!(download("/abs/x").filename_or(fallback), "x");
        assert_eq!(download("..\\..\\x.png").filename_or(fallback), "x.png");
        assert_eq!(download("..").filename_or(fallback), fallback);
        assert_eq!(download("dir/").filename_or(fallback), fallback);
        assert_eq!(download("report.xlsx").filename_or(fallback), "report.xlsx");
    }
}
