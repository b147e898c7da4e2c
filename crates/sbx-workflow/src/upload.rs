//! Local upload pipeline: decode, then validate.

use sbx_ingest::SourceFile;
use sbx_model::{Artifact, ArtifactKind};
use sbx_validate::ValidateOptions;

use crate::error::UploadError;

/// Turns an uploaded file into a typed artifact of `kind`.
pub fn load_upload(
    file: &SourceFile,
    kind: ArtifactKind,
    options: ValidateOptions,
) -> Result<Artifact, UploadError> {
    let grid = sbx_ingest::decode(file)?;
    let artifact = sbx_validate::validate_with(&grid, kind, options)?;

    tracing::info!(file = %file.name, kind = %kind, "Upload accepted");
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_ingest::IngestError;

    fn identity_csv(order: usize) -> Vec<u8> {
        (0..order)
            .map(|r| {
                (0..order)
                    .map(|c| if r == c { "1" } else { "0" })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
            .into_bytes()
    }

    #[test]
    fn test_csv_matrix_upload() {
        let file = SourceFile::new("identity.csv", identity_csv(8));
        let artifact = load_upload(&file, ArtifactKind::matrix(), ValidateOptions::default())
            .unwrap();
        assert_eq!(artifact.as_matrix().map(|m| m.rank()), Some(8));
    }

    #[test]
    fn test_unsupported_format_is_ingest_error() {
        let file = SourceFile::new("identity.txt", identity_csv(8));
        let err = load_upload(&file, ArtifactKind::matrix(), ValidateOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            UploadError::Ingest(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_wrong_kind_is_validation_error() {
        let file = SourceFile::new("identity.csv", identity_csv(8));
        let err = load_upload(&file, ArtifactKind::table(), ValidateOptions::default())
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Wrong dimensions: expected 16 rows, found 8."
        );
    }
}
