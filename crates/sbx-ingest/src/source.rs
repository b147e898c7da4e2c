//! Uploaded file contents and pre-read guards.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum upload size accepted by the analysis service (1 MiB).
pub const MAX_UPLOAD_SIZE: u64 = 1024 * 1024;

/// An uploaded file: its display name (used for format dispatch) and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Check file size against a limit before loading.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a file from disk after checking its size.
///
/// The file name (not the full path) becomes [`SourceFile::name`].
pub fn read_source_file(path: &Path, max_size: u64) -> Result<SourceFile> {
    check_file_size(path, max_size)?;

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SourceFile { name, bytes })
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
