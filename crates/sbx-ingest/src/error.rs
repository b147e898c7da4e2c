//! Error types for tabular decoding.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::TabularFormat;

/// Errors that can occur while reading or decoding an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Format Errors ===
    /// File extension is not one of the supported tabular formats.
    #[error("unsupported file format '{extension}' for {name}: use CSV or XLSX")]
    UnsupportedFormat { name: String, extension: String },

    /// The underlying format reader failed.
    #[error("failed to decode {format} file: {message}")]
    Decode {
        format: TabularFormat,
        message: String,
    },

    /// Text is in an encoding the CSV reader cannot handle.
    #[error("{name} is encoded as {encoding}; save it as UTF-8")]
    UnsupportedEncoding {
        name: String,
        encoding: &'static str,
    },

    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is larger than the upload limit.
    #[error("{path} is {size} bytes, larger than the {max_size} byte upload limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },
}

impl IngestError {
    pub(crate) fn decode(format: TabularFormat, message: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/matrix.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/matrix.csv");
    }

    #[test]
    fn test_decode_error_carries_message() {
        let err = IngestError::decode(TabularFormat::Workbook, "invalid zip header");
        assert_eq!(
            err.to_string(),
            "failed to decode workbook file: invalid zip header"
        );
    }
}
