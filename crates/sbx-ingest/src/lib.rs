//! Tabular file decoding.
//!
//! This crate turns an uploaded spreadsheet-like file into a rectangular
//! [`Grid`] of untyped cells. It knows nothing about matrices or S-boxes;
//! shape and value checks live in `sbx-validate`.
//!
//! # Features
//!
//! - **Format dispatch**: by file extension (`.csv`, `.xlsx`, `.xls`)
//! - **CSV**: comma-separated, header-less, ragged rows preserved
//! - **Workbooks**: first sheet only, every row treated as data
//! - **Blank rows**: rows whose cells are all empty are dropped
//! - **Guards**: size limit and UTF-16 rejection before parsing
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sbx_ingest::{decode, read_source_file, MAX_UPLOAD_SIZE};
//!
//! let file = read_source_file(Path::new("matrix.csv"), MAX_UPLOAD_SIZE)?;
//! let grid = decode(&file)?;
//! println!("{} rows", grid.len());
//! ```

mod csv;
mod error;
mod format;
mod grid;
mod source;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Grid ===
pub use grid::{Cell, Grid};

// === Formats ===
pub use format::TabularFormat;

// === Source Files ===
pub use source::{MAX_UPLOAD_SIZE, SourceFile, check_file_size, read_source_file};

/// Decodes a file into a grid, dispatching on its extension.
///
/// Unrecognized extensions fail with [`IngestError::UnsupportedFormat`]
/// before any bytes are inspected.
pub fn decode(file: &SourceFile) -> Result<Grid> {
    let format = TabularFormat::from_file_name(&file.name)?;

    tracing::debug!(
        file = %file.name,
        format = %format,
        bytes = file.bytes.len(),
        "Decoding tabular file"
    );

    let grid = match format {
        TabularFormat::DelimitedText => csv::decode_delimited(&file.name, &file.bytes)?,
        TabularFormat::Workbook => workbook::decode_workbook(&file.bytes)?,
    };

    tracing::debug!(file = %file.name, rows = grid.len(), "Decoded grid");
    Ok(grid)
}

/// Reads and decodes a file from disk, enforcing the default upload size limit.
pub fn decode_path(path: &std::path::Path) -> Result<Grid> {
    let file = read_source_file(path, MAX_UPLOAD_SIZE)?;
    decode(&file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_fails_before_parsing() {
        let file = SourceFile::new("matrix.json", b"[[1,0],[0,1]]".to_vec());
        let err = decode(&file).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_decode_dispatches_to_csv() {
        let file = SourceFile::new("M.CSV", b"1,0\n0,1\n".to_vec());
        let grid = decode(&file).unwrap();
        assert_eq!(grid.len(), 2);
    }
}
