//! Supported tabular formats and extension dispatch.

use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// The decoding strategy for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabularFormat {
    /// Comma-separated text (`.csv`).
    DelimitedText,
    /// Spreadsheet workbook (`.xlsx`, `.xls`).
    Workbook,
}

impl TabularFormat {
    /// Extensions accepted for each format, lowercase without the dot.
    pub const CSV_EXTENSIONS: &'static [&'static str] = &["csv"];
    pub const WORKBOOK_EXTENSIONS: &'static [&'static str] = &["xlsx", "xls"];

    /// Picks a format from the file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if Self::CSV_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::DelimitedText)
        } else if Self::WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Workbook)
        } else {
            Err(IngestError::UnsupportedFormat {
                name: name.to_string(),
                extension,
            })
        }
    }
}

impl fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DelimitedText => f.write_str("CSV"),
            Self::Workbook => f.write_str("workbook"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(
            TabularFormat::from_file_name("a.csv").unwrap(),
            TabularFormat::DelimitedText
        );
        assert_eq!(
            TabularFormat::from_file_name("dir/B.XLSX").unwrap(),
            TabularFormat::Workbook
        );
        assert_eq!(
            TabularFormat::from_file_name("old.xls").unwrap(),
            TabularFormat::Workbook
        );
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        for name in ["matrix.txt", "matrix", "matrix.csv.bak"] {
            let err = TabularFormat::from_file_name(name).unwrap_err();
            assert!(
                matches!(err, IngestError::UnsupportedFormat { .. }),
                "{name} should be unsupported"
            );
        }
    }
}
