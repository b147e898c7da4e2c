//! CSV reading into raw grids.

use crate::error::{IngestError, Result};
use crate::format::TabularFormat;
use crate::grid::{Cell, Grid};

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
fn validate_encoding(name: &str, bytes: &[u8]) -> Result<()> {
    if bytes.len() >= 2 {
        // UTF-16 LE BOM
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                name: name.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                name: name.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Decodes header-less comma-separated text.
///
/// Every line is a data row. Rows may differ in width; fields are trimmed and
/// blank fields become [`Cell::Empty`].
pub(crate) fn decode_delimited(name: &str, bytes: &[u8]) -> Result<Grid> {
    validate_encoding(name, bytes)?;

    // UTF-8 BOM is acceptable
    let content = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| IngestError::decode(TabularFormat::DelimitedText, e.to_string()))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Grid::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_rows() {
        let grid = decode_delimited("m.csv", b"1,0,1\n0,1,0\n").unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.rows()[0][2], Cell::Text("1".to_string()));
    }

    #[test]
    fn test_trailing_blank_lines_are_dropped() {
        let grid = decode_delimited("m.csv", b"1,0\n0,1\n\n,\n \n").unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_ragged_rows_are_preserved() {
        let grid = decode_delimited("m.csv", b"1,0,1\n0,1\n").unwrap();
        assert_eq!(grid.rows()[0].len(), 3);
        assert_eq!(grid.rows()[1].len(), 2);
    }

    #[test]
    fn test_fields_are_trimmed_and_quoted_values_kept() {
        let grid = decode_delimited("m.csv", b" 1 ,\"0\", \n").unwrap();
        assert_eq!(
            grid.rows()[0],
            vec![
                Cell::Text("1".to_string()),
                Cell::Text("0".to_string()),
                Cell::Empty
            ]
        );
    }

    #[test]
    fn test_utf8_bom_is_skipped() {
        let grid = decode_delimited("m.csv", b"\xEF\xBB\xBF1,0\n").unwrap();
        assert_eq!(grid.rows()[0][0], Cell::Text("1".to_string()));
    }

    #[test]
    fn test_utf16_is_rejected() {
        let err = decode_delimited("m.csv", &[0xFF, 0xFE, b'1', 0]).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_a_decode_error() {
        let err = decode_delimited("m.csv", b"1,\xC3\x28\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Decode {
                format: TabularFormat::DelimitedText,
                ..
            }
        ));
    }
}
