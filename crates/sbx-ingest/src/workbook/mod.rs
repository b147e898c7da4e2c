//! Spreadsheet workbook decoding (first sheet only).

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{IngestError, Result};
use crate::format::TabularFormat;
use crate::grid::{Cell, Grid};

/// Decodes the first sheet of an `.xlsx`/`.xls` workbook.
///
/// The container type is sniffed from the bytes. Every row of the sheet's
/// used range is data; there is no header row. The used range is
/// rectangular, so trailing empty cells are trimmed to give each row its
/// written width.
pub(crate) fn decode_workbook(bytes: &[u8]) -> Result<Grid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IngestError::decode(TabularFormat::Workbook, e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::decode(TabularFormat::Workbook, "workbook has no sheets"))?
        .map_err(|e| IngestError::decode(TabularFormat::Workbook, e.to_string()))?;

    let rows = range
        .rows()
        .map(|row| {
            let width = row
                .iter()
                .rposition(|data| !matches!(data, Data::Empty))
                .map_or(0, |last| last + 1);
            row[..width].iter().map(to_cell).collect()
        })
        .collect();

    Ok(Grid::from_rows(rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}
