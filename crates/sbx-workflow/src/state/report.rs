//! The last successful analysis and how to show or export it.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use sbx_client::ExportRequest;
use sbx_model::{AnalysisResult, ExportFormat, ExportSection, SubstitutionTable};

use crate::error::ExportError;
use crate::state::Selection;

/// Snapshot of a settled analysis. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    artifact_label: String,
    result: AnalysisResult,
    settled_at: DateTime<Utc>,
}

impl Report {
    pub fn new(artifact_label: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            artifact_label: artifact_label.into(),
            result,
            settled_at: Utc::now(),
        }
    }

    /// What was analyzed, e.g. `"aes (constant 63)"`.
    #[must_use]
    pub fn artifact_label(&self) -> &str {
        &self.artifact_label
    }

    #[must_use]
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    #[must_use]
    pub fn settled_at(&self) -> DateTime<Utc> {
        self.settled_at
    }

    /// The derived table as `view` shows it.
    #[must_use]
    pub fn render_table(&self, view: TableView) -> TableRendering {
        view.render(&self.result.derived_table)
    }
}

/// How the derived S-box is displayed. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableView {
    /// Hex row/column indices and two-digit hex cells.
    #[default]
    Engineering,
    /// Decimal indices and values, as printed in papers.
    Paper,
}

impl TableView {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Engineering => Self::Paper,
            Self::Paper => Self::Engineering,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Engineering => "engineering (hex)",
            Self::Paper => "paper (decimal)",
        }
    }

    /// Formats `table` for display.
    ///
    /// Engineering rows and columns are labelled by their hex nibble; paper
    /// rows by the decimal index of their first entry and columns by decimal
    /// offset.
    #[must_use]
    pub fn render(&self, table: &SubstitutionTable) -> TableRendering {
        let order = table.order();
        let column_headers = (0..order)
            .map(|c| match self {
                Self::Engineering => format!("{c:X}"),
                Self::Paper => c.to_string(),
            })
            .collect();

        let rows = table
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let header = match self {
                    Self::Engineering => format!("{r:X}"),
                    Self::Paper => (r * order).to_string(),
                };
                let cells = row
                    .iter()
                    .map(|value| match self {
                        Self::Engineering => format!("{value:02X}"),
                        Self::Paper => value.to_string(),
                    })
                    .collect();
                (header, cells)
            })
            .collect();

        TableRendering {
            column_headers,
            rows,
        }
    }
}

/// A table laid out as text: column headers, then `(row header, cells)` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRendering {
    pub column_headers: Vec<String>,
    pub rows: Vec<(String, Vec<String>)>,
}

/// Export parameters the user can change between exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    include: BTreeSet<ExportSection>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            include: ExportSection::ALL.into_iter().collect(),
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn new(format: ExportFormat, include: impl IntoIterator<Item = ExportSection>) -> Self {
        Self {
            format,
            include: include.into_iter().collect(),
        }
    }

    /// Sections in report order.
    #[must_use]
    pub fn sections(&self) -> Vec<ExportSection> {
        self.include.iter().copied().collect()
    }

    /// Adds or removes a section.
    pub fn toggle_section(&mut self, section: ExportSection) {
        if !self.include.remove(&section) {
            self.include.insert(section);
        }
    }

    /// Builds the export request for `selection`.
    ///
    /// Rejects an empty selection, an uploaded S-box and an empty section set
    /// before anything is sent.
    pub fn plan(&self, selection: &Selection) -> Result<ExportRequest, ExportError> {
        let source = selection.export_source()?;
        if self.include.is_empty() {
            return Err(ExportError::NoSections);
        }

        Ok(ExportRequest {
            source,
            constant: selection.constant(),
            format: self.format,
            include: self.sections(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_model::{BinaryMatrix, MetricSet};

    fn aes_like_table() -> SubstitutionTable {
        let rows = (0..16)
            .map(|r| (0..16).map(|c| ((r * 16 + c) as u8) ^ 0x63).collect())
            .collect();
        SubstitutionTable::new(rows).unwrap()
    }

    #[test]
    fn test_engineering_view() {
        let rendering = TableView::Engineering.render(&aes_like_table());
        assert_eq!(rendering.column_headers[10], "A");
        assert_eq!(rendering.rows[15].0, "F");
        assert_eq!(rendering.rows[0].1[0], "63");
        assert_eq!(rendering.rows[15].1[15], "9C");
    }

    #[test]
    fn test_paper_view() {
        let rendering = TableView::Paper.render(&aes_like_table());
        assert_eq!(rendering.column_headers[10], "10");
        assert_eq!(rendering.rows[15].0, "240");
        assert_eq!(rendering.rows[0].1[0], "99");
        assert_eq!(rendering.rows[15].1[15], "156");
    }

    #[test]
    fn test_views_show_the_same_values() {
        let table = aes_like_table();
        let hex = TableView::Engineering.render(&table);
        let dec = TableView::Paper.render(&table);

        for (hex_row, dec_row) in hex.rows.iter().zip(&dec.rows) {
            for (h, d) in hex_row.1.iter().zip(&dec_row.1) {
                assert_eq!(u8::from_str_radix(h, 16).ok(), d.parse::<u8>().ok());
            }
        }
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(TableView::Engineering.toggled().toggled(), TableView::Engineering);
    }

    #[test]
    fn test_report_keeps_result() {
        let result = AnalysisResult {
            derived_matrix: Some(BinaryMatrix::identity(8)),
            derived_table: aes_like_table(),
            metrics: MetricSet {
                nl: 112,
                sac: 0.5,
                bic_nl: 112,
                bic_sac: 0.5,
                lap: 0.0625,
                dap: 0.015625,
                du: 4,
                ad: 7,
                to: 7.86,
                ci: 0,
            },
            fixed_points: vec![],
            elapsed_ms: 40,
        };
        let report = Report::new("aes (constant 63)", result.clone());
        assert_eq!(report.result(), &result);
        assert_eq!(report.render_table(TableView::Paper).rows.len(), 16);
    }

    #[test]
    fn test_plan_defaults_to_full_xlsx_report() {
        let mut selection = Selection::default();
        selection.choose_predefined("aes");

        let request = ExportOptions::default().plan(&selection).unwrap();
        assert_eq!(request.format, ExportFormat::Xlsx);
        assert_eq!(request.include, ExportSection::ALL.to_vec());
        assert_eq!(request.suggested_filename(), "sbox_aes_report.xlsx");
    }

    #[test]
    fn test_plan_rejects_uploaded_table() {
        let mut selection = Selection::default();
        selection.set_uploaded_table(SubstitutionTable::identity(), "s.csv");
        assert_eq!(
            ExportOptions::default().plan(&selection),
            Err(ExportError::UnsupportedArtifact)
        );
    }

    #[test]
    fn test_plan_rejects_empty_sections() {
        let mut selection = Selection::default();
        selection.choose_predefined("aes");
        let mut options = ExportOptions::new(ExportFormat::Xlsx, [ExportSection::Sbox]);
        options.toggle_section(ExportSection::Sbox);

        assert_eq!(options.plan(&selection), Err(ExportError::NoSections));
    }

    #[test]
    fn test_sections_keep_report_order() {
        let options = ExportOptions::new(
            ExportFormat::Xlsx,
            [ExportSection::Analysis, ExportSection::Matrix],
        );
        assert_eq!(
            options.sections(),
            vec![ExportSection::Matrix, ExportSection::Analysis]
        );
    }
}
