//! Analysis and image-cipher results.

use serde::{Deserialize, Serialize};

use crate::matrix::BinaryMatrix;
use crate::table::SubstitutionTable;

/// The ten cryptographic metrics computed for an S-box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Nonlinearity.
    pub nl: u32,
    /// Strict avalanche criterion.
    pub sac: f64,
    /// Bit independence criterion, nonlinearity.
    #[serde(rename = "bicNl")]
    pub bic_nl: u32,
    /// Bit independence criterion, SAC.
    #[serde(rename = "bicSac")]
    pub bic_sac: f64,
    /// Linear approximation probability.
    pub lap: f64,
    /// Differential approximation probability.
    pub dap: f64,
    /// Differential uniformity.
    pub du: u32,
    /// Algebraic degree.
    pub ad: u32,
    /// Transparency order.
    pub to: f64,
    /// Correlation immunity.
    pub ci: u32,
}

impl MetricSet {
    /// Ordered `(short name, long name, formatted value)` triples for display.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &'static str, String)> {
        vec![
            ("NL", "Nonlinearity", self.nl.to_string()),
            ("SAC", "Strict Avalanche Criterion", format!("{:.4}", self.sac)),
            ("BIC-NL", "BIC Nonlinearity", self.bic_nl.to_string()),
            ("BIC-SAC", "BIC Strict Avalanche Criterion", format!("{:.4}", self.bic_sac)),
            ("LAP", "Linear Approximation Probability", format!("{:.6}", self.lap)),
            ("DAP", "Differential Approximation Probability", format!("{:.6}", self.dap)),
            ("DU", "Differential Uniformity", self.du.to_string()),
            ("AD", "Algebraic Degree", self.ad.to_string()),
            ("TO", "Transparency Order", format!("{:.4}", self.to)),
            ("CI", "Correlation Immunity", self.ci.to_string()),
        ]
    }
}

/// Everything one successful analysis returns.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The matrix the table was built from; `None` when a table was analyzed directly.
    pub derived_matrix: Option<BinaryMatrix>,
    /// The S-box that was analyzed.
    pub derived_table: SubstitutionTable,
    pub metrics: MetricSet,
    /// Distinguished (fixed) points: indices `x` with `S[x] = x`.
    pub fixed_points: Vec<usize>,
    /// Time the service spent computing, in milliseconds.
    pub elapsed_ms: u64,
}

/// Statistics comparing an original image with its encryption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageMetrics {
    /// Shannon entropy of the encrypted image (ideal: 8).
    pub entropy: f64,
    /// Number of pixels change rate, in percent.
    pub npcr: f64,
    /// Unified average changing intensity, in percent.
    pub uaci: f64,
    #[serde(rename = "correlationH")]
    pub correlation_horizontal: f64,
    #[serde(rename = "correlationV")]
    pub correlation_vertical: f64,
    #[serde(rename = "correlationD")]
    pub correlation_diagonal: f64,
}

impl ImageMetrics {
    /// Ordered `(name, formatted value)` pairs for display.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Entropy", format!("{:.4}", self.entropy)),
            ("NPCR (%)", format!("{:.4}", self.npcr)),
            ("UACI (%)", format!("{:.4}", self.uaci)),
            ("Correlation (horizontal)", format!("{:.4}", self.correlation_horizontal)),
            ("Correlation (vertical)", format!("{:.4}", self.correlation_vertical)),
            ("Correlation (diagonal)", format!("{:.4}", self.correlation_diagonal)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_set_wire_names() {
        let json = r#"{"nl":112,"sac":0.5049,"bicNl":112,"bicSac":0.5046,"lap":0.0625,"dap":0.015625,"du":4,"ad":7,"to":7.8601,"ci":0}"#;
        let metrics: MetricSet = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.nl, 112);
        assert_eq!(metrics.bic_nl, 112);
        assert_eq!(metrics.du, 4);

        let entries = metrics.entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0], ("NL", "Nonlinearity", "112".to_string()));
        assert_eq!(entries[4].2, "0.062500");
    }

    #[test]
    fn test_image_metrics_wire_names() {
        let json = r#"{"entropy":7.99,"npcr":99.6,"uaci":33.4,"correlationH":0.01,"correlationV":-0.02,"correlationD":0.0}"#;
        let metrics: ImageMetrics = serde_json::from_str(json).unwrap();
        assert!((metrics.correlation_vertical + 0.02).abs() < f64::EPSILON);
        assert_eq!(metrics.entries().len(), 6);
    }
}
