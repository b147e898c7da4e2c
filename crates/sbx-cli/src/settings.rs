//! Persisted user settings.
//!
//! Stored as TOML in the platform config directory. A missing file means
//! defaults; every field may be omitted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sbx_client::ClientConfig;
use sbx_ingest::MAX_UPLOAD_SIZE;
use sbx_model::{AffineConstant, ArtifactKind, MATRIX_ORDER, TABLE_ORDER};
use sbx_validate::ValidateOptions;
use sbx_workflow::TableView;

/// File name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the analysis service runs.
    pub api: ClientConfig,
    pub analysis: AnalysisSettings,
    pub ingest: IngestSettings,
    pub display: DisplaySettings,
}

impl Settings {
    /// Loads from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults. An explicitly named file must
    /// exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    tracing::debug!(path = %path.display(), "No settings file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings from {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("parse settings in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("write settings to {}", path.display()))
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "SboxStudio", "sbox-studio")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Defaults for building and checking artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Affine constant used when none is given on the command line.
    pub constant: AffineConstant,
    /// Reject singular matrices at upload time.
    pub require_invertible: bool,
    pub matrix_order: usize,
    pub table_order: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            constant: AffineConstant::AES,
            require_invertible: false,
            matrix_order: MATRIX_ORDER,
            table_order: TABLE_ORDER,
        }
    }
}

impl AnalysisSettings {
    #[must_use]
    pub fn matrix_kind(&self) -> ArtifactKind {
        ArtifactKind::Matrix {
            order: self.matrix_order,
        }
    }

    #[must_use]
    pub fn table_kind(&self) -> ArtifactKind {
        ArtifactKind::Table {
            order: self.table_order,
        }
    }

    #[must_use]
    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            require_invertible: self.require_invertible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Largest file accepted for upload, in bytes.
    pub max_upload_size: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_upload_size: MAX_UPLOAD_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub table_view: TableViewSetting,
}

/// How derived S-boxes are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableViewSetting {
    /// Hex indices and values.
    #[default]
    Engineering,
    /// Decimal indices and values.
    Paper,
}

impl From<TableViewSetting> for TableView {
    fn from(setting: TableViewSetting) -> Self {
        match setting {
            TableViewSetting::Engineering => Self::Engineering,
            TableViewSetting::Paper => Self::Paper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [api]
            base_url = "http://analysis.local:9000"

            [display]
            table_view = "paper"
            "#,
        )
        .unwrap();

        assert_eq!(settings.api.base_url, "http://analysis.local:9000");
        assert_eq!(settings.api.timeout, sbx_client::DEFAULT_TIMEOUT);
        assert_eq!(settings.display.table_view, TableViewSetting::Paper);
        assert_eq!(settings.analysis, AnalysisSettings::default());
        assert_eq!(settings.ingest.max_upload_size, MAX_UPLOAD_SIZE);
    }

    #[test]
    fn test_constant_is_hex_text() {
        let settings: Settings = toml::from_str("[analysis]\nconstant = \"1F\"\n").unwrap();
        assert_eq!(settings.analysis.constant.value(), 0x1F);

        let err = toml::from_str::<Settings>("[analysis]\nconstant = \"zz\"\n").unwrap_err();
        assert!(err.to_string().contains("zz"), "{err}");
    }

    #[test]
    fn test_kinds_follow_orders() {
        let analysis = AnalysisSettings::default();
        assert_eq!(analysis.matrix_kind(), ArtifactKind::matrix());
        assert_eq!(analysis.table_kind(), ArtifactKind::table());
    }
}
