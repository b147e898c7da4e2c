//! CLI argument definitions for `sbox-studio`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sbx_model::{AffineConstant, ExportFormat, ExportSection};

#[derive(Parser, Debug)]
#[command(
    name = "sbox-studio",
    version,
    about = "Explore affine-matrix S-boxes through the S-box analysis service",
    long_about = "Pick a predefined affine matrix or upload your own matrix or S-box,\n\
                  then analyze it, export a report, or use it for AES over text and images.\n\n\
                  Uploads (CSV, XLSX, XLS) are validated locally before anything is sent."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Analysis service URL (overrides the settings file).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (overrides the settings file).
    #[arg(
        long = "timeout",
        value_name = "SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the predefined matrices offered by the service.
    List,

    /// Show one predefined matrix.
    Show {
        /// Catalogue ID (see `list`).
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Check a matrix or S-box file without analyzing it.
    Validate(ValidateArgs),

    /// Build the S-box and compute its cryptographic metrics.
    Analyze(AnalyzeArgs),

    /// Download an analysis report.
    Export(ExportArgs),

    /// Encrypt one block of text with AES using the selected S-box.
    Encrypt(CipherArgs),

    /// Decrypt one block of hex ciphertext with AES using the selected S-box.
    Decrypt(CipherArgs),

    /// Encrypt, decrypt or compare images.
    #[command(subcommand)]
    Image(ImageCommand),

    /// Show the settings file location and effective settings.
    Config {
        /// Write the effective settings to the settings file.
        #[arg(long = "init")]
        init: bool,
    },
}

/// The artifact to work with: a catalogue entry or a local file.
#[derive(Args, Debug, Clone)]
#[group(id = "artifact", required = true, multiple = false)]
pub struct ArtifactArgs {
    /// Predefined matrix ID.
    #[arg(long = "id", value_name = "ID")]
    pub id: Option<String>,

    /// Matrix or S-box file (CSV, XLSX or XLS).
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,

    /// What `--file` contains.
    #[arg(long = "kind", value_enum, default_value = "matrix")]
    pub kind: KindArg,

    /// Affine constant as two hex digits (default from settings, else 63).
    #[arg(long = "constant", value_name = "HEX")]
    pub constant: Option<AffineConstant>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to check.
    #[arg(value_name = "PATH")]
    pub file: PathBuf,

    #[arg(long = "kind", value_enum, default_value = "matrix")]
    pub kind: KindArg,

    /// Also reject singular matrices.
    #[arg(long = "require-invertible")]
    pub require_invertible: bool,

    /// Ask the service to validate the matrix file instead.
    #[arg(long = "remote", conflicts_with = "kind")]
    pub remote: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// How to print the derived S-box (default from settings).
    #[arg(long = "view", value_enum)]
    pub view: Option<ViewArg>,

    /// Skip printing the derived S-box.
    #[arg(long = "no-table")]
    pub no_table: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Report format (xlsx or csv).
    #[arg(long = "format", value_name = "FORMAT", default_value = "xlsx")]
    pub format: ExportFormat,

    /// Sections to include (matrix, sbox, analysis).
    #[arg(
        long = "include",
        value_name = "SECTIONS",
        value_delimiter = ',',
        default_value = "matrix,sbox,analysis"
    )]
    pub include: Vec<ExportSection>,

    /// Output file or directory (default: service file name in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CipherArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Plaintext to encrypt, or 32 hex digits to decrypt.
    #[arg(long = "text", value_name = "TEXT")]
    pub text: String,

    /// Cipher key (padded or truncated to 16 bytes by the service).
    #[arg(long = "key", value_name = "KEY")]
    pub key: String,
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Encrypt an image with the selected S-box.
    Encrypt(ImageCipherArgs),

    /// Decrypt an image with the selected S-box.
    Decrypt(ImageCipherArgs),

    /// Compare an original and an encrypted image.
    Analyze {
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        #[arg(value_name = "ENCRYPTED")]
        encrypted: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ImageCipherArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Image to transform.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[arg(long = "key", value_name = "KEY")]
    pub key: String,

    /// Output file or directory (default: service file name in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// What an uploaded file contains.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    /// 8×8 binary affine matrix
    Matrix,
    /// 16×16 substitution table
    Table,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ViewArg {
    Engineering,
    Paper,
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_must_be_positive() {
        let err = Cli::try_parse_from(["sbox-studio", "--timeout", "0", "list"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let cli = Cli::try_parse_from(["sbox-studio", "--timeout", "5", "list"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_artifact_source_is_required() {
        let err = Cli::try_parse_from(["sbox-studio", "analyze"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
