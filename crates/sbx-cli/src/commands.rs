//! Subcommand implementations.
//!
//! Everything that changes selection or workflow state goes through a
//! [`Session`]; `show` and `validate --remote` call the client directly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{Instrument, info_span};

use sbx_client::{ApiClient, ClientConfig, ImageUpload, SboxApi};
use sbx_ingest::{SourceFile, read_source_file};
use sbx_model::ArtifactKind;
use sbx_workflow::{
    AnalysisMessage, AppState, CatalogueMessage, CipherMessage, Effect, ExportMessage,
    ExportOptions, Message, SavedFile, SelectionMessage, Session, WorkflowStatus, load_upload,
};

use sbx_cli::render::{
    apply_table_style, catalogue_table, fixed_points_line, image_metrics_table, matrix_table,
    metrics_table, sbox_table,
};
use sbx_cli::settings::Settings;

use crate::cli::{
    AnalyzeArgs, CipherArgs, Command, ExportArgs, ImageCipherArgs, ImageCommand, KindArg,
    SourceArgs, ValidateArgs, ViewArg,
};

/// Runs `command` and returns the process exit code.
pub async fn run(command: Command, settings: &Settings) -> Result<i32> {
    match command {
        Command::List => run_list(settings).await,
        Command::Show { id } => run_show(settings, &id).await,
        Command::Validate(args) => run_validate(settings, &args).await,
        Command::Analyze(args) => run_analyze(settings, &args).await,
        Command::Export(args) => run_export(settings, &args).await,
        Command::Encrypt(args) => run_cipher(settings, &args, true).await,
        Command::Decrypt(args) => run_cipher(settings, &args, false).await,
        Command::Image(ImageCommand::Encrypt(args)) => run_image(settings, &args, true).await,
        Command::Image(ImageCommand::Decrypt(args)) => run_image(settings, &args, false).await,
        Command::Image(ImageCommand::Analyze {
            original,
            encrypted,
        }) => run_image_analyze(settings, &original, &encrypted).await,
        Command::Config { init } => run_config(settings, init),
    }
}

// =============================================================================
// Catalogue
// =============================================================================

async fn run_list(settings: &Settings) -> Result<i32> {
    let mut session = new_session(settings)?;
    session
        .dispatch(Message::Catalogue(CatalogueMessage::Refresh))
        .await;

    let state = session.state();
    if let Some(error) = state.catalogue_error() {
        bail!("list predefined matrices: {error}");
    }
    let catalogue = state.catalogue();
    if catalogue.is_empty() {
        println!("No predefined matrices.");
        return Ok(0);
    }
    println!("{}", catalogue_table(catalogue));
    Ok(0)
}

async fn run_show(settings: &Settings, id: &str) -> Result<i32> {
    let client = new_client(&settings.api)?;
    let detail = client
        .fetch_artifact(id)
        .await
        .with_context(|| format!("fetch matrix '{id}'"))?;

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec!["ID", detail.id.as_str()]);
    table.add_row(vec!["Name", detail.name.as_str()]);
    table.add_row(vec!["Author", detail.author.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Status", detail.status.as_str()]);
    let tags = detail.tags.join(", ");
    table.add_row(vec!["Tags", tags.as_str()]);
    let constant = detail
        .constant
        .map_or_else(|| "-".to_string(), |c| c.to_string());
    table.add_row(vec!["Constant", constant.as_str()]);
    println!("{table}");

    match &detail.matrix {
        Some(matrix) => {
            println!("{}", matrix_table(matrix));
            println!(
                "Rank {} ({})",
                matrix.rank(),
                if matrix.is_invertible() {
                    "invertible"
                } else {
                    "singular"
                }
            );
        }
        None => println!("No matrix data for this entry yet."),
    }
    Ok(0)
}

// =============================================================================
// Validation
// =============================================================================

async fn run_validate(settings: &Settings, args: &ValidateArgs) -> Result<i32> {
    let file = read_file(&args.file, settings)?;

    if args.remote {
        let client = new_client(&settings.api)?;
        let result = client
            .validate_remote(&file.name, file.bytes)
            .await
            .context("remote validation")?;
        if !result.valid {
            println!(
                "Invalid: {}",
                result.error.as_deref().unwrap_or("rejected by the service")
            );
            return Ok(1);
        }
        if let Some(matrix) = &result.matrix {
            println!("{}", matrix_table(matrix));
        }
        println!(
            "Valid matrix (rank {}, {})",
            result
                .rank
                .map_or_else(|| "?".to_string(), |r| r.to_string()),
            match result.invertible {
                Some(true) => "invertible",
                Some(false) => "singular",
                None => "invertibility unknown",
            }
        );
        return Ok(0);
    }

    let kind = artifact_kind(args.kind, settings);
    let mut options = settings.analysis.validate_options();
    options.require_invertible |= args.require_invertible;

    match load_upload(&file, kind, options) {
        Ok(artifact) => {
            if let Some(matrix) = artifact.as_matrix() {
                println!("{}", matrix_table(matrix));
                println!("Valid {kind} (rank {})", matrix.rank());
            }
            if let Some(table) = artifact.as_table() {
                let rendering = sbx_workflow::TableView::from(settings.display.table_view)
                    .render(table);
                println!("{}", sbox_table(&rendering));
                println!(
                    "Valid {kind} ({}, {})",
                    if table.is_bijective() {
                        "bijective"
                    } else {
                        "not bijective"
                    },
                    fixed_points_line(&table.fixed_points())
                );
            }
            Ok(0)
        }
        Err(err) => {
            println!("{}", err.user_message());
            Ok(1)
        }
    }
}

// =============================================================================
// Analysis and export
// =============================================================================

async fn run_analyze(settings: &Settings, args: &AnalyzeArgs) -> Result<i32> {
    let mut session = new_session(settings)?;
    select(&mut session, &args.source, settings).await?;

    let effect = session
        .dispatch(Message::Analysis(AnalysisMessage::Submit))
        .instrument(info_span!("analyze"))
        .await;
    if let Some(code) = report_outcome(&session, &effect)? {
        return Ok(code);
    }

    let state = session.state();
    let Some(report) = state.report() else {
        bail!("analysis settled without a report");
    };
    let result = report.result();

    println!("Artifact: {}", report.artifact_label());
    println!(
        "Completed in {} ms at {}",
        result.elapsed_ms,
        report.settled_at().to_rfc3339()
    );
    if let Some(matrix) = &result.derived_matrix {
        println!("{}", matrix_table(matrix));
    }
    println!("{}", metrics_table(&result.metrics));
    println!("{}", fixed_points_line(&result.fixed_points));

    if !args.no_table {
        let view = args
            .view
            .map_or_else(|| settings.display.table_view.into(), view_from_arg);
        println!("S-box ({} view)", view.label());
        println!("{}", sbox_table(&report.render_table(view)));
    }
    Ok(0)
}

async fn run_export(settings: &Settings, args: &ExportArgs) -> Result<i32> {
    let mut session = new_session_with(
        settings,
        ExportOptions::new(args.format, args.include.iter().copied()),
    )?;
    select(&mut session, &args.source, settings).await?;

    let effect = session
        .dispatch(Message::Export(ExportMessage::Submit))
        .await;
    if let Some(code) = report_outcome(&session, &effect)? {
        return Ok(code);
    }

    match &session.state().outputs().export {
        Some(file) => {
            let path = save(file, args.output.as_deref())?;
            println!("Exported {} bytes to {}", file.bytes.len(), path.display());
            Ok(0)
        }
        None => bail!("export settled without a file"),
    }
}

// =============================================================================
// Cipher
// =============================================================================

async fn run_cipher(settings: &Settings, args: &CipherArgs, encrypt: bool) -> Result<i32> {
    let mut session = new_session(settings)?;
    select(&mut session, &args.source, settings).await?;

    let message = if encrypt {
        CipherMessage::Encrypt {
            plaintext: args.text.clone(),
            key: args.key.clone(),
        }
    } else {
        CipherMessage::Decrypt {
            ciphertext: args.text.clone(),
            key: args.key.clone(),
        }
    };
    let effect = session.dispatch(Message::Cipher(message)).await;
    if let Some(code) = report_outcome(&session, &effect)? {
        return Ok(code);
    }

    match &session.state().outputs().cipher {
        Some(output) => {
            println!("{}", output.text);
            println!("S-box used: {}", output.sbox_used);
            Ok(0)
        }
        None => bail!("cipher call settled without output"),
    }
}

async fn run_image(settings: &Settings, args: &ImageCipherArgs, encrypt: bool) -> Result<i32> {
    let mut session = new_session(settings)?;
    select(&mut session, &args.source, settings).await?;

    let image = read_image(&args.image)?;
    let key = args.key.clone();
    let message = if encrypt {
        CipherMessage::ImageEncrypt { image, key }
    } else {
        CipherMessage::ImageDecrypt { image, key }
    };
    let effect = session.dispatch(Message::Cipher(message)).await;
    if let Some(code) = report_outcome(&session, &effect)? {
        return Ok(code);
    }

    match &session.state().outputs().image {
        Some(file) => {
            let path = save(file, args.output.as_deref())?;
            println!("Wrote {}", path.display());
            Ok(0)
        }
        None => bail!("image call settled without a file"),
    }
}

async fn run_image_analyze(settings: &Settings, original: &Path, encrypted: &Path) -> Result<i32> {
    let mut session = new_session(settings)?;
    let effect = session
        .dispatch(Message::Cipher(CipherMessage::ImageAnalyze {
            original: read_image(original)?,
            encrypted: read_image(encrypted)?,
        }))
        .await;
    if let Some(code) = report_outcome(&session, &effect)? {
        return Ok(code);
    }

    match &session.state().outputs().image_metrics {
        Some(metrics) => {
            println!("{}", image_metrics_table(metrics));
            Ok(0)
        }
        None => bail!("image analysis settled without metrics"),
    }
}

// =============================================================================
// Settings
// =============================================================================

fn run_config(settings: &Settings, init: bool) -> Result<i32> {
    let path = Settings::config_path();
    if init {
        settings.save_to(&path)?;
        println!("Wrote {}", path.display());
    } else {
        println!("# {}", path.display());
        print!(
            "{}",
            toml::to_string_pretty(settings).context("serialize settings")?
        );
    }
    Ok(0)
}

// =============================================================================
// Helpers
// =============================================================================

fn new_client(config: &ClientConfig) -> Result<ApiClient> {
    ApiClient::new(config).context("create service client")
}

fn new_session(settings: &Settings) -> Result<Session<ApiClient>> {
    new_session_with(settings, ExportOptions::default())
}

fn new_session_with(
    settings: &Settings,
    export_options: ExportOptions,
) -> Result<Session<ApiClient>> {
    let client = new_client(&settings.api)?;
    let mut state = AppState::new(settings.analysis.constant);
    state.validate_options = settings.analysis.validate_options();
    state.table_view = settings.display.table_view.into();
    state.export_options = export_options;
    Ok(Session::new(client, state).with_timeout(settings.api.timeout))
}

/// Puts the artifact named by `source` into the session's selection.
async fn select(
    session: &mut Session<ApiClient>,
    source: &SourceArgs,
    settings: &Settings,
) -> Result<()> {
    if let Some(constant) = source.constant {
        session
            .dispatch(Message::Selection(SelectionMessage::ConstantChanged(
                constant,
            )))
            .await;
    }

    if let Some(id) = &source.artifact.id {
        session
            .dispatch(Message::Selection(SelectionMessage::PredefinedChosen(
                id.clone(),
            )))
            .await;
    } else if let Some(path) = &source.artifact.file {
        let file = read_file(path, settings)?;
        session
            .dispatch(Message::Selection(SelectionMessage::UploadProvided {
                file,
                kind: artifact_kind(source.kind, settings),
            }))
            .await;
        if let Some(notice) = session.state().upload_notice() {
            bail!("{}: {notice}", path.display());
        }
    }
    Ok(())
}

/// Prints why a submission did not succeed. `None` means it settled successfully.
fn report_outcome(session: &Session<ApiClient>, effect: &Effect) -> Result<Option<i32>> {
    if let Effect::Rejected(reason) = effect {
        bail!("{reason}");
    }

    let workflow = session.state().workflow();
    match workflow.status() {
        WorkflowStatus::Settled => Ok(None),
        WorkflowStatus::Failed => {
            let operation = workflow
                .last_operation()
                .map_or_else(|| "request".to_string(), |op| op.to_string());
            eprintln!(
                "error: {operation} failed: {}",
                workflow.error().unwrap_or("unknown error")
            );
            Ok(Some(1))
        }
        status => bail!("unexpected workflow status after dispatch: {status}"),
    }
}

fn read_file(path: &Path, settings: &Settings) -> Result<SourceFile> {
    read_source_file(path, settings.ingest.max_upload_size)
        .with_context(|| format!("read {}", path.display()))
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| "image.png".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(ImageUpload::new(name, bytes))
}

/// Writes `file` to `output`, a file path or an existing directory.
fn save(file: &SavedFile, output: Option<&Path>) -> Result<PathBuf> {
    let path = match output {
        Some(path) if path.is_dir() => path.join(&file.filename),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&file.filename),
    };
    std::fs::write(&path, &file.bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

fn artifact_kind(kind: KindArg, settings: &Settings) -> ArtifactKind {
    match kind {
        KindArg::Matrix => settings.analysis.matrix_kind(),
        KindArg::Table => settings.analysis.table_kind(),
    }
}

fn view_from_arg(view: ViewArg) -> sbx_workflow::TableView {
    match view {
        ViewArg::Engineering => sbx_workflow::TableView::Engineering,
        ViewArg::Paper => sbx_workflow::TableView::Paper,
    }
}
