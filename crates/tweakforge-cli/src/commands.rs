//! Subcommand implementations.

use std::fs;
use std::io::{Read, Write};
use std::process::ExitCode;

use camino::Utf8Path;
use serde::Deserialize;
use tracing::{debug, info};
use tweakforge_compose::{ComposeOptions, Selection, Tweak, compose_with};
use tweakforge_config::Config;
use tweakforge_editor::{Gutter, Highlighter, MonospaceRows, TokenRows};
use tweakforge_lexer::Token;
use tweakforge_redact::redact_with_report;

use crate::cli::{CliCommand, HighlightOutput};
use crate::{AppError, IoStreams};

const COMMAND_TARGET: &str = "tweakforge_cli::commands";

const EXPORT_NOTICE: &str = "notice: review generated scripts before running them; they change system settings and may restart the machine";

/// Row height used for monospace gutter estimates. Only the ratio matters.
const GUTTER_ROW_HEIGHT: f64 = 1.0;

/// Accepted shapes of a selection file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SelectionFile {
    Tweaks(Vec<Tweak>),
    Wrapped { tweaks: Vec<Tweak> },
}

impl From<SelectionFile> for Selection {
    fn from(file: SelectionFile) -> Self {
        match file {
            SelectionFile::Tweaks(tweaks) | SelectionFile::Wrapped { tweaks } => {
                Self::from(tweaks)
            }
        }
    }
}

pub(crate) fn execute<R, W, E>(
    command: CliCommand,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<ExitCode, AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    match command {
        CliCommand::Compose {
            selection,
            out_dir,
            custom_script,
        } => compose(
            &selection,
            out_dir.as_deref(),
            custom_script.as_deref(),
            config,
            io,
        ),
        CliCommand::Highlight { file, output } => highlight(&file, output, config, io),
        CliCommand::Redact { file } => redact(file.as_deref(), io),
        CliCommand::Gutter { file, columns } => gutter(&file, columns, config, io),
    }
}

fn read_file(path: &Utf8Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::read_input(path, source))
}

pub(crate) fn parse_selection(path: &Utf8Path, text: &str) -> Result<Selection, AppError> {
    serde_json::from_str::<SelectionFile>(text)
        .map(Selection::from)
        .map_err(|source| AppError::ParseSelection {
            path: path.to_path_buf(),
            source,
        })
}

fn compose<R, W, E>(
    selection_path: &Utf8Path,
    out_dir: Option<&Utf8Path>,
    custom_path: Option<&Utf8Path>,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<ExitCode, AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let selection = parse_selection(selection_path, &read_file(selection_path)?)?;
    let custom_script = custom_path.map(read_file).transpose()?;
    let options = ComposeOptions {
        script: config.script_options(),
        custom_script: custom_script.as_deref(),
    };
    let composition = compose_with(&selection, &config.settings(), options);
    debug!(
        target: COMMAND_TARGET,
        tweaks = selection.len(),
        artifacts = composition.artifacts().len(),
        "composition finished"
    );

    for warning in composition.warnings() {
        writeln!(io.stderr, "warning: {warning}")?;
    }
    if composition.confirm_before_export() {
        writeln!(io.stderr, "{EXPORT_NOTICE}")?;
    }

    match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| AppError::CreateOutputDir {
                path: dir.to_path_buf(),
                source,
            })?;
            for artifact in composition.artifacts() {
                let path = dir.join(&artifact.file_name);
                fs::write(&path, format!("{}\n", artifact.script)).map_err(|source| {
                    AppError::WriteArtifact {
                        path: path.clone(),
                        source,
                    }
                })?;
                info!(target: COMMAND_TARGET, path = %path, "wrote artifact");
                writeln!(io.stdout, "{path}")?;
            }
        }
        None => writeln!(io.stdout, "{}", composition.preview_text())?,
    }
    Ok(ExitCode::SUCCESS)
}

fn highlight<R, W, E>(
    path: &Utf8Path,
    output: HighlightOutput,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<ExitCode, AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let text = read_file(path)?;
    let mut highlighter = Highlighter::new(config.highlight_threshold());
    highlighter.request(trim_final_newline(&text));
    let rows: TokenRows = highlighter.wait().to_vec();
    match output {
        HighlightOutput::Json => {
            serde_json::to_writer(&mut *io.stdout, &rows).map_err(AppError::SerialiseTokens)?;
            writeln!(io.stdout)?;
        }
        HighlightOutput::Human => {
            for (index, row) in rows.iter().enumerate() {
                writeln!(io.stdout, "{:>4}: {}", index + 1, render_row(row))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn render_row(row: &[Token]) -> String {
    row.iter()
        .map(|token| format!("{}:{:?}", token.kind().as_str(), token.value()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn redact<R, W, E>(
    path: Option<&Utf8Path>,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<ExitCode, AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let text = match path {
        Some(file) => read_file(file)?,
        None => {
            let mut buffer = String::new();
            io.stdin
                .read_to_string(&mut buffer)
                .map_err(AppError::ReadStdin)?;
            buffer
        }
    };
    let redaction = redact_with_report(&text);
    info!(
        target: COMMAND_TARGET,
        emails = redaction.emails,
        secrets = redaction.secrets,
        tokens = redaction.tokens,
        "redacted input"
    );
    io.stdout.write_all(redaction.text.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

fn gutter<R, W, E>(
    path: &Utf8Path,
    columns: usize,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<ExitCode, AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let text = read_file(path)?;
    let body = trim_final_newline(&text);
    let provider = MonospaceRows::new(columns, GUTTER_ROW_HEIGHT);
    let width = u32::try_from(provider.columns()).unwrap_or(u32::MAX);
    let mut gutter = Gutter::new();
    gutter.update(body, 0, width, config.settings().word_wrap, &provider);

    let digits = gutter.visual_rows().to_string().len();
    for (start, line) in gutter.line_starts().iter().zip(body.split('\n')) {
        writeln!(io.stdout, "{start:>digits$} {line}")?;
    }
    Ok(ExitCode::SUCCESS)
}

fn trim_final_newline(text: &str) -> &str {
    let without_lf = text.strip_suffix('\n').unwrap_or(text);
    without_lf.strip_suffix('\r').unwrap_or(without_lf)
}
