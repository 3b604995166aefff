//! Per-tweak processing, combination policy and artifact assembly.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};
use tweakforge_redact::redact_with_report;

use crate::annotate::annotation;
use crate::cleanup::clean_code;
use crate::error::TweakProcessingError;
use crate::settings::{ScriptOptions, Settings};
use crate::tweak::{Selection, Tweak};
use crate::wrap::wrap_script;

const COMPOSE_TARGET: &str = "tweakforge_compose::compose";

/// Text shown in place of a script when nothing is selected.
pub const EMPTY_SELECTION_PLACEHOLDER: &str =
    "# No tweaks selected. Pick one or more tweaks to build a script.";
/// File name of the single artifact produced by combining all tweaks.
pub const COMBINED_FILE_NAME: &str = "combined-tweaks.ps1";
/// File name of the artifact produced from a hand-edited script.
pub const CUSTOM_FILE_NAME: &str = "custom-script.ps1";

const SCRIPT_EXTENSION: &str = ".ps1";

/// The combination policy a composition was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    /// Nothing was selected and no custom script was supplied.
    Empty,
    /// A hand-edited script was emitted verbatim.
    Custom,
    /// Each tweak became its own artifact.
    PerTweak,
    /// All tweaks were joined into one artifact.
    Combined,
}

/// One deliverable script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name, always ending in `.ps1`.
    pub file_name: String,
    /// Processed tweak blocks before wrapping.
    pub body: String,
    /// Final script text handed to export collaborators.
    pub script: String,
}

/// A tweak that was emitted without redaction or annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeWarning {
    /// Id of the affected tweak.
    pub tweak_id: String,
    /// Title of the affected tweak.
    pub title: String,
    /// What went wrong.
    pub error: TweakProcessingError,
}

impl fmt::Display for ComposeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tweak '{}' ({}) was included unprocessed: {}",
            self.title, self.tweak_id, self.error
        )
    }
}

/// Result of composing a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    mode: CombineMode,
    artifacts: Vec<Artifact>,
    warnings: Vec<ComposeWarning>,
    confirm_before_export: bool,
}

impl Composition {
    /// Artifacts in selection order.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Consumes the composition, returning its artifacts.
    #[must_use]
    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }

    /// Non-fatal problems met while processing individual tweaks.
    #[must_use]
    pub fn warnings(&self) -> &[ComposeWarning] {
        &self.warnings
    }

    /// Combination policy that produced the artifacts.
    #[must_use]
    pub const fn mode(&self) -> CombineMode {
        self.mode
    }

    /// Whether export collaborators should ask for confirmation first.
    #[must_use]
    pub const fn confirm_before_export(&self) -> bool {
        self.confirm_before_export
    }

    /// Text an editor displays for this composition.
    ///
    /// Returns [`EMPTY_SELECTION_PLACEHOLDER`] when there are no artifacts,
    /// otherwise every artifact's script separated by one blank line.
    #[must_use]
    pub fn preview_text(&self) -> String {
        if self.artifacts.is_empty() {
            return EMPTY_SELECTION_PLACEHOLDER.to_owned();
        }
        self.artifacts
            .iter()
            .map(|artifact| artifact.script.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Inputs to [`compose_with`] beyond the selection and settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions<'a> {
    /// Values baked into the wrapper text.
    pub script: ScriptOptions,
    /// Hand-edited script that replaces per-tweak composition entirely.
    pub custom_script: Option<&'a str>,
}

/// Composes `selection` with default [`ComposeOptions`].
#[must_use]
pub fn compose(selection: &Selection, settings: &Settings) -> Composition {
    compose_with(selection, settings, ComposeOptions::default())
}

/// Composes `selection` into artifacts.
///
/// The combination policy is chosen in priority order: a custom script is
/// emitted verbatim, then `download_each_tweak` yields one artifact per
/// tweak, otherwise all processed blocks are joined with a single blank line
/// between them.
#[must_use]
pub fn compose_with(
    selection: &Selection,
    settings: &Settings,
    options: ComposeOptions<'_>,
) -> Composition {
    let confirm_before_export = settings.always_show_warning;

    if let Some(custom) = options.custom_script {
        debug!(target: COMPOSE_TARGET, bytes = custom.len(), "emitting custom script");
        return Composition {
            mode: CombineMode::Custom,
            artifacts: vec![Artifact {
                file_name: CUSTOM_FILE_NAME.to_owned(),
                body: custom.to_owned(),
                script: custom.to_owned(),
            }],
            warnings: Vec::new(),
            confirm_before_export,
        };
    }

    if selection.is_empty() {
        return Composition {
            mode: CombineMode::Empty,
            artifacts: Vec::new(),
            warnings: Vec::new(),
            confirm_before_export,
        };
    }

    let mut warnings = Vec::new();
    let blocks: Vec<(&Tweak, String)> = selection
        .iter()
        .map(|tweak| {
            let (block, failure) = process_tweak(tweak, settings);
            if let Some(error) = failure {
                let warning = ComposeWarning {
                    tweak_id: tweak.id.clone(),
                    title: tweak.title.clone(),
                    error,
                };
                warn!(target: COMPOSE_TARGET, tweak_id = %tweak.id, "{warning}");
                warnings.push(warning);
            }
            (tweak, block)
        })
        .collect();

    let (mode, artifacts) = if settings.download_each_tweak {
        (CombineMode::PerTweak, per_tweak_artifacts(&blocks, settings, options.script))
    } else {
        let body = blocks
            .iter()
            .map(|(_, block)| block.as_str())
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        let script = wrap_script(&body, *settings, options.script);
        (
            CombineMode::Combined,
            vec![Artifact {
                file_name: COMBINED_FILE_NAME.to_owned(),
                body,
                script,
            }],
        )
    };

    debug!(
        target: COMPOSE_TARGET,
        tweaks = selection.len(),
        artifacts = artifacts.len(),
        warnings = warnings.len(),
        ?mode,
        "composed selection"
    );
    Composition {
        mode,
        artifacts,
        warnings,
        confirm_before_export,
    }
}

fn per_tweak_artifacts(
    blocks: &[(&Tweak, String)],
    settings: &Settings,
    script: ScriptOptions,
) -> Vec<Artifact> {
    let mut taken = HashSet::new();
    blocks
        .iter()
        .enumerate()
        .map(|(index, (tweak, block))| {
            let base = sanitize_file_name(&tweak.title, index + 1);
            let file_name = unique_name(&base, &mut taken);
            Artifact {
                file_name,
                body: block.clone(),
                script: wrap_script(block, *settings, script),
            }
        })
        .collect()
}

fn unique_name(base: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_owned()) {
        return base.to_owned();
    }
    let stem = base.strip_suffix(SCRIPT_EXTENSION).unwrap_or(base);
    let mut suffix = 2_usize;
    loop {
        let candidate = format!("{stem}-{suffix}{SCRIPT_EXTENSION}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Derives a per-tweak file name from its title.
///
/// Every character outside `[A-Za-z0-9_-]` in the trimmed title becomes
/// `_`. When the title is blank or sanitizes to nothing but separators,
/// `tweak-{position}.ps1` is used instead; `position` is one-based.
#[must_use]
pub fn sanitize_file_name(title: &str, position: usize) -> String {
    let sanitized: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.chars().any(|c| c.is_ascii_alphanumeric()) {
        format!("{sanitized}{SCRIPT_EXTENSION}")
    } else {
        format!("tweak-{position}{SCRIPT_EXTENSION}")
    }
}

/// Returns the block to emit for `tweak` and the failure, if processing
/// fell back to the cleaned code.
fn process_tweak(tweak: &Tweak, settings: &Settings) -> (String, Option<TweakProcessingError>) {
    let cleaned = clean_code(&tweak.code);
    match processed_block(tweak, &cleaned, settings) {
        Ok(block) => (block, None),
        Err(error) => (cleaned, Some(error)),
    }
}

fn processed_block(
    tweak: &Tweak,
    cleaned: &str,
    settings: &Settings,
) -> Result<String, TweakProcessingError> {
    check_text(cleaned)?;

    let code = if settings.hide_sensitive {
        let redaction = redact_with_report(cleaned);
        if !redact_with_report(&redaction.text).is_unchanged() {
            return Err(TweakProcessingError::unstable_redaction(redaction.total()));
        }
        debug!(
            target: COMPOSE_TARGET,
            tweak_id = %tweak.id,
            substitutions = redaction.total(),
            "redacted tweak"
        );
        redaction.text
    } else {
        cleaned.to_owned()
    };

    if !settings.show_comments {
        return Ok(code);
    }
    let header = annotation(tweak);
    if code.is_empty() {
        Ok(header)
    } else {
        Ok(format!("{header}\n{code}"))
    }
}

fn check_text(code: &str) -> Result<(), TweakProcessingError> {
    for (index, line) in code.split('\n').enumerate() {
        if let Some(bad) = line.chars().find(|c| c.is_control() && *c != '\t') {
            return Err(TweakProcessingError::binary_content(index + 1, u32::from(bad)));
        }
    }
    Ok(())
}
