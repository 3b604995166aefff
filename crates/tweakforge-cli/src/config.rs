//! Configuration loading for the CLI.
//!
//! Leading configuration flags are split off and handed to `ortho_config`;
//! everything from the first other token onwards is parsed as a subcommand.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use tweakforge_config::Config;

use crate::AppError;

/// Flags understood by the configuration loader.
///
/// Must list every field of [`Config`] plus `--config-path`.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--hide-sensitive",
    "--show-comments",
    "--download-each-tweak",
    "--auto-create-restore-point",
    "--always-show-warning",
    "--word-wrap",
    "--show-line-numbers",
    "--reboot-countdown",
    "--highlight-threshold",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the leading configuration arguments.
    ///
    /// Configuration flags must appear before the subcommand; later ones are
    /// parsed as subcommand arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let mut flag_parts = argument_text.splitn(2, '=');
    let flag = flag_parts.next().unwrap_or_default();
    let has_inline_value = flag_parts.next().is_some();

    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits `args` into the program name plus configuration flags, and the
/// program name plus the subcommand tokens.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut remaining = args.iter();
    let Some(program) = remaining.next() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut command_arguments = vec![program.clone()];
    let mut pending_value = false;

    for argument in remaining.by_ref() {
        if pending_value {
            config_arguments.push(argument.clone());
            pending_value = false;
            continue;
        }
        match process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                pending_value = needs_value;
            }
            FlagAction::Skip => {
                command_arguments.push(argument.clone());
                break;
            }
        }
    }
    command_arguments.extend(remaining.cloned());

    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
