//! Layered configuration for tweakforge.
//!
//! Values resolve, highest precedence first, from command-line flags,
//! `TWEAKFORGE_*` environment variables, a configuration file (named with
//! `--config-path` or `TWEAKFORGE_CONFIG_PATH`) and finally the built-in
//! defaults. Every field is optional in the layered sources; the accessor
//! methods fill in defaults so callers always see a complete value.
//!
//! The core crates never read configuration. [`Config::settings`] and
//! [`Config::script_options`] produce the plain values they take instead.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use tweakforge_compose::{ScriptOptions, Settings};

pub use defaults::{
    DEFAULT_HIGHLIGHT_THRESHOLD, DEFAULT_LOG_FILTER, default_log_format, default_reboot_countdown,
    default_settings,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved tweakforge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TWEAKFORGE")]
pub struct Config {
    /// Tracing filter expression, for example `info` or
    /// `tweakforge_compose=debug`.
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Log output format.
    #[serde(default)]
    pub log_format: Option<LogFormat>,
    /// Mask secrets and personal data in composed scripts.
    #[serde(default)]
    pub hide_sensitive: Option<bool>,
    /// Prefix each tweak with a metadata comment block.
    #[serde(default)]
    pub show_comments: Option<bool>,
    /// Write one script per tweak instead of a combined script.
    #[serde(default)]
    pub download_each_tweak: Option<bool>,
    /// Create a restore point before applying tweaks.
    #[serde(default)]
    pub auto_create_restore_point: Option<bool>,
    /// Ask for confirmation before exporting scripts.
    #[serde(default)]
    pub always_show_warning: Option<bool>,
    /// Soft-wrap long lines when numbering the gutter.
    #[serde(default)]
    pub word_wrap: Option<bool>,
    /// Show the line-number gutter.
    #[serde(default)]
    pub show_line_numbers: Option<bool>,
    /// Seconds the generated reboot prompt waits before restarting.
    #[serde(default)]
    pub reboot_countdown: Option<u32>,
    /// Logical line count at which highlighting moves off the calling thread.
    #[serde(default)]
    pub highlight_threshold: Option<usize>,
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Reboot countdown in seconds.
    #[must_use]
    pub fn reboot_countdown(&self) -> u32 {
        self.reboot_countdown.unwrap_or_else(default_reboot_countdown)
    }

    /// Highlight deferral threshold in logical lines.
    #[must_use]
    pub fn highlight_threshold(&self) -> usize {
        self.highlight_threshold.unwrap_or(DEFAULT_HIGHLIGHT_THRESHOLD)
    }

    /// Preference bundle passed by value into composition and presentation.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let defaults = default_settings();
        Settings {
            hide_sensitive: self.hide_sensitive.unwrap_or(defaults.hide_sensitive),
            show_comments: self.show_comments.unwrap_or(defaults.show_comments),
            download_each_tweak: self
                .download_each_tweak
                .unwrap_or(defaults.download_each_tweak),
            auto_create_restore_point: self
                .auto_create_restore_point
                .unwrap_or(defaults.auto_create_restore_point),
            always_show_warning: self
                .always_show_warning
                .unwrap_or(defaults.always_show_warning),
            word_wrap: self.word_wrap.unwrap_or(defaults.word_wrap),
            show_line_numbers: self
                .show_line_numbers
                .unwrap_or(defaults.show_line_numbers),
        }
    }

    /// Options baked into generated script text.
    #[must_use]
    pub fn script_options(&self) -> ScriptOptions {
        ScriptOptions {
            reboot_countdown_secs: self.reboot_countdown(),
        }
    }
}
