use tweakforge_compose::{DEFAULT_REBOOT_COUNTDOWN_SECS, Settings};

use crate::logging::LogFormat;

pub use tweakforge_editor::DEFAULT_HIGHLIGHT_THRESHOLD;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default countdown, in seconds, before the generated script reboots.
#[must_use]
pub const fn default_reboot_countdown() -> u32 {
    DEFAULT_REBOOT_COUNTDOWN_SECS
}

/// Default preference bundle handed to the composer and editor.
#[must_use]
pub fn default_settings() -> Settings {
    Settings::default()
}
