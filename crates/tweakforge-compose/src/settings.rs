//! Settings bundle passed by value into composition and presentation.

use serde::{Deserialize, Serialize};

/// Default length of the post-run reboot countdown, in seconds.
pub const DEFAULT_REBOOT_COUNTDOWN_SECS: u32 = 30;

/// User preferences that shape composition and presentation.
///
/// The bundle is always supplied by the caller; nothing in the core reads
/// preferences from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Mask secrets and personal data in tweak code.
    pub hide_sensitive: bool,
    /// Prefix each block with a comment built from the tweak's metadata.
    pub show_comments: bool,
    /// Emit one artifact per tweak instead of a combined script.
    pub download_each_tweak: bool,
    /// Try to create a restore point before applying tweaks.
    pub auto_create_restore_point: bool,
    /// Ask the export collaborator to confirm before delivering artifacts.
    pub always_show_warning: bool,
    /// Soft-wrap long lines in the editor.
    pub word_wrap: bool,
    /// Show the line-number gutter in the editor.
    pub show_line_numbers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide_sensitive: true,
            show_comments: true,
            download_each_tweak: false,
            auto_create_restore_point: true,
            always_show_warning: true,
            word_wrap: true,
            show_line_numbers: true,
        }
    }
}

/// Parameters baked into the generated script text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Seconds the reboot prompt waits before restarting by default.
    pub reboot_countdown_secs: u32,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            reboot_countdown_secs: DEFAULT_REBOOT_COUNTDOWN_SECS,
        }
    }
}
