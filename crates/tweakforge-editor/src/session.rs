//! An editor instance: state machine, highlighting and gutter together.

use tweakforge_compose::{
    ComposeOptions, Composition, ScriptOptions, Selection, Settings, compose_with,
};
use tracing::debug;
use tweakforge_lexer::Token;

use crate::gutter::Gutter;
use crate::highlight::{DEFAULT_HIGHLIGHT_THRESHOLD, HighlightStatus, Highlighter};
use crate::layout::RowHeightProvider;
use crate::state::{EditorEvent, EditorMode, EditorState};

const SESSION_TARGET: &str = "tweakforge_editor::session";

/// Tunables for an [`EditorSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Logical line count at which highlighting is deferred.
    pub highlight_threshold: usize,
    /// Values baked into composed scripts.
    pub script: ScriptOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
            script: ScriptOptions::default(),
        }
    }
}

/// One mounted editor.
///
/// Owns the selection and settings it composes from. Every change to the
/// displayed text bumps a revision, schedules re-highlighting and
/// invalidates the gutter.
#[derive(Debug)]
pub struct EditorSession {
    selection: Selection,
    settings: Settings,
    script: ScriptOptions,
    state: EditorState,
    highlighter: Highlighter,
    gutter: Gutter,
    revision: u64,
}

impl EditorSession {
    /// Mounts an editor previewing the composition of `selection`.
    #[must_use]
    pub fn new(selection: Selection, settings: Settings, options: SessionOptions) -> Self {
        let composed = preview(&selection, &settings, options.script);
        let mut session = Self {
            selection,
            settings,
            script: options.script,
            state: EditorState::new(composed),
            highlighter: Highlighter::new(options.highlight_threshold),
            gutter: Gutter::new(),
            revision: 0,
        };
        session.refresh();
        session
    }

    /// Replaces the selection.
    ///
    /// In preview this drops any saved override and shows the new
    /// composition. While editing the change is ignored.
    pub fn set_selection(&mut self, selection: Selection) {
        if self.state.mode() == EditorMode::Edit {
            debug!(
                target: SESSION_TARGET,
                tweaks = selection.len(),
                "selection change ignored while editing"
            );
            return;
        }
        self.selection = selection;
        let composed = preview(&self.selection, &self.settings, self.script);
        self.apply(EditorEvent::SelectionChanged { composed });
    }

    /// Replaces the settings, recomposing without touching a saved override.
    pub fn set_settings(&mut self, settings: Settings) {
        let wrap_changed = self.settings.word_wrap != settings.word_wrap;
        self.settings = settings;
        let composed = preview(&self.selection, &self.settings, self.script);
        self.apply(EditorEvent::SettingsChanged { composed });
        if wrap_changed {
            self.gutter.invalidate();
        }
    }

    /// Enters edit mode.
    pub fn begin_edit(&mut self) {
        self.apply(EditorEvent::BeginEdit);
    }

    /// Replaces the edit buffer.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.apply(EditorEvent::Edit(text.into()));
    }

    /// Saves the edit buffer as the override and returns to preview.
    pub fn save(&mut self) {
        self.apply(EditorEvent::Save);
    }

    /// Discards the edit buffer and returns to preview.
    pub fn discard(&mut self) {
        self.apply(EditorEvent::Discard);
    }

    /// Current state slots.
    #[must_use]
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.state.mode()
    }

    /// Text currently shown.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        self.state.displayed_text()
    }

    /// True when the edit buffer has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Revision of the displayed text, bumped on every change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Latest available token rows, applying finished background passes.
    pub fn token_rows(&mut self) -> &[Vec<Token>] {
        self.highlighter.poll();
        self.highlighter.rows()
    }

    /// Token rows for the displayed text, blocking on a pending pass.
    pub fn wait_for_highlight(&mut self) -> &[Vec<Token>] {
        self.highlighter.wait()
    }

    /// True when highlighting lags behind the displayed text.
    #[must_use]
    pub const fn highlight_pending(&self) -> bool {
        self.highlighter.is_pending()
    }

    /// Gutter numbers for a container `width` wide, or `None` when line
    /// numbers are hidden.
    pub fn line_numbers<P>(&mut self, width: u32, provider: &P) -> Option<&Gutter>
    where
        P: RowHeightProvider + ?Sized,
    {
        if !self.settings.show_line_numbers {
            return None;
        }
        self.gutter.update(
            self.state.displayed_text(),
            self.revision,
            width,
            self.settings.word_wrap,
            provider,
        );
        Some(&self.gutter)
    }

    /// Artifacts to hand to export collaborators.
    ///
    /// A saved override replaces the per-tweak composition.
    #[must_use]
    pub fn export(&self) -> Composition {
        let options = ComposeOptions {
            script: self.script,
            custom_script: self.state.saved_override(),
        };
        compose_with(&self.selection, &self.settings, options)
    }

    fn apply(&mut self, event: EditorEvent) {
        let before = self.state.displayed_text().to_owned();
        let state = std::mem::take(&mut self.state);
        self.state = state.transition(event);
        if self.state.displayed_text() != before {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.gutter.invalidate();
        let status = self.highlighter.request(self.state.displayed_text());
        if status == HighlightStatus::Pending {
            debug!(
                target: SESSION_TARGET,
                revision = self.revision,
                "highlighting deferred"
            );
        }
    }
}

fn preview(selection: &Selection, settings: &Settings, script: ScriptOptions) -> String {
    let options = ComposeOptions {
        script,
        custom_script: None,
    };
    compose_with(selection, settings, options).preview_text()
}
