//! Preview/edit state machine over the three editor text slots.

use tracing::debug;

const STATE_TARGET: &str = "tweakforge_editor::state";

/// Whether the editor shows composed output or an editable buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Read-only view of the saved override or the composed script.
    #[default]
    Preview,
    /// The live buffer is being edited.
    Edit,
}

/// Inputs that drive [`EditorState::transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Enter edit mode with the currently displayed text.
    BeginEdit,
    /// Replace the live buffer with new editor contents.
    Edit(String),
    /// Keep the live buffer as the saved override and return to preview.
    Save,
    /// Drop the live buffer's changes and return to preview.
    Discard,
    /// The selection changed and produced freshly composed text.
    SelectionChanged {
        /// Composer output for the new selection.
        composed: String,
    },
    /// Settings changed without touching the selection.
    SettingsChanged {
        /// Composer output for the new settings.
        composed: String,
    },
}

impl EditorEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::BeginEdit => "begin_edit",
            Self::Edit(_) => "edit",
            Self::Save => "save",
            Self::Discard => "discard",
            Self::SelectionChanged { .. } => "selection_changed",
            Self::SettingsChanged { .. } => "settings_changed",
        }
    }
}

/// Editor text slots and mode.
///
/// `baseline` is the text captured when editing began, `live_buffer` holds
/// the current edits and `saved_override` the last explicitly saved text.
/// `composed` is the latest composer output, shown in preview when nothing
/// has been saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    mode: EditorMode,
    baseline: String,
    live_buffer: String,
    saved_override: Option<String>,
    composed: String,
}

impl EditorState {
    /// Creates a previewing state showing `composed`.
    #[must_use]
    pub fn new(composed: impl Into<String>) -> Self {
        Self {
            composed: composed.into(),
            ..Self::default()
        }
    }

    /// Applies `event` and returns the next state.
    ///
    /// Events that make no sense in the current mode leave the state as it
    /// is. Selection changes during an edit are ignored so in-progress work
    /// is never replaced.
    #[must_use]
    pub fn transition(self, event: EditorEvent) -> Self {
        let name = event.name();
        let from = self.mode;
        let next = match (from, event) {
            (EditorMode::Preview, EditorEvent::BeginEdit) => {
                let text = self.displayed_text().to_owned();
                Self {
                    mode: EditorMode::Edit,
                    baseline: text.clone(),
                    live_buffer: text,
                    ..self
                }
            }
            (EditorMode::Edit, EditorEvent::Edit(text)) => Self {
                live_buffer: text,
                ..self
            },
            (EditorMode::Edit, EditorEvent::Save) => Self {
                mode: EditorMode::Preview,
                baseline: self.live_buffer.clone(),
                saved_override: Some(self.live_buffer.clone()),
                ..self
            },
            (EditorMode::Edit, EditorEvent::Discard) => Self {
                mode: EditorMode::Preview,
                live_buffer: self.baseline.clone(),
                ..self
            },
            (EditorMode::Preview, EditorEvent::SelectionChanged { composed }) => {
                Self::new(composed)
            }
            (_, EditorEvent::SettingsChanged { composed }) => Self { composed, ..self },
            (mode, _) => {
                debug!(target: STATE_TARGET, event = name, ?mode, "event ignored");
                return self;
            }
        };
        debug!(target: STATE_TARGET, event = name, ?from, to = ?next.mode, "editor transition");
        next
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Text captured when the current or last edit began.
    #[must_use]
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Current edit buffer.
    #[must_use]
    pub fn live_buffer(&self) -> &str {
        &self.live_buffer
    }

    /// Last explicitly saved text, if any.
    #[must_use]
    pub fn saved_override(&self) -> Option<&str> {
        self.saved_override.as_deref()
    }

    /// Latest composer output.
    #[must_use]
    pub fn composed(&self) -> &str {
        &self.composed
    }

    /// Text the editor shows: the live buffer while editing, otherwise the
    /// saved override or, failing that, the composed script.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        match self.mode {
            EditorMode::Edit => &self.live_buffer,
            EditorMode::Preview => self.saved_override.as_deref().unwrap_or(&self.composed),
        }
    }

    /// True when the live buffer differs from the baseline.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.live_buffer != self.baseline
    }
}
