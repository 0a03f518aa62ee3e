//! UI state for rendering.

use chrono::{DateTime, Local};

use coderunner_core::{Language, ViewState};

use crate::editor::Editor;

/// Panel receiving key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tasks,
    Editor,
}

/// Snapshot of data for rendering (no async, no locks).
#[derive(Debug, Default)]
pub struct UiState {
    /// Reducer-owned state: tasks, selection, code, result.
    pub view: ViewState,

    /// Panel with keyboard focus.
    pub focus: Focus,

    /// Highlighted row in the task list.
    pub cursor: usize,

    /// Editor buffer backing `view.code`.
    pub editor: Editor,

    /// Label language.
    pub language: Language,

    /// Status message to display in footer.
    pub status_message: Option<String>,

    /// When the last submission finished.
    pub finished_at: Option<DateTime<Local>>,

    /// Service base URL, shown in the header.
    pub base_url: String,
}

impl UiState {
    pub fn new(base_url: impl Into<String>, language: Language) -> Self {
        Self {
            base_url: base_url.into(),
            language,
            ..Self::default()
        }
    }

    /// Name of the task under the list cursor.
    pub fn highlighted_task(&self) -> Option<&str> {
        self.view.tasks.get(self.cursor).map(|t| t.name.as_str())
    }

    pub fn select_next_task(&mut self) {
        if !self.view.tasks.is_empty() {
            self.cursor = (self.cursor + 1) % self.view.tasks.len();
        }
    }

    pub fn select_prev_task(&mut self) {
        if !self.view.tasks.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.view.tasks.len() - 1);
        }
    }

    /// Keep the list cursor inside the task list after it changes.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.view.tasks.len().saturating_sub(1));
    }
}
