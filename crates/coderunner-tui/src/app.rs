//! Application state and main event loop.

use std::time::Duration;

use chrono::Local;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use coderunner_core::Action;

use crate::editor::Editor;
use crate::event::{BackendCommand, UiEvent};
use crate::state::{Focus, UiState};
use crate::ui;

/// Main application with UI state and channel handles.
pub struct App {
    /// Current UI state snapshot for rendering.
    state: UiState,

    /// Receiver for events from the backend.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for commands to the backend.
    cmd_tx: mpsc::Sender<BackendCommand>,

    should_quit: bool,
}

impl App {
    /// Create a new application instance with channel handles.
    pub fn new(
        state: UiState,
        ui_rx: mpsc::Receiver<UiEvent>,
        cmd_tx: mpsc::Sender<BackendCommand>,
    ) -> Self {
        Self {
            state,
            ui_rx,
            cmd_tx,
            should_quit: false,
        }
    }

    /// Preload the editor buffer.
    pub fn load_code(&mut self, code: &str) {
        self.state.editor = Editor::from_text(code);
        self.dispatch(Action::EditCode(code.to_string()));
    }

    /// Request the task list.
    pub fn start(&mut self) {
        self.state.status_message = Some("Loading tasks...".to_string());
        self.dispatch(Action::Init);
    }

    /// Run the main event loop.
    ///
    /// This runs on the main thread and handles:
    /// - Drawing the UI
    /// - Processing keyboard input
    /// - Receiving completions from the backend
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        while !self.should_quit {
            // Draw the UI
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            // Process backend events (non-blocking)
            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }
        }

        // Send quit command to backend
        let _ = self.cmd_tx.blocking_send(BackendCommand::Quit);

        Ok(())
    }

    /// Feed an action to the reducer and forward its effect to the backend.
    fn dispatch(&mut self, action: Action) {
        let (view, effect) = std::mem::take(&mut self.state.view).reduce(action);
        self.state.view = view;

        if let Some(effect) = effect {
            debug!(effect = effect.kind(), "Sending effect to backend");
            if let Err(e) = self.cmd_tx.blocking_send(BackendCommand::Perform(effect)) {
                warn!(error = %e, "Backend is gone");
                self.state.status_message = Some("Backend stopped".to_string());
            }
        }
    }

    /// Apply an event from the backend to the UI state.
    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Completed(action) => {
                let finished = matches!(action, Action::ExecutionFinished(_));
                let tasks_loaded = matches!(action, Action::TasksLoaded(_));

                self.dispatch(action);

                if tasks_loaded {
                    self.state.clamp_cursor();
                }
                if finished && !self.state.view.is_loading {
                    self.state.finished_at = Some(Local::now());
                }
                self.update_status();
            }
        }
    }

    /// Update the status message based on current state.
    fn update_status(&mut self) {
        let view = &self.state.view;
        self.state.status_message = Some(if let Some(notice) = &view.notice {
            notice.clone()
        } else if view.is_loading {
            self.state.language.labels().running.to_string()
        } else {
            match &self.state.finished_at {
                Some(at) => format!(
                    "Tasks: {} | Last run at {}",
                    view.tasks.len(),
                    at.format("%H:%M:%S")
                ),
                None => format!("Tasks: {}", view.tasks.len()),
            }
        });
    }

    fn submit(&mut self) {
        if !self.state.view.can_submit() {
            if !self.state.view.is_loading {
                self.state.status_message =
                    Some("Select a task and enter code before running".to_string());
            }
            return;
        }
        self.dispatch(Action::Submit);
        self.update_status();
    }

    /// Handle a key press.
    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Keys that work regardless of focus
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return;
            }
            KeyCode::F(5) => {
                self.submit();
                return;
            }
            _ => {}
        }

        match self.state.focus {
            Focus::Tasks => self.handle_list_key(key.code),
            Focus::Editor => self.handle_editor_key(key),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }

            KeyCode::Tab | KeyCode::Char('e') => {
                self.state.focus = Focus::Editor;
            }

            // Up/Down or j/k navigation
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_prev_task();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next_task();
            }

            // Enter - select the highlighted task
            KeyCode::Enter => {
                if let Some(name) = self.state.highlighted_task().map(str::to_string) {
                    self.dispatch(Action::SelectTask(name));
                }
            }

            // Reload task list
            KeyCode::Char('r') => {
                self.state.status_message = Some("Loading tasks...".to_string());
                self.dispatch(Action::Init);
            }

            KeyCode::Char('l') => {
                self.state.language = self.state.language.toggle();
            }

            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        // Only plain or shifted characters are text; other chords are ignored.
        let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();

        let editor = &mut self.state.editor;
        let edited = match key.code {
            KeyCode::Esc => {
                self.state.focus = Focus::Tasks;
                return;
            }
            KeyCode::Char(c) if plain => {
                editor.insert_char(c);
                true
            }
            KeyCode::Enter => {
                editor.insert_newline();
                true
            }
            KeyCode::Tab => {
                editor.insert_indent();
                true
            }
            KeyCode::Backspace => {
                editor.backspace();
                true
            }
            KeyCode::Delete => {
                editor.delete();
                true
            }
            KeyCode::Left => {
                editor.move_left();
                false
            }
            KeyCode::Right => {
                editor.move_right();
                false
            }
            KeyCode::Up => {
                editor.move_up();
                false
            }
            KeyCode::Down => {
                editor.move_down();
                false
            }
            KeyCode::Home => {
                editor.home();
                false
            }
            KeyCode::End => {
                editor.end();
                false
            }
            _ => false,
        };

        if edited {
            let code = self.state.editor.text();
            self.dispatch(Action::EditCode(code));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coderunner_core::{Effect, ExecutionRequest, TaskSummary, EXECUTION_FAILED};

    fn app() -> (App, mpsc::Sender<UiEvent>, mpsc::Receiver<BackendCommand>) {
        let (ui_tx, ui_rx) = mpsc::channel(16);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let app = App::new(UiState::new("http://test", Default::default()), ui_rx, cmd_tx);
        (app, ui_tx, cmd_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn loaded(app: &mut App) {
        app.apply_event(UiEvent::Completed(Action::TasksLoaded(Ok(vec![
            TaskSummary::new("sum-two"),
            TaskSummary::new("reverse"),
        ]))));
    }

    fn performed(rx: &mut mpsc::Receiver<BackendCommand>) -> Option<Effect> {
        match rx.try_recv() {
            Ok(BackendCommand::Perform(effect)) => Some(effect),
            _ => None,
        }
    }

    #[test]
    fn test_start_requests_tasks() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        app.start();
        assert_eq!(performed(&mut cmd_rx), Some(Effect::LoadTasks));
    }

    #[test]
    fn test_enter_selects_highlighted_task() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        loaded(&mut app);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.view.selected_task.as_deref(), Some("reverse"));
        assert_eq!(
            performed(&mut cmd_rx),
            Some(Effect::FetchDetail("reverse".to_string()))
        );
    }

    #[test]
    fn test_list_cursor_wraps() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        loaded(&mut app);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.state.highlighted_task(), Some("reverse"));
    }

    #[test]
    fn test_typing_updates_code() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        press(&mut app, KeyCode::Tab);
        for c in "print(1)".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.state.view.code, "print(1)");

        // 'q' is text inside the editor
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.state.view.code, "print(1)q");
    }

    #[test]
    fn test_modified_chars_are_not_text() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        app.state.focus = Focus::Editor;

        ctrl(&mut app, 'z');
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT));
        assert_eq!(app.state.view.code, "");

        app.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.state.view.code, "Ab");
    }

    #[test]
    fn test_submit_without_code_sends_nothing() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        loaded(&mut app);
        press(&mut app, KeyCode::Enter);
        let _ = performed(&mut cmd_rx);

        ctrl(&mut app, 's');
        assert_eq!(performed(&mut cmd_rx), None);
        assert!(!app.state.view.is_loading);
    }

    #[test]
    fn test_submit_round_trip() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        loaded(&mut app);
        press(&mut app, KeyCode::Enter);
        let _ = performed(&mut cmd_rx);
        app.load_code("print(3)");

        press(&mut app, KeyCode::F(5));
        assert_eq!(
            performed(&mut cmd_rx),
            Some(Effect::Execute {
                task: "sum-two".to_string(),
                request: ExecutionRequest {
                    code: "print(3)".to_string()
                },
            })
        );

        // A second submit while in flight is ignored.
        ctrl(&mut app, 's');
        assert_eq!(performed(&mut cmd_rx), None);

        app.apply_event(UiEvent::Completed(Action::ExecutionFinished(Err(
            "HTTP 500".to_string(),
        ))));
        assert_eq!(app.state.view.result, EXECUTION_FAILED);
        assert!(!app.state.view.is_loading);
        assert!(app.state.finished_at.is_some());
    }

    #[test]
    fn test_language_toggle() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state.language, coderunner_core::Language::Ru);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let (mut app, _ui_tx, _cmd_rx) = self::app();
        app.state.focus = Focus::Editor;
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }
}
