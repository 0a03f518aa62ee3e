//! Event types for communication between the background runtime and UI.

use coderunner_core::{Action, Effect};

/// Events sent from background tasks to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A request finished; its completion is fed to the reducer.
    Completed(Action),
}

/// Commands sent from UI to background tasks.
#[derive(Debug)]
pub enum BackendCommand {
    /// Perform an effect emitted by the reducer.
    Perform(Effect),

    /// Quit the application.
    Quit,
}
