//! Background task that performs requests against the task service.

use tokio::sync::mpsc;
use tracing::{debug, info};

use coderunner_client::{perform, HttpClient};

use crate::event::{BackendCommand, UiEvent};

/// Run the background command loop.
///
/// This function runs in a separate thread with its own tokio runtime.
/// Every effect is spawned as its own task and its completion is sent to the
/// UI thread via `ui_tx`. Nothing here orders completions; the reducer
/// discards the ones that no longer apply.
pub async fn run_backend(
    client: HttpClient,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    info!(base_url = %client.base_url(), "Backend started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Quit => {
                info!("Received quit command, shutting down backend");
                break;
            }
            BackendCommand::Perform(effect) => {
                debug!(effect = effect.kind(), "Dispatching effect");
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let action = perform(&client, effect).await;
                    let _ = ui_tx.send(UiEvent::Completed(action)).await;
                });
            }
        }
    }

    info!("Backend shutdown complete");
}
