// Application event loop.
//
// Single writer for the table: user commands and fetch completions are both
// funnelled through one `tokio::select!` loop, and each handler (including
// its render) finishes before the next event is taken. Fetches run in
// spawned tasks and report back as `LoadEvent`s.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::controller::{LoadOutcome, TableController};
use crate::loader::TeamSource;
use crate::protocol::{LoadEvent, UserCommand};
use crate::render::{RenderError, RenderTarget};

/// Capacity of the fetch-completion channel.
const LOAD_CHANNEL_CAPACITY: usize = 16;

/// Run the event loop until `Quit` arrives or the command channel closes.
///
/// A load is started immediately, the way the page fetched on open. The
/// controller is handed back on exit so callers can inspect final state.
pub async fn run<T: RenderTarget>(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    source: Arc<dyn TeamSource>,
    mut controller: TableController<T>,
) -> anyhow::Result<TableController<T>> {
    info!("Application event loop started");

    let (load_tx, mut load_rx) = mpsc::channel::<LoadEvent>(LOAD_CHANNEL_CAPACITY);
    let mut fetch_task: Option<JoinHandle<()>> = None;

    start_load(&mut controller, &source, &load_tx, &mut fetch_task)?;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(UserCommand::Load) => {
                        start_load(&mut controller, &source, &load_tx, &mut fetch_task)?;
                    }
                    Some(UserCommand::SortBy(column)) => {
                        controller.sort_by(&column)?;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Fetch completions (the loop holds a sender, so this never closes) ---
            Some(event) = load_rx.recv() => {
                let outcome = controller.complete_load(event.generation, event.result)?;
                if outcome != LoadOutcome::Stale {
                    fetch_task = None;
                }
            }
        }
    }

    if let Some(task) = fetch_task.take() {
        task.abort();
        debug!("Aborted in-flight fetch on shutdown");
    }
    info!("Application event loop exiting");
    Ok(controller)
}

/// Start a fetch in the background, superseding any fetch still running.
fn start_load<T: RenderTarget>(
    controller: &mut TableController<T>,
    source: &Arc<dyn TeamSource>,
    load_tx: &mpsc::Sender<LoadEvent>,
    fetch_task: &mut Option<JoinHandle<()>>,
) -> Result<(), RenderError> {
    if let Some(previous) = fetch_task.take() {
        previous.abort();
        debug!("Cancelled previous fetch");
    }

    let generation = controller.begin_load()?;
    let source = Arc::clone(source);
    let tx = load_tx.clone();
    *fetch_task = Some(tokio::spawn(async move {
        let result = source.load().await;
        let _ = tx.send(LoadEvent { generation, result }).await;
    }));
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
