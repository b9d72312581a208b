// Standings board entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the HTTP team source
// 4. Create channels and the table controller
// 5. Spawn the app event loop (which starts the first load)
// 6. Run the TUI until the user quits
// 7. Wait briefly for the event loop to wind down

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use standings_core::app;
use standings_core::config::{self, LoggingConfig};
use standings_core::controller::TableController;
use standings_core::loader::HttpTeamSource;
use standings_core::render::ChannelTarget;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    info!("Standings board starting up");

    // 3. Team source
    let source = HttpTeamSource::from_config(&config.api).context("failed to build HTTP client")?;
    let source_url = source.url().to_string();
    info!("Team list endpoint: {}", source_url);

    // 4. Channels and controller
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let controller = TableController::new(config.table.clone(), ChannelTarget::new(ui_tx));

    // 5. App event loop
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, Arc::new(source), controller).await {
            error!("Application loop error: {:#}", e);
        }
    });

    // 6. TUI (blocks until the user presses 'q' or Ctrl+C)
    if let Err(e) = standings_tui::run(ui_rx, cmd_tx, source_url).await {
        error!("TUI error: {:#}", e);
    }

    // 7. Cleanup: cmd_tx is gone, so the loop exits on its own.
    let _ = tokio::time::timeout(Duration::from_secs(5), app_handle).await;

    info!("Standings board shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(&logging.dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("standings.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
