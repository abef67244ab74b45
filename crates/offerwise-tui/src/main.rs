// OfferWise entry point.
//
// Startup sequence:
// 1. Load config (copying defaults/ into config/ on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Resolve the benchmark band and build the compensation context
// 4. Pick a clipboard command
// 5. Create mpsc channels and the application state
// 6. Spawn the app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use offerwise_app::app;
use offerwise_app::clipboard::SystemClipboard;
use offerwise_core::config;
use offerwise_tui::tui;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Filter used when neither `RUST_LOG` nor `[logging] filter` is set.
const DEFAULT_LOG_FILTER: &str = "offerwise=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(config.logging.filter.as_deref())?;
    info!("OfferWise starting up");
    info!(
        "Offer loaded: role={}, level={}, city={}, base={}, bonus={}, joining_bonus={}",
        config.offer.role,
        config.offer.level,
        config.offer.city,
        config.offer.base,
        config.offer.bonus,
        config.offer.joining_bonus
    );

    // 3. Benchmarks and context
    let (context, band) =
        app::build_context(&config).context("failed to build compensation context")?;
    info!(
        "Benchmarks: p25={}, p50={}, p75={}",
        band.p25, band.p50, band.p75
    );
    if !context.has_offer() {
        info!("Offer is empty; the simulator will prompt for config/offer.toml");
    }

    // 4. Clipboard
    let clipboard = SystemClipboard::from_config(&config.clipboard);
    match &clipboard {
        SystemClipboard::Command { argv } => info!("Clipboard command: {}", argv.join(" ")),
        SystemClipboard::Disabled => info!("No clipboard command found; copy is disabled"),
    }

    // 5. Channels and state
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (event_tx, event_rx) = mpsc::channel(16);

    let app_state = app::AppState::new(config, context, band, Arc::new(clipboard), event_tx);

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, event_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop until the user quits
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {:#}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("OfferWise shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(config_filter: Option<&str>) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("offerwise.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    });

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
