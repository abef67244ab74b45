// Application state and orchestration logic.
//
// The presentation adapter: holds the validated compensation context, turns
// TUI commands into calls on the pure scoring and drafting functions, and
// pushes the results back as UI updates. The clipboard write is the only
// asynchronous side effect; its completion and the status-clear timer come
// back through the internal event channel.

use std::sync::Arc;
use std::time::Duration;

use offerwise_core::bands::{self, Band, BandTable};
use offerwise_core::config::Config;
use offerwise_core::context::CompensationContext;
use offerwise_core::levers::NegotiationLevers;
use offerwise_core::risk::{self, Simulation};
use offerwise_core::script;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardSink;
use crate::protocol::{AppSnapshot, OfferSummary, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Status shown after a successful copy.
pub const COPIED_STATUS: &str = "Copied.";

// ---------------------------------------------------------------------------
// Internal events
// ---------------------------------------------------------------------------

/// Completions from spawned tasks. A copy completion carries the copy
/// generation that started it; a clear timer carries the status generation
/// of the success that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    CopySucceeded { generation: u64 },
    ClearCopyStatus { generation: u64 },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub context: CompensationContext,
    pub band: Band,
    pub simulation: Simulation,
    pub draft: String,
    pub copy_status: Option<String>,
    /// Incremented for every copy request. Completions of older copies are
    /// ignored.
    pub copy_generation: u64,
    /// Incremented for every successful copy. Only the clear timer of the
    /// latest success may clear the status.
    pub status_generation: u64,
    pub status_clear_after: Duration,
    pub clipboard: Arc<dyn ClipboardSink>,
    /// Spawned tasks report back through a clone of this sender.
    pub event_tx: mpsc::Sender<AppEvent>,
}

impl AppState {
    /// Create the state with an initial all-zero lever simulation and a
    /// generated draft.
    pub fn new(
        config: Config,
        context: CompensationContext,
        band: Band,
        clipboard: Arc<dyn ClipboardSink>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let simulation = risk::simulate(&context, &NegotiationLevers::default());
        let draft = script::generate(&context);
        let status_clear_after = Duration::from_millis(config.clipboard.status_clear_ms);

        AppState {
            config,
            context,
            band,
            simulation,
            draft,
            copy_status: None,
            copy_generation: 0,
            status_generation: 0,
            status_clear_after,
            clipboard,
            event_tx,
        }
    }

    /// Recompute the simulation for new lever values.
    pub fn recalculate(&mut self, levers: NegotiationLevers) -> &Simulation {
        self.simulation = risk::simulate(&self.context, &levers);
        debug!(
            "Recalculated: base {}%, bonus {}%, level_up={} -> score {} ({})",
            levers.base_increase_pct,
            levers.bonus_increase_pct,
            levers.level_up,
            self.simulation.assessment.score,
            self.simulation.assessment.tier.label()
        );
        &self.simulation
    }

    /// Replace the draft with a freshly generated one.
    pub fn regenerate_draft(&mut self) -> &str {
        self.draft = script::generate(&self.context);
        &self.draft
    }

    /// Start a fire-and-forget clipboard write of `text`.
    ///
    /// Returns the generation assigned to this copy. Failures are logged and
    /// otherwise ignored.
    pub fn start_copy(&mut self, text: String) -> u64 {
        self.copy_generation += 1;
        let generation = self.copy_generation;
        let clipboard = Arc::clone(&self.clipboard);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match clipboard.write_text(&text).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::CopySucceeded { generation }).await;
                }
                Err(e) => {
                    warn!("Clipboard write failed: {}", e);
                }
            }
        });

        generation
    }

    /// Schedule the status clear for the success tagged `generation`.
    fn schedule_status_clear(&self, generation: u64) {
        let tx = self.event_tx.clone();
        let delay = self.status_clear_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::ClearCopyStatus { generation }).await;
        });
    }

    /// Build an `AppSnapshot` from the current application state.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let ctx = &self.context;
        AppSnapshot {
            offer: OfferSummary {
                role: ctx.role_or_default().to_string(),
                level: ctx.level.clone().unwrap_or_default(),
                city: ctx.city_or_default().to_string(),
                base: ctx.base,
                bonus: ctx.bonus,
                joining_bonus: ctx.joining_bonus,
                current_ctc: ctx.current_ctc(),
            },
            band: self.band,
            has_offer: ctx.has_offer(),
            slider_bounds: self.config.simulator,
            simulation: self.simulation.clone(),
            draft: self.draft.clone(),
        }
    }
}

/// Build the context and its band from the loaded configuration.
///
/// A band CSV that cannot be read is logged and the built-in table is used.
pub fn build_context(config: &Config) -> anyhow::Result<(CompensationContext, Band)> {
    let table = match &config.bands_path {
        Some(path) => match BandTable::load(std::path::Path::new(path)) {
            Ok(table) => {
                info!("Loaded {} benchmark bands from {}", table.len(), path);
                table
            }
            Err(e) => {
                warn!("Falling back to built-in bands: {}", e);
                BandTable::seeded()
            }
        },
        None => BandTable::seeded(),
    };

    let band = bands::resolve_band(&config.offer, config.benchmark_override.as_ref(), &table);
    let context = CompensationContext::from_offer(&config.offer, &band)?;
    Ok((context, band))
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the app orchestrator until the TUI quits or the command channel
/// closes.
///
/// Sends the initial snapshot, then pushes UI updates through `ui_tx` for
/// every command and task completion.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut event_rx: mpsc::Receiver<AppEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Spawned task completions ---
            // AppState holds a sender, so this channel never closes while
            // the loop runs.
            Some(event) = event_rx.recv() => {
                handle_app_event(&mut state, event, &ui_tx).await;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::Recalculate(levers) => {
            let simulation = state.recalculate(levers).clone();
            let _ = ui_tx.send(UiUpdate::Simulation(Box::new(simulation))).await;
        }
        UserCommand::RegenerateDraft => {
            info!("Regenerating email draft");
            let draft = state.regenerate_draft().to_string();
            let _ = ui_tx.send(UiUpdate::Draft(draft)).await;
        }
        UserCommand::CopyDraft(text) => {
            let generation = state.start_copy(text);
            debug!("Copy #{} started", generation);
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

/// Handle a completion reported by a spawned task.
async fn handle_app_event(state: &mut AppState, event: AppEvent, ui_tx: &mpsc::Sender<UiUpdate>) {
    match event {
        AppEvent::CopySucceeded { generation } => {
            if generation != state.copy_generation {
                debug!("Ignoring completion of superseded copy #{}", generation);
                return;
            }
            info!("Draft copied to clipboard");
            state.status_generation += 1;
            state.copy_status = Some(COPIED_STATUS.to_string());
            let _ = ui_tx
                .send(UiUpdate::CopyStatus(state.copy_status.clone()))
                .await;
            state.schedule_status_clear(state.status_generation);
        }
        AppEvent::ClearCopyStatus { generation } => {
            if generation != state.status_generation {
                debug!("Ignoring superseded status clear #{}", generation);
                return;
            }
            state.copy_status = None;
            let _ = ui_tx.send(UiUpdate::CopyStatus(None)).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
