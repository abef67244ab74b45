// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the lever inputs and the editable draft,
// plus a mirror of what the app orchestrator last reported. The orchestrator
// pushes `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use offerwise_app::protocol::{AppSnapshot, OfferSummary, TabId, UiUpdate, UserCommand};
use offerwise_core::bands::Band;
use offerwise_core::config::SimulatorConfig;
use offerwise_core::levers::{LevelAsk, NegotiationLevers, RawLevers};
use offerwise_core::risk::Simulation;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use layout::build_layout;

// ---------------------------------------------------------------------------
// LeverField
// ---------------------------------------------------------------------------

/// The lever row that keyboard adjustments apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeverField {
    #[default]
    BasePct,
    BonusPct,
    LevelAsk,
}

impl LeverField {
    pub fn next(self) -> Self {
        match self {
            LeverField::BasePct => LeverField::BonusPct,
            LeverField::BonusPct => LeverField::LevelAsk,
            LeverField::LevelAsk => LeverField::BasePct,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            LeverField::BasePct => LeverField::LevelAsk,
            LeverField::BonusPct => LeverField::BasePct,
            LeverField::LevelAsk => LeverField::BonusPct,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeverField::BasePct => "Base increase",
            LeverField::BonusPct => "Bonus increase",
            LeverField::LevelAsk => "Level ask",
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state.
///
/// The lever values and draft text are owned here; the simulation, offer and
/// band mirror the app orchestrator. `render_frame` reads this struct to draw
/// the dashboard.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Offer summary from the startup snapshot.
    pub offer: Option<OfferSummary>,
    /// Market band for the offer's role and city.
    pub band: Option<Band>,
    /// False until a snapshot reports a non-zero offer.
    pub has_offer: bool,
    /// Slider bounds and step.
    pub bounds: SimulatorConfig,
    pub base_pct: i32,
    pub bonus_pct: i32,
    pub level_ask: LevelAsk,
    /// Lever row targeted by adjustments and typed entry.
    pub focus: LeverField,
    /// Whether typed entry for the focused lever is active.
    pub entry_mode: bool,
    /// Text typed so far in entry mode.
    pub entry_text: String,
    /// Result of the latest recalculation.
    pub simulation: Option<Simulation>,
    /// Editable email draft.
    pub draft: String,
    /// Whether keystrokes edit the draft.
    pub edit_mode: bool,
    /// Scroll offset of the draft editor, in lines.
    pub script_scroll: usize,
    /// Transient clipboard status ("Copied.").
    pub copy_status: Option<String>,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    /// Apply the full state snapshot sent at startup.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let levers = snapshot.simulation.levers;
        self.offer = Some(snapshot.offer);
        self.band = Some(snapshot.band);
        self.has_offer = snapshot.has_offer;
        self.bounds = snapshot.slider_bounds;
        self.base_pct = levers.base_increase_pct;
        self.bonus_pct = levers.bonus_increase_pct;
        self.level_ask = if levers.level_up {
            LevelAsk::Up
        } else {
            LevelAsk::Same
        };
        self.simulation = Some(snapshot.simulation);
        self.draft = snapshot.draft;
        self.script_scroll = 0;
    }

    /// Current lever values.
    pub fn levers(&self) -> NegotiationLevers {
        NegotiationLevers {
            base_increase_pct: self.base_pct,
            bonus_increase_pct: self.bonus_pct,
            level_up: self.level_ask == LevelAsk::Up,
        }
    }

    /// Move the focused lever one step in `direction` (negative = down).
    /// The level ask toggles regardless of direction.
    ///
    /// Returns `true` when a lever value changed.
    pub fn adjust_focused(&mut self, direction: i32) -> bool {
        let before = self.levers();
        let step = self.bounds.step.max(1);
        match self.focus {
            LeverField::BasePct => {
                self.base_pct = clamp_pct(
                    self.base_pct.saturating_add(direction.signum() * step),
                    self.bounds.base_pct_min,
                    self.bounds.base_pct_max,
                );
            }
            LeverField::BonusPct => {
                self.bonus_pct = clamp_pct(
                    self.bonus_pct.saturating_add(direction.signum() * step),
                    self.bounds.bonus_pct_min,
                    self.bounds.bonus_pct_max,
                );
            }
            LeverField::LevelAsk => {
                self.level_ask = self.level_ask.toggled();
            }
        }
        self.levers() != before
    }

    /// Raw input for the current levers, with the focused field replaced by
    /// the typed entry text.
    pub fn raw_levers(&self) -> RawLevers {
        let mut raw = RawLevers {
            base_pct: self.base_pct.to_string(),
            bonus_pct: self.bonus_pct.to_string(),
            level_ask: self.level_ask.as_str().to_string(),
        };
        match self.focus {
            LeverField::BasePct => raw.base_pct = self.entry_text.clone(),
            LeverField::BonusPct => raw.bonus_pct = self.entry_text.clone(),
            LeverField::LevelAsk => raw.level_ask = self.entry_text.clone(),
        }
        raw
    }

    /// Sanitize the typed entry into the levers, clamped to the slider
    /// bounds, and leave entry mode.
    pub fn commit_entry(&mut self) -> NegotiationLevers {
        let levers = self.raw_levers().sanitize();
        self.base_pct = clamp_pct(
            levers.base_increase_pct,
            self.bounds.base_pct_min,
            self.bounds.base_pct_max,
        );
        self.bonus_pct = clamp_pct(
            levers.bonus_increase_pct,
            self.bounds.bonus_pct_min,
            self.bounds.bonus_pct_max,
        );
        self.level_ask = if levers.level_up {
            LevelAsk::Up
        } else {
            LevelAsk::Same
        };
        self.entry_mode = false;
        self.entry_text.clear();
        self.levers()
    }
}

/// Clamp `value` into `[min, max]`. Bounds are validated at config load, but
/// an inverted pair resolves to `min` instead of panicking.
pub fn clamp_pct(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Simulation(simulation) => {
            state.simulation = Some(*simulation);
        }
        UiUpdate::Draft(text) => {
            state.draft = text;
            state.script_scroll = 0;
        }
        UiUpdate::CopyStatus(status) => {
            state.copy_status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        TabId::Simulator => widgets::simulator::render(frame, layout.main_panel, state),
        TabId::Script => widgets::script::render(frame, layout.main_panel, state),
    }
    widgets::offer::render(frame, layout.offer, state);
    widgets::benchmarks::render(frame, layout.benchmarks, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        prev_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed");
                        break Ok(());
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() {
                                warn!("App loop is gone; leaving the TUI");
                                break Ok(());
                            }
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws.
                    }
                    Some(Err(e)) => {
                        break Err(anyhow::Error::new(e).context("terminal input error"));
                    }
                    None => break Ok(()),
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use offerwise_core::risk::{OfferProjection, RiskAssessment, RiskTier};

    fn sample_simulation(levers: NegotiationLevers) -> Simulation {
        Simulation {
            levers,
            projection: OfferProjection {
                new_base: 10.0,
                new_bonus: 2.0,
                new_ctc: 12.0,
                delta: 0.0,
            },
            assessment: RiskAssessment {
                score: 0,
                tier: RiskTier::Low,
                reasons: Vec::new(),
            },
        }
    }

    fn sample_snapshot() -> AppSnapshot {
        AppSnapshot {
            offer: OfferSummary {
                role: "AE".into(),
                level: "L5".into(),
                city: "Bengaluru".into(),
                base: 10.0,
                bonus: 2.0,
                joining_bonus: 0.0,
                current_ctc: 12.0,
            },
            band: Band {
                p25: 8.0,
                p50: 10.0,
                p75: 12.0,
            },
            has_offer: true,
            slider_bounds: SimulatorConfig::default(),
            simulation: sample_simulation(NegotiationLevers::default()),
            draft: "Subject: Offer Discussion".into(),
        }
    }

    fn loaded_state() -> ViewState {
        let mut state = ViewState::default();
        state.apply_snapshot(sample_snapshot());
        state
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.offer.is_none());
        assert!(state.band.is_none());
        assert!(!state.has_offer);
        assert_eq!(state.levers(), NegotiationLevers::default());
        assert_eq!(state.focus, LeverField::BasePct);
        assert_eq!(state.active_tab, TabId::Simulator);
        assert!(state.simulation.is_none());
        assert!(state.draft.is_empty());
        assert!(!state.entry_mode);
        assert!(!state.edit_mode);
        assert!(!state.confirm_quit);
        assert!(state.copy_status.is_none());
    }

    #[test]
    fn lever_field_cycles() {
        assert_eq!(LeverField::BasePct.next(), LeverField::BonusPct);
        assert_eq!(LeverField::LevelAsk.next(), LeverField::BasePct);
        assert_eq!(LeverField::BasePct.prev(), LeverField::LevelAsk);
        assert_eq!(LeverField::BonusPct.prev().next(), LeverField::BonusPct);
    }

    #[test]
    fn apply_snapshot_updates_fields() {
        let state = loaded_state();
        assert_eq!(state.offer.as_ref().unwrap().role, "AE");
        assert_eq!(state.band.unwrap().p50, 10.0);
        assert!(state.has_offer);
        assert_eq!(state.bounds, SimulatorConfig::default());
        assert_eq!(state.draft, "Subject: Offer Discussion");
        assert!(state.simulation.is_some());
    }

    #[test]
    fn apply_snapshot_takes_levers_from_simulation() {
        let mut snapshot = sample_snapshot();
        snapshot.simulation = sample_simulation(NegotiationLevers {
            base_increase_pct: 7,
            bonus_increase_pct: 3,
            level_up: true,
        });
        let mut state = ViewState::default();
        state.apply_snapshot(snapshot);
        assert_eq!(state.base_pct, 7);
        assert_eq!(state.bonus_pct, 3);
        assert_eq!(state.level_ask, LevelAsk::Up);
    }

    #[test]
    fn adjust_focused_steps_and_clamps() {
        let mut state = loaded_state();
        state.bounds.step = 5;
        assert!(state.adjust_focused(1));
        assert_eq!(state.base_pct, 5);

        state.base_pct = 38;
        assert!(state.adjust_focused(1));
        assert_eq!(state.base_pct, 40);
        assert!(!state.adjust_focused(1), "already at the maximum");

        state.focus = LeverField::BonusPct;
        assert!(!state.adjust_focused(-1), "bonus minimum is 0");
        assert_eq!(state.bonus_pct, 0);
    }

    #[test]
    fn adjust_level_ask_toggles() {
        let mut state = loaded_state();
        state.focus = LeverField::LevelAsk;
        assert!(state.adjust_focused(-1));
        assert_eq!(state.level_ask, LevelAsk::Up);
        assert!(state.adjust_focused(1));
        assert_eq!(state.level_ask, LevelAsk::Same);
    }

    #[test]
    fn commit_entry_sanitizes_and_clamps() {
        let mut state = loaded_state();
        state.entry_mode = true;
        state.entry_text = "25%".into();
        let levers = state.commit_entry();
        assert_eq!(levers.base_increase_pct, 25);
        assert!(!state.entry_mode);
        assert!(state.entry_text.is_empty());

        state.entry_text = "999".into();
        assert_eq!(state.commit_entry().base_increase_pct, 40);

        state.entry_text = "abc".into();
        assert_eq!(state.commit_entry().base_increase_pct, 0);

        state.focus = LeverField::BonusPct;
        state.entry_text = "-20".into();
        assert_eq!(state.commit_entry().bonus_increase_pct, 0);
    }

    #[test]
    fn commit_entry_on_level_ask() {
        let mut state = loaded_state();
        state.focus = LeverField::LevelAsk;
        state.entry_text = "up".into();
        assert!(state.commit_entry().level_up);
        state.entry_text = "maybe".into();
        assert!(!state.commit_entry().level_up);
    }

    #[test]
    fn clamp_pct_handles_inverted_bounds() {
        assert_eq!(clamp_pct(5, 0, 10), 5);
        assert_eq!(clamp_pct(-5, 0, 10), 0);
        assert_eq!(clamp_pct(50, 0, 10), 10);
        assert_eq!(clamp_pct(5, 10, 0), 10);
    }

    #[test]
    fn apply_ui_update_simulation() {
        let mut state = loaded_state();
        let levers = NegotiationLevers {
            base_increase_pct: 10,
            ..Default::default()
        };
        apply_ui_update(
            &mut state,
            UiUpdate::Simulation(Box::new(sample_simulation(levers))),
        );
        assert_eq!(state.simulation.as_ref().unwrap().levers, levers);
        // The view keeps its own lever values
        assert_eq!(state.base_pct, 0);
    }

    #[test]
    fn apply_ui_update_draft_resets_scroll() {
        let mut state = loaded_state();
        state.script_scroll = 4;
        apply_ui_update(&mut state, UiUpdate::Draft("fresh".into()));
        assert_eq!(state.draft, "fresh");
        assert_eq!(state.script_scroll, 0);
    }

    #[test]
    fn apply_ui_update_copy_status() {
        let mut state = loaded_state();
        apply_ui_update(&mut state, UiUpdate::CopyStatus(Some("Copied.".into())));
        assert_eq!(state.copy_status.as_deref(), Some("Copied."));
        apply_ui_update(&mut state, UiUpdate::CopyStatus(None));
        assert!(state.copy_status.is_none());
    }

    #[test]
    fn render_frame_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();

        let mut state = ViewState::default();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        state = loaded_state();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        state.active_tab = TabId::Script;
        state.confirm_quit = true;
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
