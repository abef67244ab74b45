// Message types exchanged between the TUI and the app orchestrator.

use offerwise_core::bands::Band;
use offerwise_core::config::SimulatorConfig;
use offerwise_core::levers::NegotiationLevers;
use offerwise_core::risk::Simulation;

/// Tabs in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabId {
    #[default]
    Simulator,
    Script,
}

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Lever input changed; recompute the simulation.
    Recalculate(NegotiationLevers),
    /// Replace the draft with a freshly generated one.
    RegenerateDraft,
    /// Copy the given (possibly edited) draft text to the clipboard.
    CopyDraft(String),
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full state, sent once at startup.
    Snapshot(Box<AppSnapshot>),
    /// Result of the latest recalculation.
    Simulation(Box<Simulation>),
    /// New draft text for the editor.
    Draft(String),
    /// Transient copy status; `None` clears it.
    CopyStatus(Option<String>),
}

/// Offer summary shown in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferSummary {
    pub role: String,
    pub level: String,
    pub city: String,
    pub base: f64,
    pub bonus: f64,
    pub joining_bonus: f64,
    pub current_ctc: f64,
}

/// Everything the TUI needs to render its first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub offer: OfferSummary,
    pub band: Band,
    /// False when base, bonus and joining bonus are all zero.
    pub has_offer: bool,
    pub slider_bounds: SimulatorConfig,
    pub simulation: Simulation,
    pub draft: String,
}
