// TUI widget modules for each dashboard panel.

pub mod benchmarks;
pub mod help_bar;
pub mod offer;
pub mod quit_confirm;
pub mod risk;
pub mod script;
pub mod simulator;
pub mod status_bar;

/// Prompt shown in the main panel while the offer is all zeros.
pub const SETUP_PROMPT: &str =
    "No offer yet. Fill in base, bonus and joining bonus in config/offer.toml, then restart.";
