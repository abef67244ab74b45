// Library root: the pure negotiation core plus configuration and benchmark
// loading. Nothing in here touches the terminal or spawns tasks.

pub mod bands;
pub mod config;
pub mod context;
pub mod format;
pub mod levers;
pub mod risk;
pub mod script;
