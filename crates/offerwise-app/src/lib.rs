// Library root: the orchestrator that sits between the terminal UI and the
// pure negotiation core, plus the clipboard side effect.

pub mod app;
pub mod clipboard;
pub mod protocol;
