// System clipboard access through an external copy command.
//
// The terminal has no portable clipboard API, so the text is piped into the
// platform's copy tool (pbcopy, wl-copy, xclip, ...). Callers treat the write
// as fire-and-forget.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use offerwise_core::config::ClipboardConfig;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Copy tools tried in order when none is configured.
const CANDIDATES: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["clip"],
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command available")]
    Unavailable,

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to write to `{program}`: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
}

// ---------------------------------------------------------------------------
// Sink trait
// ---------------------------------------------------------------------------

/// Destination for copied text.
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// ---------------------------------------------------------------------------
// SystemClipboard
// ---------------------------------------------------------------------------

/// Clipboard backed by an external command, or disabled when no tool exists.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemClipboard {
    Command { argv: Vec<String> },
    Disabled,
}

impl SystemClipboard {
    /// Use the configured command, else the first candidate found on `PATH`.
    pub fn from_config(config: &ClipboardConfig) -> Self {
        if let Some(argv) = config.command.as_ref().filter(|a| !a.is_empty()) {
            return SystemClipboard::Command { argv: argv.clone() };
        }
        let path = std::env::var_os("PATH").unwrap_or_default();
        let dirs: Vec<_> = std::env::split_paths(&path).collect();
        detect(&dirs)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, SystemClipboard::Command { .. })
    }
}

/// First candidate tool present in one of `dirs`.
fn detect<P: AsRef<Path>>(dirs: &[P]) -> SystemClipboard {
    for argv in CANDIDATES {
        let program = argv[0];
        let found = dirs.iter().any(|dir| {
            let dir = dir.as_ref();
            dir.join(program).is_file() || dir.join(format!("{program}.exe")).is_file()
        });
        if found {
            debug!("Using clipboard command `{}`", argv.join(" "));
            return SystemClipboard::Command {
                argv: argv.iter().map(|s| s.to_string()).collect(),
            };
        }
    }
    SystemClipboard::Disabled
}

#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let argv = match self {
            SystemClipboard::Command { argv } => argv,
            SystemClipboard::Disabled => return Err(ClipboardError::Unavailable),
        };
        let Some((program, args)) = argv.split_first() else {
            return Err(ClipboardError::Unavailable);
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipboardError::Spawn {
                program: program.clone(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::Io {
                    program: program.clone(),
                    source: e,
                })?;
            // Dropping stdin closes the pipe so the tool sees EOF.
        }

        let status = child.wait().await.map_err(|e| ClipboardError::Io {
            program: program.clone(),
            source: e,
        })?;
        if !status.success() {
            return Err(ClipboardError::ExitStatus {
                program: program.clone(),
                status,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
