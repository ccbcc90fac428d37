//! Clipboard backends for copy actions.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use setup_guide_command_block::ClipboardWriteFailure;
use setup_guide_command_block::ClipboardWriter;
use tokio::sync::oneshot;

/// Largest OSC 52 payload we emit. xterm and tmux drop longer sequences
/// silently, so refuse instead.
const OSC52_MAX_ENCODED_LEN: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum ClipboardBackend {
    /// The OS clipboard (X11/Wayland, macOS pasteboard, Windows clipboard).
    #[default]
    #[serde(rename = "system")]
    System,
    /// Ask the terminal to set the clipboard via an OSC 52 escape sequence.
    /// Works over SSH when the local terminal allows it.
    #[serde(rename = "osc52")]
    Osc52,
    /// Copying is switched off; copy actions do nothing.
    #[serde(rename = "none")]
    #[value(name = "none")]
    Disabled,
}

/// Escape sequence waiting to be written by the thread that owns the
/// terminal, so it never lands inside a frame.
#[derive(Debug)]
pub struct TerminalWrite {
    pub sequence: String,
    pub done: oneshot::Sender<std::io::Result<()>>,
}

/// Hands a [`TerminalWrite`] to the terminal owner.
pub type TerminalSink = Arc<dyn Fn(TerminalWrite) + Send + Sync>;

pub fn clipboard_for(backend: ClipboardBackend, terminal: TerminalSink) -> Arc<dyn ClipboardWriter> {
    match backend {
        ClipboardBackend::System => Arc::new(SystemClipboard::default()),
        ClipboardBackend::Osc52 => Arc::new(Osc52Clipboard::new(terminal)),
        ClipboardBackend::Disabled => Arc::new(DisabledClipboard),
    }
}

#[cfg(not(target_os = "android"))]
#[derive(Default)]
pub struct SystemClipboard {
    // On X11 and Wayland the selection is served by the process that set it,
    // so the handle stays alive between copies.
    handle: Arc<std::sync::Mutex<Option<arboard::Clipboard>>>,
}

#[cfg(not(target_os = "android"))]
#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardWriteFailure> {
        let handle = Arc::clone(&self.handle);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), ClipboardWriteFailure> {
            let mut guard = handle
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let mut clipboard = match guard.take() {
                Some(clipboard) => clipboard,
                None => arboard::Clipboard::new().map_err(map_arboard_error)?,
            };
            clipboard.set_text(text).map_err(map_arboard_error)?;
            // A failed write drops the handle so the next copy reconnects.
            *guard = Some(clipboard);
            Ok(())
        })
        .await
        .map_err(|e| ClipboardWriteFailure::Unavailable(format!("clipboard task failed: {e}")))?
        .inspect_err(|e| tracing::debug!("system clipboard write failed: {e}"))
    }
}

#[cfg(not(target_os = "android"))]
fn map_arboard_error(err: arboard::Error) -> ClipboardWriteFailure {
    match err {
        arboard::Error::ClipboardNotSupported => {
            ClipboardWriteFailure::Unavailable(err.to_string())
        }
        other => ClipboardWriteFailure::Denied(other.to_string()),
    }
}

#[cfg(target_os = "android")]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(target_os = "android")]
#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardWriteFailure> {
        Err(ClipboardWriteFailure::Unavailable(
            "system clipboard is not supported on Android".to_string(),
        ))
    }
}

pub struct Osc52Clipboard {
    inside_tmux: bool,
    terminal: TerminalSink,
}

impl Osc52Clipboard {
    pub fn new(terminal: TerminalSink) -> Self {
        Self {
            inside_tmux: std::env::var_os("TMUX").is_some(),
            terminal,
        }
    }
}

#[async_trait]
impl ClipboardWriter for Osc52Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardWriteFailure> {
        let sequence = osc52_sequence(text, self.inside_tmux)?;
        let len = sequence.len();
        let (done, written) = oneshot::channel();
        (self.terminal)(TerminalWrite { sequence, done });
        written.await.map_err(|_| {
            ClipboardWriteFailure::Unavailable("terminal closed before the write".to_string())
        })??;
        tracing::debug!("wrote {len} byte OSC 52 sequence");
        Ok(())
    }
}

/// Build the escape sequence that sets the clipboard selection to `text`.
/// Inside tmux the sequence is wrapped in a DCS passthrough so it reaches the
/// outer terminal.
fn osc52_sequence(text: &str, inside_tmux: bool) -> Result<String, ClipboardWriteFailure> {
    let encoded = STANDARD.encode(text);
    if encoded.len() > OSC52_MAX_ENCODED_LEN {
        return Err(ClipboardWriteFailure::Denied(format!(
            "{} bytes is too large for OSC 52",
            text.len()
        )));
    }
    let osc = format!("\x1b]52;c;{encoded}\x07");
    if inside_tmux {
        Ok(format!("\x1bPtmux;\x1b{osc}\x1b\\"))
    } else {
        Ok(osc)
    }
}

pub struct DisabledClipboard;

#[async_trait]
impl ClipboardWriter for DisabledClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardWriteFailure> {
        Err(ClipboardWriteFailure::Unavailable(
            "clipboard disabled by configuration".to_string(),
        ))
    }
}
