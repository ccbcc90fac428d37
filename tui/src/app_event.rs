use crossterm::event::KeyEvent;
use setup_guide_command_block::CopyAction;

use crate::clipboard::TerminalWrite;

#[derive(Debug)]
pub(crate) enum AppEvent {
    KeyEvent(KeyEvent),

    /// Request a redraw which will be debounced by the [`App`].
    ///
    /// [`App`]: crate::app::App
    RequestRedraw,

    /// Actually draw the next frame.
    Redraw,

    /// Write a command block's text to the clipboard. Runs off the UI thread;
    /// the block redraws itself through its change notifier.
    Copy(CopyAction),

    /// Raw bytes for the terminal (OSC 52), written between frames.
    TerminalWrite(TerminalWrite),

    ExitRequest,
}
