//! A labeled block of shell commands with a copy-to-clipboard control.
//!
//! [`CommandBlock`] renders its text verbatim in a bordered, horizontally
//! scrollable region. Copying goes through a [`ClipboardWriter`]; success
//! flips the control to "Copied" for [`COPIED_REVERT_DELAY`], failure is
//! absorbed and leaves it at "Copy".

mod clipboard;
mod copy_state;
mod input;
mod widget;

pub use clipboard::ClipboardWriteFailure;
pub use clipboard::ClipboardWriter;
pub use copy_state::COPIED_REVERT_DELAY;
pub use copy_state::CopyState;
pub use input::CommandInput;
pub use widget::ChangeNotifier;
pub use widget::CommandBlock;
pub use widget::CopyAction;
pub use widget::DEFAULT_LABEL;
