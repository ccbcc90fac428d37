use async_trait::async_trait;
use thiserror::Error;

/// Why a clipboard write did not happen. Copy actions absorb every variant;
/// the type exists so backends can say what went wrong to their own callers
/// and tests.
#[derive(Debug, Error)]
pub enum ClipboardWriteFailure {
    /// No clipboard is reachable from this process (headless session, no
    /// display server, unsupported platform, copy disabled).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The platform refused the write.
    #[error("clipboard write denied: {0}")]
    Denied(String),

    #[error("clipboard io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host capability for putting text on the system clipboard.
///
/// Writes are asynchronous and fallible; callers must never assume a
/// clipboard exists.
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardWriteFailure>;
}

#[async_trait]
impl<T: ClipboardWriter + ?Sized> ClipboardWriter for std::sync::Arc<T> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardWriteFailure> {
        (**self).write_text(text).await
    }
}
