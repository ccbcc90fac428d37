use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

/// How long the action control keeps reading "Copied" after a successful
/// copy.
pub const COPIED_REVERT_DELAY: Duration = Duration::from_millis(1500);

/// Transient feedback state of one block's copy control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
}

impl CopyState {
    /// Text of the action control for this state.
    pub fn action_label(self) -> &'static str {
        match self {
            CopyState::Idle => "Copy",
            CopyState::Copied => "Copied",
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: CopyState,
    // Bumped by every copy attempt; a revert timer only applies while its
    // generation is still the latest.
    generation: u64,
}

/// Instance-local copy state shared between a block and the tasks its copy
/// actions spawn.
#[derive(Debug, Clone, Default)]
pub(crate) struct CopyStatus {
    inner: Arc<Mutex<Inner>>,
}

impl CopyStatus {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every update is a single assignment, so a poisoned lock still holds
        // a consistent value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self) -> CopyState {
        self.lock().state
    }

    /// Start a new copy attempt and return its generation.
    pub(crate) fn begin(&self) -> u64 {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.generation
    }

    /// Record the result of attempt `generation`. Returns `false` when a newer
    /// attempt started in the meantime and the result was dropped.
    pub(crate) fn finish(&self, generation: u64, copied: bool) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.state = if copied {
            CopyState::Copied
        } else {
            CopyState::Idle
        };
        true
    }

    /// Revert to `Idle` if attempt `generation` is still the latest. Returns
    /// whether the visible state changed.
    pub(crate) fn revert(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation || inner.state == CopyState::Idle {
            return false;
        }
        inner.state = CopyState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let status = CopyStatus::default();
        assert_eq!(status.get(), CopyState::Idle);
        assert_eq!(status.get().action_label(), "Copy");
    }

    #[test]
    fn stale_revert_is_ignored() {
        let status = CopyStatus::default();
        let first = status.begin();
        assert!(status.finish(first, true));
        let second = status.begin();
        assert!(status.finish(second, true));

        assert!(!status.revert(first));
        assert_eq!(status.get(), CopyState::Copied);

        assert!(status.revert(second));
        assert_eq!(status.get(), CopyState::Idle);
    }

    #[test]
    fn superseded_result_is_dropped() {
        let status = CopyStatus::default();
        let slow = status.begin();
        let fast = status.begin();
        assert!(status.finish(fast, true));
        assert!(!status.finish(slow, false));
        assert_eq!(status.get(), CopyState::Copied);
    }

    #[test]
    fn failure_returns_to_idle() {
        let status = CopyStatus::default();
        let ok = status.begin();
        status.finish(ok, true);
        let failed = status.begin();
        assert!(status.finish(failed, false));
        assert_eq!(status.get(), CopyState::Idle);
        assert_eq!(CopyState::Copied.action_label(), "Copied");
    }
}
