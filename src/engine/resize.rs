use crate::foundation::core::{Millis, Surface};

/// Coalesces asynchronously delivered resize events.
///
/// Only the most recent surface within the window survives; it is released
/// once the window has passed with no further submissions.
#[derive(Clone, Copy, Debug)]
pub struct ResizeDebouncer {
    window: Millis,
    pending: Option<Surface>,
    deadline: Option<Millis>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(Millis(100))
    }
}

impl ResizeDebouncer {
    /// Debounce with the given quiet window.
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Record a resize event at `now`, replacing any unexpired one.
    pub fn submit(&mut self, now: Millis, surface: Surface) {
        self.pending = Some(surface);
        self.deadline = Some(now.saturating_add(self.window));
    }

    /// Release the coalesced surface once the window has expired.
    pub fn poll(&mut self, now: Millis) -> Option<Surface> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.pending.take()
    }
}
