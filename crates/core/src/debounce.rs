//! Clock-agnostic debouncer for bursty input such as search typing.
//!
//! The caller supplies timestamps, so the same type drives browser timers and
//! unit tests alike.

pub const DEFAULT_WAIT_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT_MS)
    }
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u64) -> Self {
        Self { wait_ms, pending: None }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    /// Record `value`, replacing anything still pending and restarting the wait.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    /// Release the pending value once `wait_ms` has passed since the last push.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now_ms.saturating_sub(*at) >= self.wait_ms => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Milliseconds until the pending value is due, if any
    pub fn remaining(&self, now_ms: u64) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, at)| (at + self.wait_ms).saturating_sub(now_ms))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
