use crate::Timer;

/// Owns at most one outstanding timer. Arming always cancels the previous one first.
#[derive(Debug)]
pub(crate) struct Debouncer<T: Timer> {
    timer: T,
    delay_ms: u64,
    pending: Option<T::Handle>,
}

impl<T: Timer> Debouncer<T> {
    pub(crate) fn new(timer: T, delay_ms: u64) -> Self {
        Self {
            timer,
            delay_ms,
            pending: None,
        }
    }

    pub(crate) fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn arm(&mut self) {
        self.cancel();
        self.pending = Some(self.timer.schedule(self.delay_ms));
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }

    /// Consumes `handle` if it is the outstanding one. Returns `false` for stale handles.
    pub(crate) fn fire(&mut self, handle: T::Handle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn timer(&self) -> &T {
        &self.timer
    }

    pub(crate) fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: Timer> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
