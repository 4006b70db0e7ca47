use alloc::vec::Vec;

/// Host timer used to debounce the in-motion flag.
///
/// `schedule` only books the deadline; when it elapses the host calls
/// `ListWindow::on_timer(handle)`. Handles that were cancelled, or that belong to an earlier
/// schedule, are ignored by the engine.
pub trait Timer {
    type Handle: Copy + Eq + core::fmt::Debug;

    fn schedule(&mut self, delay_ms: u64) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A deterministic timer driven by an externally supplied clock.
///
/// Adapters advance it from their frame/tick loop; tests advance it by hand.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    now_ms: u64,
    next_id: u64,
    pending: Vec<(TimerId, u64)>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves the clock without firing anything. Time never goes backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock to `now_ms` and returns the handles whose deadline has passed, in
    /// deadline order.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TimerId> {
        self.set_now(now_ms);
        let now = self.now_ms;
        let mut due: Vec<(TimerId, u64)> = Vec::new();
        self.pending.retain(|&(id, deadline)| {
            if deadline <= now {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, deadline)| (deadline, id));
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl Timer for ManualTimer {
    type Handle = TimerId;

    fn schedule(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push((id, self.now_ms.saturating_add(delay_ms)));
        id
    }

    fn cancel(&mut self, handle: TimerId) {
        self.pending.retain(|&(id, _)| id != handle);
    }
}
