use std::time::{Duration, Instant};

/// Identifies one scheduled tick. Handles are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(pub u64);

/// Delayed tick delivery.
///
/// A scheduler only records when a tick is due. Whoever drives the clock
/// collects due handles and hands each one back to the overlay, so the
/// overlay stays the only writer of its animation state.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle;

    /// Cancel a pending tick. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

#[derive(Debug, Clone, Copy)]
struct Entry<T> {
    handle: TickHandle,
    due: T,
}

/// Drains entries due at or before `now`, earliest first. Ties keep
/// scheduling order.
fn drain_due<T: Copy + Ord>(entries: &mut Vec<Entry<T>>, now: T) -> Vec<TickHandle> {
    let mut due: Vec<Entry<T>> = Vec::new();
    entries.retain(|e| {
        if e.due <= now {
            due.push(*e);
            false
        } else {
            true
        }
    });
    due.sort_by(|a, b| a.due.cmp(&b.due).then(a.handle.cmp(&b.handle)));
    due.into_iter().map(|e| e.handle).collect()
}

/// Virtual clock advanced explicitly by the caller.
///
/// Used by tests and by hosts that own their own frame clock (the WASM
/// bridge advances it with the elapsed time JS reports).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry<Duration>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.pending.iter().any(|e| e.handle == handle)
    }

    /// Move the clock forward by `dt` and return the ticks that fell due.
    pub fn advance(&mut self, dt: Duration) -> Vec<TickHandle> {
        self.now = self.now.saturating_add(dt);
        drain_due(&mut self.pending, self.now)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            handle,
            due: self.now.saturating_add(delay),
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|e| e.handle != handle);
    }
}

/// Wall-clock scheduler for event loops that poll with a timeout.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    pending: Vec<Entry<Instant>>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|e| e.due).min()
    }

    /// How long an event loop may block before the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Remove and return every tick due at or before `now`.
    pub fn due(&mut self, now: Instant) -> Vec<TickHandle> {
        drain_due(&mut self.pending, now)
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        let now = Instant::now();
        self.pending.push(Entry {
            handle,
            due: now.checked_add(delay).unwrap_or(now),
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|e| e.handle != handle);
    }
}
