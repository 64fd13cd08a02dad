//! Per-toast timer registry.
//!
//! Holds at most one pending timer per toast id. Arming always replaces the
//! previous timer for that id, and expiry is driven externally by
//! [`TimerRegistry::take_expired`].

use crate::domain::ToastId;
use std::collections::HashMap;
use std::time::Instant;

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Start the exit transition of a toast that has been shown long enough.
    AutoDismiss,
    /// Treat the exit animation as finished.
    ExitAnimation,
}

/// A pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub deadline: Instant,
}

/// Timers keyed by toast id.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    timers: HashMap<ToastId, Timer>,
}

impl TimerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer for `id`, returning the timer it replaced.
    pub fn arm(&mut self, id: ToastId, kind: TimerKind, deadline: Instant) -> Option<Timer> {
        let replaced = self.timers.insert(id, Timer { kind, deadline });
        if let Some(previous) = &replaced {
            tracing::debug!(previous = ?previous.kind, next = ?kind, "replaced pending timer");
        }
        replaced
    }

    /// Cancels the timer for `id`, if any.
    pub fn cancel(&mut self, id: &ToastId) -> Option<Timer> {
        self.timers.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Timer> {
        self.timers.get(id)
    }

    /// Removes and returns every timer due at `now`, earliest deadline first.
    ///
    /// Ties are broken by id so expiry order is deterministic.
    pub fn take_expired(&mut self, now: Instant) -> Vec<(ToastId, TimerKind)> {
        let mut due: Vec<(ToastId, Timer)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (id.clone(), *timer))
            .collect();
        due.sort_by(|(a_id, a), (b_id, b)| a.deadline.cmp(&b.deadline).then_with(|| a_id.cmp(b_id)));

        for (id, _) in &due {
            self.timers.remove(id);
        }

        due.into_iter().map(|(id, timer)| (id, timer.kind)).collect()
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
