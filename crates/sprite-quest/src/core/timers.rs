// core/timers.rs
//
// Fire-once timers keyed by handle. Nothing runs on its own: the owner
// advances time with `tick` and receives the payloads that came due.
//
// Usage:
//   let mut timers = Scheduler::new();
//   let id = timers.schedule(Duration::from_millis(100), Action::Advance);
//   timers.cancel(id);                    // navigation away
//   for action in timers.tick(dt) { .. }  // each frame

use std::collections::HashMap;
use std::time::Duration;

/// Handle to a scheduled timer for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    remaining: Duration,
    payload: T,
}

/// Manages all pending timers of one owner.
#[derive(Debug)]
pub struct Scheduler<T> {
    timers: HashMap<TimerId, Timer<T>>,
    next_id: u32,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            timers: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire once after `delay`. A zero delay fires on
    /// the next tick.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.insert(
            id,
            Timer {
                remaining: delay,
                payload,
            },
        );
        id
    }

    /// Cancel a timer by handle. Returns false if it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel every pending timer whose payload matches. Returns how many.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, timer| !pred(&timer.payload));
        before - self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Whether any pending timer's payload matches.
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.timers.values().any(|timer| pred(&timer.payload))
    }

    /// Advance all timers by `dt`. Returns the payloads that came due, the
    /// earliest deadline first (ties in scheduling order). Fired timers are
    /// removed, so each payload is delivered at most once.
    pub fn tick(&mut self, dt: Duration) -> Vec<T> {
        let mut due = Vec::new();

        for (&id, timer) in self.timers.iter_mut() {
            if timer.remaining <= dt {
                due.push((timer.remaining, id));
                timer.remaining = Duration::ZERO;
            } else {
                timer.remaining -= dt;
            }
        }

        due.sort();
        due.into_iter()
            .filter_map(|(_, id)| self.timers.remove(&id))
            .map(|timer| timer.payload)
            .collect()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
