//! Deferred step queue.

use std::time::{Duration, Instant};

/// Delay between consecutive steps of a command.
///
/// Every step after the first is deferred so that the host can update its UI
/// in between.
pub const STEP_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug)]
struct Entry<T> {
    due: Instant,
    seq: u64,
    task: T,
}

/// Queue of tasks ordered by due time, then by insertion order.
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Run `task` once `delay` has elapsed.
    pub fn set_timeout(&mut self, task: T, delay: Duration) {
        self.schedule_at(task, Instant::now() + delay);
    }

    /// Run `task` at `due`.
    pub fn schedule_at(&mut self, task: T, due: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let index = self
            .entries
            .partition_point(|e| (e.due, e.seq) <= (due, seq));
        self.entries.insert(index, Entry { due, seq, task });
    }

    /// Due time of the earliest task.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.first().map(|e| e.due)
    }

    /// Remove the earliest task if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        if self.entries.first()?.due <= now {
            Some(self.entries.remove(0).task)
        } else {
            None
        }
    }

    /// Remove the earliest task regardless of its due time.
    pub fn pop_next(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0).task)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all pending tasks.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
