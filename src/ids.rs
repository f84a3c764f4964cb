// Task id generation

use crate::models::{TaskId, now_ms};

/// Mints timestamp-derived ids that never repeat within a session
///
/// `next()` returns the current clock in milliseconds, bumped past the last id
/// handed out (or seen in storage) when the clock has not moved on.
pub struct IdGenerator {
    last: TaskId,
    clock: Box<dyn Fn() -> i64 + Send>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(now_ms)
    }

    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> i64 + Send + 'static,
    {
        Self {
            last: 0,
            clock: Box::new(clock),
        }
    }

    /// Make sure future ids are greater than `id`
    pub fn observe(&mut self, id: TaskId) {
        self.last = self.last.max(id);
    }

    pub fn next(&mut self) -> TaskId {
        let id = (self.clock)().max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
