use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::Stats;

/// The buffer behind every queue variant.
///
/// It knows nothing about locking; each variant decides how callers get
/// exclusive access to it and how they wait.
pub(crate) struct State<T> {
    buf: VecDeque<T>,
    capacity: usize,
    pub stats: Stats,
}

pub(crate) struct Popped<T> {
    pub item: T,
    pub was_full: bool,
}

impl<T> State<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
            stats: Stats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.capacity
    }

    /// Appends `item` and returns whether the buffer was empty before.
    ///
    /// The caller must have checked that the buffer is not full.
    pub fn push(&mut self, item: T) -> bool {
        debug_assert!(!self.is_full(), "pushed into a full buffer");
        let was_empty = self.buf.is_empty();
        self.buf.push_back(item);

        let stats = &mut self.stats;
        stats.pushed += 1;
        stats.peak_len = stats.peak_len.max(self.buf.len());
        if was_empty {
            stats.became_non_empty += 1;
        }
        was_empty
    }

    pub fn pop(&mut self) -> Option<Popped<T>> {
        let was_full = self.is_full();
        let item = self.buf.pop_front()?;

        self.stats.popped += 1;
        if was_full {
            self.stats.became_non_full += 1;
        }
        Some(Popped { item, was_full })
    }
}

// A panic never leaves `State` half-updated, so a poisoned lock still guards
// valid data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn wait<'a, T>(cond: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    cond.wait(guard).unwrap_or_else(PoisonError::into_inner)
}
