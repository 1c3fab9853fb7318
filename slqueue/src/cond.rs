use std::sync::{Condvar, Mutex};

use crate::state::{self, State};
use crate::{BoundedQueue, Stats};

/// A bounded queue with a mutex and a single condition variable.
///
/// The one condition means both "no longer full" and "no longer empty", so
/// every mutation wakes every waiter. Waiters whose own predicate is still
/// false go back to sleep, which costs a wakeup per blocked caller on each
/// push or pop.
pub struct CondQueue<T> {
    state: Mutex<State<T>>,
    capacity: usize,
    changed: Condvar,
}

impl<T> CondQueue<T> {
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "created cond queue");
        Self {
            state: Mutex::new(State::new(capacity)),
            capacity,
            changed: Condvar::new(),
        }
    }

    fn broadcast(&self, state: &mut State<T>) {
        state.stats.broadcasts += 1;
        self.changed.notify_all();
    }
}

impl<T> BoundedQueue<T> for CondQueue<T> {
    fn new(capacity: usize) -> Self {
        Self::new(capacity)
    }

    fn push(&self, item: T) {
        let mut state = state::lock(&self.state);
        while state.is_full() {
            tracing::trace!(len = state.len(), "cond queue full, push waiting");
            state.stats.push_waits += 1;
            state = state::wait(&self.changed, state);
        }
        state.push(item);
        self.broadcast(&mut state);
    }

    fn pop(&self) -> T {
        let mut state = state::lock(&self.state);
        loop {
            if let Some(popped) = state.pop() {
                self.broadcast(&mut state);
                return popped.item;
            }
            tracing::trace!("cond queue empty, pop waiting");
            state.stats.pop_waits += 1;
            state = state::wait(&self.changed, state);
        }
    }

    fn try_push(&self, item: T) -> Result<(), T> {
        let mut state = state::lock(&self.state);
        if state.is_full() {
            return Err(item);
        }
        state.push(item);
        self.broadcast(&mut state);
        Ok(())
    }

    fn try_pop(&self) -> Option<T> {
        let mut state = state::lock(&self.state);
        let popped = state.pop()?;
        self.broadcast(&mut state);
        Some(popped.item)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        state::lock(&self.state).len()
    }

    fn stats(&self) -> Stats {
        state::lock(&self.state).stats
    }
}
