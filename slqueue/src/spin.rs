use std::sync::Mutex;
use std::thread;

use crate::state::{self, State};
use crate::{BoundedQueue, Stats};

/// A bounded queue guarded by a single mutex, waiting by yielding.
///
/// A blocked caller releases the lock, yields to the scheduler and locks
/// again to re-check, until the queue has room (or an item). The lock must be
/// released in between: a producer keeping it while the queue is full would
/// stop every consumer from making room.
///
/// Waiting callers are never parked, so they keep a core busy for as long as
/// they are blocked.
pub struct SpinQueue<T> {
    state: Mutex<State<T>>,
    capacity: usize,
}

impl<T> SpinQueue<T> {
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "created spin queue");
        Self {
            state: Mutex::new(State::new(capacity)),
            capacity,
        }
    }
}

impl<T> BoundedQueue<T> for SpinQueue<T> {
    fn new(capacity: usize) -> Self {
        Self::new(capacity)
    }

    fn push(&self, item: T) {
        let mut state = state::lock(&self.state);
        if state.is_full() {
            tracing::trace!(len = state.len(), "spin queue full, push retrying");
        }
        while state.is_full() {
            state.stats.push_waits += 1;
            drop(state);
            thread::yield_now();
            state = state::lock(&self.state);
        }
        state.push(item);
    }

    fn pop(&self) -> T {
        let mut state = state::lock(&self.state);
        if state.is_empty() {
            tracing::trace!("spin queue empty, pop retrying");
        }
        loop {
            if let Some(popped) = state.pop() {
                return popped.item;
            }
            state.stats.pop_waits += 1;
            drop(state);
            thread::yield_now();
            state = state::lock(&self.state);
        }
    }

    fn try_push(&self, item: T) -> Result<(), T> {
        let mut state = state::lock(&self.state);
        if state.is_full() {
            return Err(item);
        }
        state.push(item);
        Ok(())
    }

    fn try_pop(&self) -> Option<T> {
        state::lock(&self.state).pop().map(|p| p.item)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_while_locked() {
        let queue = SpinQueue::<u8>::new(3);
        let _guard = state::lock(&queue.state);
        assert_eq!(queue.capacity(), 3);
    }
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn push_retries_until_popped() {
        let queue = SpinQueue::new(1);
        queue.push(1);

        let pushed = AtomicBool::new(false);
        std::thread::scope(|cx| {
            cx.spawn(|| {
                queue.push(2);
                pushed.store(true, Ordering::Release);
            });
            while queue.stats().push_waits == 0 {
                std::thread::yield_now();
            }
            assert!(!pushed.load(Ordering::Acquire));
            assert_eq!(queue.pop(), 1);
        });

        assert!(pushed.load(Ordering::Acquire));
        assert_eq!(queue.pop(), 2);
        assert_eq!(queue.stats().signals(), 0);
    }

    #[test]
    fn pop_retries_until_pushed() {
        let queue = SpinQueue::new(4);
        std::thread::scope(|cx| {
            let consumer = cx.spawn(|| queue.pop());
            while queue.stats().pop_waits == 0 {
                std::thread::yield_now();
            }
            queue.push("ping");
            assert_eq!(consumer.join().unwrap(), "ping");
        });
        assert!(queue.is_empty());
    }
}
