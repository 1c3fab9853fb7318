use std::sync::{Condvar, Mutex};

use crate::state::{self, State};
use crate::{BoundedQueue, Stats};

/// A bounded queue with a mutex and two condition variables.
///
/// Producers sleep on `non_full` and consumers on `non_empty`, both tied to
/// the same mutex. A condition is signalled only on the transition that makes
/// it true: a push into an empty buffer wakes consumers, a pop from a full
/// buffer wakes producers. Any other mutation cannot satisfy a sleeping
/// waiter, so it sends nothing.
///
/// Each transition wakes all waiters of its condition rather than one. With a
/// single wakeup, two pops in a row from a full queue produce one transition
/// and release one producer, while the other stays asleep next to free space.
pub struct DualCondQueue<T> {
    state: Mutex<State<T>>,
    capacity: usize,
    non_full: Condvar,
    non_empty: Condvar,
}

impl<T> DualCondQueue<T> {
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "created dual-cond queue");
        Self {
            state: Mutex::new(State::new(capacity)),
            capacity,
            non_full: Condvar::new(),
            non_empty: Condvar::new(),
        }
    }

    fn push_locked(&self, state: &mut State<T>, item: T) {
        let was_empty = state.push(item);
        if was_empty {
            tracing::trace!("dual-cond queue became non-empty");
            state.stats.non_empty_signals += 1;
            self.non_empty.notify_all();
        }
    }

    fn pop_locked(&self, state: &mut State<T>) -> Option<T> {
        let popped = state.pop()?;
        if popped.was_full {
            tracing::trace!("dual-cond queue became non-full");
            state.stats.non_full_signals += 1;
            self.non_full.notify_all();
        }
        Some(popped.item)
    }
}

impl<T> BoundedQueue<T> for DualCondQueue<T> {
    fn new(capacity: usize) -> Self {
        Self::new(capacity)
    }

    fn push(&self, item: T) {
        let mut state = state::lock(&self.state);
        while state.is_full() {
            tracing::trace!(len = state.len(), "dual-cond queue full, push waiting");
            state.stats.push_waits += 1;
            state = state::wait(&self.non_full, state);
        }
        self.push_locked(&mut state, item);
    }

    fn pop(&self) -> T {
        let mut state = state::lock(&self.state);
        loop {
            if let Some(item) = self.pop_locked(&mut state) {
                return item;
            }
            tracing::trace!("dual-cond queue empty, pop waiting");
            state.stats.pop_waits += 1;
            state = state::wait(&self.non_empty, state);
        }
    }

    fn try_push(&self, item: T) -> Result<(), T> {
        let mut state = state::lock(&self.state);
        if state.is_full() {
            return Err(item);
        }
        self.push_locked(&mut state, item);
        Ok(())
    }

    fn try_pop(&self) -> Option<T> {
        self.pop_locked(&mut state::lock(&self.state))
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
        let queue = DualCondQueue::<u8>::new(3);
        let _guard = state::lock(&queue.state);
        assert_eq!(queue.capacity(), 3);
    }

    #[test]
    fn signals_only_on_transitions() {
        let queue = DualCondQueue::new(3);
        for i in 0..3 {
            queue.push(i);
        }
        assert_eq!(queue.try_push(3), Err(3));
        for i in 0..3 {
            assert_eq!(queue.pop(), i);
        }
        assert_eq!(queue.try_pop(), None);

        let stats = queue.stats();
        assert_eq!(stats.non_empty_signals, 1);
        assert_eq!(stats.non_full_signals, 1);
        assert_eq!(stats.broadcasts, 0);
    }

    #[test]
    fn try_pop_wakes_producers() {
        let queue = DualCondQueue::new(1);
        queue.push('a');
        std::thread::scope(|cx| {
            let producer = cx.spawn(|| queue.push('b'));
            while queue.stats().push_waits == 0 {
                std::thread::yield_now();
            }
            assert_eq!(queue.try_pop(), Some('a'));
            producer.join().unwrap();
        });
        // Capacity one: both pops start from a full buffer.
        assert_eq!(queue.pop(), 'b');
        let stats = queue.stats();
        assert_eq!(stats.non_full_signals, 2);
        assert_eq!(stats.non_full_signals, stats.became_non_full);
    }

    // Two producers sleep on a full queue; the consumer drains it without a
    // second full -> non-full transition. Both producers must get through.
    #[test]
    fn transition_wakes_every_producer() {
        let queue = DualCondQueue::new(2);
        queue.push(0);
        queue.push(1);
        std::thread::scope(|cx| {
            let queue = &queue;
            let producers = [2, 3].map(|i| cx.spawn(move || queue.push(i)));
            while queue.stats().push_waits < 2 {
                std::thread::yield_now();
            }
            let mut popped = (0..4).map(|_| queue.pop()).collect::<Vec<_>>();
            for p in producers {
                p.join().unwrap();
            }
            popped[2..].sort();
            assert_eq!(popped, [0, 1, 2, 3]);
        });
    }
}
