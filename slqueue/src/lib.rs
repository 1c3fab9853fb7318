//! Size-limited FIFO queues shared between producers and consumers.
//!
//! Four variants implement [`BoundedQueue`], each with a different way of
//! waiting for the "full" and "empty" conditions:
//!
//! | type | synchronization | waiting |
//! |---|---|---|
//! | [`UnsyncQueue`] | none, single owner only | spins |
//! | [`SpinQueue`] | one mutex | unlock, yield, relock |
//! | [`CondQueue`] | one mutex, one condvar | broadcast on every mutation |
//! | [`DualCondQueue`] | one mutex, two condvars | targeted, edge-triggered |
//!
//! All of them share the same contract, so the same code (and the same tests)
//! can run against any of them.

mod state;

mod stats;
pub use stats::Stats;

mod strategy;
pub use strategy::Strategy;

mod unsync;
pub use unsync::UnsyncQueue;

mod spin;
pub use spin::SpinQueue;

mod cond;
pub use cond::CondQueue;

mod dual;
pub use dual::DualCondQueue;

/// A FIFO queue holding at most [`capacity`](Self::capacity) items.
///
/// [`push`](Self::push) and [`pop`](Self::pop) never fail. They block for as
/// long as the queue is full or empty respectively, with no timeout.
pub trait BoundedQueue<T> {
    /// Creates an empty queue.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    fn new(capacity: usize) -> Self
    where
        Self: Sized;

    /// Appends `item` at the tail, waiting until there is room for it.
    fn push(&self, item: T);

    /// Removes the head, waiting until there is one.
    fn pop(&self) -> T;

    /// Appends `item` if the queue is not full, otherwise hands it back.
    fn try_push(&self, item: T) -> Result<(), T>;

    /// Removes the head if the queue is not empty.
    fn try_pop(&self) -> Option<T>;

    fn capacity(&self) -> usize;

    /// Number of stored items. Concurrent callers may change it right after
    /// this returns.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns a snapshot of the counters recorded by this queue.
    fn stats(&self) -> Stats;
}
