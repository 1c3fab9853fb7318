use std::cell::RefCell;
use std::hint;

use crate::state::State;
use crate::{BoundedQueue, Stats};

/// A bounded queue with no synchronization at all.
///
/// It is the reference for what the other variants must behave like when
/// used by a single owner. Waiting is a bare spin on the full/empty check,
/// with nothing making the check and the following mutation atomic.
///
/// Since nothing else can change the buffer, a [`push`](BoundedQueue::push)
/// into a full queue or a [`pop`](BoundedQueue::pop) from an empty one spins
/// forever.
///
/// The queue is not [`Sync`]. Handing it to several threads, which would let
/// them exceed the capacity or pop from an emptied buffer, does not compile:
///
/// ```compile_fail,E0277
/// use slqueue::{BoundedQueue, UnsyncQueue};
///
/// let queue = UnsyncQueue::new(10);
/// std::thread::scope(|cx| {
///     cx.spawn(|| queue.push(1));
///     cx.spawn(|| queue.pop());
/// });
/// ```
pub struct UnsyncQueue<T> {
    state: RefCell<State<T>>,
}

impl<T> UnsyncQueue<T> {
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "created unsync queue");
        Self {
            state: RefCell::new(State::new(capacity)),
        }
    }
}

impl<T> BoundedQueue<T> for UnsyncQueue<T> {
    fn new(capacity: usize) -> Self {
        Self::new(capacity)
    }

    fn push(&self, item: T) {
        while self.state.borrow().is_full() {
            self.state.borrow_mut().stats.push_waits += 1;
            hint::spin_loop();
        }
        self.state.borrow_mut().push(item);
    }

    fn pop(&self) -> T {
        while self.state.borrow().is_empty() {
            self.state.borrow_mut().stats.pop_waits += 1;
            hint::spin_loop();
        }
        let Some(popped) = self.state.borrow_mut().pop() else {
            unreachable!("buffer emptied by another owner")
        };
        popped.item
    }

    fn try_push(&self, item: T) -> Result<(), T> {
        let mut state = self.state.borrow_mut();
        if state.is_full() {
            return Err(item);
        }
        state.push(item);
        Ok(())
    }

    fn try_pop(&self) -> Option<T> {
        self.state.borrow_mut().pop().map(|p| p.item)
    }

    fn capacity(&self) -> usize {
        self.state.borrow().capacity()
    }

    fn len(&self) -> usize {
        self.state.borrow().len()
    }

    fn stats(&self) -> Stats {
        self.state.borrow().stats
    }
}
