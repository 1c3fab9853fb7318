use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{BoundedQueue, CondQueue, DualCondQueue, SpinQueue, UnsyncQueue};

/// Selects a queue variant at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// [`UnsyncQueue`]
    Unsync,
    /// [`SpinQueue`]
    Spin,
    /// [`CondQueue`]
    Cond,
    /// [`DualCondQueue`]
    DualCond,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Self::Unsync, Self::Spin, Self::Cond, Self::DualCond];

    pub const fn is_thread_safe(self) -> bool {
        !matches!(self, Self::Unsync)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsync => "unsync",
            Self::Spin => "spin",
            Self::Cond => "cond",
            Self::DualCond => "dual",
        }
    }

    /// Creates a queue for use by a single owner.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn build<T: 'static>(self, capacity: usize) -> Box<dyn BoundedQueue<T>> {
        match self {
            Self::Unsync => Box::new(UnsyncQueue::new(capacity)),
            Self::Spin => Box::new(SpinQueue::new(capacity)),
            Self::Cond => Box::new(CondQueue::new(capacity)),
            Self::DualCond => Box::new(DualCondQueue::new(capacity)),
        }
    }

    /// Creates a queue that can be shared between threads, or `None` for
    /// [`Strategy::Unsync`].
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn build_shared<T>(self, capacity: usize) -> Option<Arc<dyn BoundedQueue<T> + Send + Sync>>
    where
        T: 'static + Send,
    {
        let queue: Arc<dyn BoundedQueue<T> + Send + Sync> = match self {
            Self::Unsync => return None,
            Self::Spin => Arc::new(SpinQueue::new(capacity)),
            Self::Cond => Arc::new(CondQueue::new(capacity)),
            Self::DualCond => Arc::new(DualCondQueue::new(capacity)),
        };
        Some(queue)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or("invalid queue strategy, expected one of: unsync, spin, cond, dual")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        for st in Strategy::ALL {
            assert_eq!(st.to_string().parse::<Strategy>(), Ok(st));
        }
        assert!("dual-cond".parse::<Strategy>().is_err());
        assert!("".parse::<Strategy>().is_err());
    }

    #[test]
    fn build() {
        for st in Strategy::ALL {
            let queue = st.build(2);
            queue.push(1);
            queue.push(2);
            assert!(queue.is_full());
            assert_eq!(queue.try_push(3), Err(3));
            assert_eq!(queue.pop(), 1);
            assert_eq!(queue.pop(), 2);
            assert_eq!(queue.capacity(), 2);
        }
    }

    #[test]
    fn build_shared() {
        assert!(Strategy::Unsync.build_shared::<u32>(1).is_none());
        for st in Strategy::ALL.into_iter().filter(|st| st.is_thread_safe()) {
            let queue = st.build_shared(1).unwrap();
            let producer = std::thread::spawn({
                let queue = queue.clone();
                move || (0..100).for_each(|i| queue.push(i))
            });
            let popped = (0..100).map(|_| queue.pop()).collect::<Vec<u32>>();
            producer.join().unwrap();
            assert_eq!(popped, (0..100).collect::<Vec<_>>());
        }
    }

    #[test]
    #[should_panic = "capacity must be positive"]
    fn zero_capacity() {
        Strategy::DualCond.build::<u8>(0);
    }
}
