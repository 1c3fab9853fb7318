/// Counters recorded by a queue while its buffer is locked.
///
/// Waits count every suspension: a caller that yields three times before
/// getting in adds three to `push_waits` or `pop_waits`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub pushed: u64,
    pub popped: u64,
    pub push_waits: u64,
    pub pop_waits: u64,
    /// Highest number of items ever stored at once.
    pub peak_len: usize,
    /// Pushes into an empty buffer.
    pub became_non_empty: u64,
    /// Pops from a full buffer.
    pub became_non_full: u64,
    pub non_empty_signals: u64,
    pub non_full_signals: u64,
    /// Wakeups sent to every waiter of a shared condition.
    pub broadcasts: u64,
}

impl Stats {
    /// Total number of wakeups sent, whatever the condition.
    pub fn signals(&self) -> u64 {
        self.non_empty_signals + self.non_full_signals + self.broadcasts
    }
}
