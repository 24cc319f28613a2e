use std::time::Duration;

/// Pending deadlines keyed by purpose, at most one per key.
///
/// Scheduling a key that is already pending replaces its deadline, which is
/// how a newer request supersedes a stale one.
#[derive(Debug, Clone)]
pub struct TimerSet<K> {
    pending: Vec<PendingTimer<K>>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct PendingTimer<K> {
    key: K,
    deadline: Duration,
    seq: u64,
}

impl<K: Copy + Eq> TimerSet<K> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, key: K, deadline: Duration) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer { key, deadline, seq });
    }

    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.key != key);
        before != self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|timer| timer.key == key)
    }

    pub fn deadline_of(&self, key: K) -> Option<Duration> {
        self.pending
            .iter()
            .find(|timer| timer.key == key)
            .map(|timer| timer.deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.deadline).min()
    }

    /// Removes and returns the earliest timer due at `now`. Equal deadlines
    /// come out in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(K, Duration)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.seq))
            .map(|(index, _)| index)?;
        let timer = self.pending.swap_remove(index);
        Some((timer.key, timer.deadline))
    }
}

impl<K: Copy + Eq> Default for TimerSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/timers_tests.rs"]
mod tests;
