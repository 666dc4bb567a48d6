//! Host-clock driven timers.
//!
//! Nothing here reads a real clock. The host calls [`TimerQueue::advance`]
//! with its current time and gets back the timers that came due.

use std::collections::BTreeMap;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    /// When it was due, which may be well before the time that fired it.
    pub due_ms: u64,
    pub key: K,
}

/// Pending timers ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, TimerId), K>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, key: K, delay_ms: u64) -> TimerId {
        self.schedule_at(key, self.now_ms.saturating_add(delay_ms))
    }

    /// Schedule `key` at an absolute time. A time already past fires on the
    /// next `advance`.
    pub fn schedule_at(&mut self, key: K, due_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((due_ms, id), key);
        id
    }

    /// Cancel one timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let slot = self
            .pending
            .keys()
            .find(|(_, pending)| *pending == id)
            .copied();
        slot.and_then(|slot| self.pending.remove(&slot)).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Move the clock to `now_ms` and pop every timer that is due, oldest first.
    /// Time never moves backwards.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Fired<K>> {
        self.now_ms = self.now_ms.max(now_ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (due, id) = *entry.key();
            if due > self.now_ms {
                break;
            }
            fired.push(Fired {
                id,
                due_ms: due,
                key: entry.remove(),
            });
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_in_order() {
        let mut queue = TimerQueue::new();
        queue.schedule("b", 200);
        queue.schedule("a", 100);

        assert!(queue.advance(50).is_empty());
        let fired: Vec<_> = queue.advance(250).into_iter().map(|f| (f.key, f.due_ms)).collect();
        assert_eq!(fired, vec![("a", 100), ("b", 200)]);
        assert!(queue.advance(1_000).is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule("snackbar", 3000);
        assert_eq!(queue.len(), 1);
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.advance(10_000).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut queue = TimerQueue::new();
        queue.advance(1_000);
        queue.schedule("x", 500);
        assert!(queue.advance(1_400).is_empty());
        assert_eq!(queue.advance(1_500).len(), 1);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut queue = TimerQueue::new();
        queue.advance(2_000);
        queue.advance(1_000);
        queue.schedule("x", 100);
        assert!(queue.advance(1_100).is_empty());
        assert_eq!(queue.advance(2_100).len(), 1);
    }

    #[test]
    fn test_schedule_at_past_time_fires_next_advance() {
        let mut queue = TimerQueue::new();
        queue.advance(5_000);
        queue.schedule_at("late", 3_000);
        let fired = queue.advance(5_000);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].due_ms, 3_000);
    }
}
