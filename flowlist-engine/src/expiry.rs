use crate::key::KeyMap;
use crate::{EngineKey, HasCountdown, ListItem};

/// A live countdown attached to an item: a recorded "viewed at" timestamp
/// plus a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    pub viewed_at_ms: u64,
    pub duration_ms: u64,
}

impl Countdown {
    /// Whole seconds left at `now_ms`, rounded up. Non-increasing for a
    /// fixed countdown as `now_ms` advances; reaches exactly 0, never
    /// negative.
    pub fn remaining_seconds(&self, now_ms: u64) -> u64 {
        let deadline = self.viewed_at_ms.saturating_add(self.duration_ms);
        let left_ms = deadline.saturating_sub(now_ms);
        left_ms.div_ceil(1000)
    }
}

/// Timer-driven read side-channel for items carrying a live countdown.
///
/// The tracker never mutates the sequence. It selects the active subset on
/// every [`sync`], publishes per-item remaining seconds on every [`tick`],
/// and reports via [`is_running`] whether the host should keep its 1 s
/// interval alive — the tick loop starts lazily with the first active item
/// and stops when the subset drains, so an idle list holds no timers.
///
/// When an item's countdown hits 0 the payload's derived expiry flag flips
/// upstream and comes back through the ordinary snapshot path as a data-only
/// change; the tracker itself only reports numbers.
///
/// [`sync`]: CountdownTracker::sync
/// [`tick`]: CountdownTracker::tick
/// [`is_running`]: CountdownTracker::is_running
#[derive(Clone, Debug)]
pub struct CountdownTracker<K> {
    active: KeyMap<K, Countdown>,
    remaining: KeyMap<K, u64>,
}

impl<K: Clone + EngineKey> CountdownTracker<K> {
    pub fn new() -> Self {
        Self {
            active: KeyMap::new(),
            remaining: KeyMap::new(),
        }
    }

    /// Reselects the active subset from the current sequence.
    ///
    /// Published values for items no longer in the sequence are dropped;
    /// items whose countdown already elapsed publish 0 but do not keep the
    /// tracker running.
    pub fn sync<T>(&mut self, items: &[T], now_ms: u64)
    where
        T: ListItem<Key = K> + HasCountdown,
    {
        self.active.clear();
        let mut remaining = KeyMap::new();
        for item in items {
            let Some(countdown) = item.countdown() else {
                continue;
            };
            let left = countdown.remaining_seconds(now_ms);
            remaining.insert(item.key(), left);
            if left > 0 {
                self.active.insert(item.key(), countdown);
            }
        }
        self.remaining = remaining;
        ftrace!(active = self.active.len(), "countdown sync");
    }

    /// Advances all active countdowns to `now_ms`.
    ///
    /// Returns the number of countdowns that reached 0 on this tick. Expired
    /// entries publish a final 0 and leave the active set.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        if self.active.is_empty() {
            return 0;
        }
        let mut expired = 0;
        let remaining = &mut self.remaining;
        self.active.retain(|key, countdown| {
            let left = countdown.remaining_seconds(now_ms);
            remaining.insert(key.clone(), left);
            if left == 0 {
                expired += 1;
                false
            } else {
                true
            }
        });
        if expired > 0 {
            fdebug!(expired, still_active = self.active.len(), "countdowns expired");
        }
        expired
    }

    /// Published remaining seconds for an item, or `None` if the item has no
    /// countdown (or left the sequence).
    pub fn remaining_seconds(&self, key: &K) -> Option<u64> {
        self.remaining.get(key).copied()
    }

    /// Whether any countdown is still live. Hosts drive their 1 s interval
    /// off this: start it when `is_running` turns true, stop when it turns
    /// false.
    pub fn is_running(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.remaining.clear();
    }
}

impl<K: Clone + EngineKey> Default for CountdownTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
