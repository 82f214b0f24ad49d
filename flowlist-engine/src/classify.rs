use crate::ListItem;
use crate::key::KeyMap;

/// The minimal memo needed to classify the next snapshot.
///
/// Updated only after a structural operation completes, so a snapshot that
/// arrives while one is in flight is reclassified later against the state as
/// it existed before that operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackingState<K> {
    pub last_count: usize,
    pub last_first_key: Option<K>,
    pub last_last_key: Option<K>,
}

impl<K> Default for TrackingState<K> {
    fn default() -> Self {
        Self {
            last_count: 0,
            last_first_key: None,
            last_last_key: None,
        }
    }
}

impl<K: Clone> TrackingState<K> {
    /// Captures the tracking memo for a snapshot.
    pub fn of<T: ListItem<Key = K>>(items: &[T]) -> Self {
        Self {
            last_count: items.len(),
            last_first_key: items.first().map(ListItem::key),
            last_last_key: items.last().map(ListItem::key),
        }
    }
}

/// How a new snapshot differs from the last committed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The sequence reset to empty.
    Cleared,
    /// First non-empty snapshot (or first after a reset).
    InitialLoad,
    /// New items arrived at the tail.
    Append { added: usize },
    /// Older items were inserted at the head.
    Prepend { added: usize },
    /// One or more items were removed.
    Deletion,
    /// Identities and count unchanged; payloads may have mutated in place.
    DataOnly,
    /// Ambiguous mutation (both ends changed, duplicate identities, ...);
    /// handled conservatively as a full reload.
    Structural,
}

impl Change {
    /// Whether recovering from this change rematerializes the window and
    /// must therefore be serialized behind the reconciling flag.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Change::DataOnly)
    }
}

/// Classifies a snapshot against the last committed tracking state.
///
/// Identities must be unique within a snapshot. A duplicate is a caller bug:
/// it trips a debug assertion, and in release builds the snapshot degrades
/// to [`Change::Structural`] (full reload) instead of misclassifying.
pub fn classify<T: ListItem>(tracking: &TrackingState<T::Key>, snapshot: &[T]) -> Change {
    let count = snapshot.len();
    if count == 0 {
        return Change::Cleared;
    }
    if tracking.last_count == 0 {
        return Change::InitialLoad;
    }

    if has_duplicate_keys(snapshot) {
        debug_assert!(false, "duplicate item identities in snapshot");
        return Change::Structural;
    }

    let first = snapshot[0].key();
    let last = snapshot[count - 1].key();
    let first_changed = tracking.last_first_key.as_ref() != Some(&first);
    let last_changed = tracking.last_last_key.as_ref() != Some(&last);
    let count_increased = count > tracking.last_count;
    let count_decreased = count < tracking.last_count;

    if first_changed && !last_changed && count_increased {
        Change::Prepend {
            added: count - tracking.last_count,
        }
    } else if last_changed && !first_changed && count_increased {
        Change::Append {
            added: count - tracking.last_count,
        }
    } else if count_decreased {
        Change::Deletion
    } else if !first_changed && !last_changed && count == tracking.last_count {
        Change::DataOnly
    } else {
        Change::Structural
    }
}

fn has_duplicate_keys<T: ListItem>(snapshot: &[T]) -> bool {
    let mut seen: KeyMap<T::Key, ()> = KeyMap::new();
    for item in snapshot {
        if seen.insert(item.key(), ()).is_some() {
            return true;
        }
    }
    false
}
