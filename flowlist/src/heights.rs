#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type IndexSizeMap = HashMap<usize, u32>;
#[cfg(not(feature = "std"))]
type IndexSizeMap = BTreeMap<usize, u32>;

/// Height used for any index before the first batch of measurements lands.
pub const DEFAULT_ESTIMATE_PX: u32 = 80;

/// Smoothing factor retained from the previous running average when a fresh
/// batch is folded in (`avg = avg * 0.7 + batch_avg * 0.3`).
const SMOOTHING_KEEP: f32 = 0.7;
const SMOOTHING_BATCH: f32 = 0.3;

/// Stores measured per-index heights and estimates the rest.
///
/// Entries are only ever cleared in full, when the sequence resets to empty.
/// There is no partial invalidation: an entry that scrolled far away is
/// intentionally retained, since the item it measured is still the same item.
/// When older items are prepended the caller re-keys entries with [`shift`]
/// so measurements stay attached to the rows that produced them.
///
/// [`shift`]: HeightCache::shift
#[derive(Clone, Debug)]
pub struct HeightCache {
    measured: IndexSizeMap,
    avg: f32,
}

impl HeightCache {
    pub fn new() -> Self {
        Self {
            measured: IndexSizeMap::new(),
            avg: DEFAULT_ESTIMATE_PX as f32,
        }
    }

    /// Records one measured height. Equivalent to a batch of one.
    pub fn record(&mut self, index: usize, height_px: u32) {
        self.record_batch([(index, height_px)]);
    }

    /// Records a batch of freshly measured heights, then folds the batch
    /// mean into the running average by exponential smoothing.
    pub fn record_batch(&mut self, batch: impl IntoIterator<Item = (usize, u32)>) {
        let mut sum = 0u64;
        let mut n = 0u64;
        for (index, height_px) in batch {
            self.measured.insert(index, height_px);
            sum = sum.saturating_add(height_px as u64);
            n += 1;
        }
        if n == 0 {
            return;
        }
        let batch_avg = sum as f32 / n as f32;
        self.avg = self.avg * SMOOTHING_KEEP + batch_avg * SMOOTHING_BATCH;
        ftrace!(batch = n, avg = self.avg, "record_batch");
    }

    /// Returns the measured height for `index`, or the current running
    /// average for indexes that were never rendered.
    pub fn estimate(&self, index: usize) -> u32 {
        match self.measured.get(&index) {
            Some(&h) => h,
            None => self.avg as u32,
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.contains_key(&index)
    }

    /// Number of cached measurements.
    pub fn len(&self) -> usize {
        self.measured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }

    pub fn running_average(&self) -> f32 {
        self.avg
    }

    /// Full reset. Called only when the sequence count transitions to 0.
    ///
    /// The running average is kept: it reflects the kind of content this
    /// list shows, which outlives any one snapshot.
    pub fn clear(&mut self) {
        fdebug!(entries = self.measured.len(), "clear");
        self.measured.clear();
    }

    /// Re-keys every entry by `delta`.
    ///
    /// Used when items are inserted at the head of the sequence: the item
    /// previously at index `i` is now at `i + delta` and its measurement
    /// moves with it. Entries that would shift below index 0 are dropped.
    pub fn shift(&mut self, delta: isize) {
        if delta == 0 || self.measured.is_empty() {
            return;
        }
        let old = core::mem::take(&mut self.measured);
        for (index, height) in old {
            if let Some(new_index) = index.checked_add_signed(delta) {
                self.measured.insert(new_index, height);
            }
        }
        fdebug!(delta, entries = self.measured.len(), "shift");
    }
}

impl Default for HeightCache {
    fn default() -> Self {
        Self::new()
    }
}
