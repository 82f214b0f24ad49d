use crate::heights::HeightCache;
use crate::types::Window;

/// Number of items materialized before the viewport has reported a size.
const FALLBACK_BATCH: usize = 20;

/// Minimum window length forced when huge estimates collapse the walk.
const MIN_FORCED_WINDOW: usize = 10;

/// Plans which index range of a long sequence to materialize.
///
/// All offsets are prefix sums of `estimate(i) + item_spacing`, computed by
/// O(n) walks over the height cache. That linear cost is the documented
/// baseline: callers must not invoke [`offset_of`]/[`total_size`] in tight
/// per-frame loops without memoizing.
///
/// [`offset_of`]: WindowCalculator::offset_of
/// [`total_size`]: WindowCalculator::total_size
#[derive(Clone, Copy, Debug)]
pub struct WindowCalculator {
    /// Fixed layout gap added to every item's height, so offsets and totals
    /// can be computed without access to the real layout.
    pub item_spacing: u32,
}

impl WindowCalculator {
    pub fn new(item_spacing: u32) -> Self {
        Self { item_spacing }
    }

    fn pitch(&self, cache: &HeightCache, index: usize) -> u64 {
        cache.estimate(index) as u64 + self.item_spacing as u64
    }

    /// Total estimated content size for a sequence of `len` items.
    pub fn total_size(&self, cache: &HeightCache, len: usize) -> u64 {
        let mut total = 0u64;
        for i in 0..len {
            total = total.saturating_add(self.pitch(cache, i));
        }
        total
    }

    /// Offset of the start of `index` within the total content.
    pub fn offset_of(&self, cache: &HeightCache, index: usize) -> u64 {
        let mut off = 0u64;
        for i in 0..index {
            off = off.saturating_add(self.pitch(cache, i));
        }
        off
    }

    /// Computes the index range worth materializing for the given scroll
    /// position.
    ///
    /// - An empty sequence yields `{0, 0}`.
    /// - A zero viewport (host not yet laid out) yields the fallback window
    ///   `{0, min(len, 20)}` so the host can render and measure an initial
    ///   batch.
    /// - Otherwise the range covers `max_buffer_px` of render-ahead on both
    ///   sides of the visible span.
    ///
    /// The result always satisfies `0 <= start <= end <= len`, and
    /// `end > start` whenever `len > 0`.
    pub fn compute_window(
        &self,
        cache: &HeightCache,
        scroll_offset: u64,
        viewport_size: u32,
        len: usize,
        max_buffer_px: u32,
    ) -> Window {
        if len == 0 {
            return Window::EMPTY;
        }
        if viewport_size == 0 {
            return Window::new(0, len.min(FALLBACK_BATCH));
        }

        let low = scroll_offset.saturating_sub(max_buffer_px as u64);
        let high = scroll_offset
            .saturating_add(viewport_size as u64)
            .saturating_add(max_buffer_px as u64);

        let mut offset = 0u64;
        let mut start = 0usize;
        while start < len {
            let next = offset.saturating_add(self.pitch(cache, start));
            if next > low {
                break;
            }
            offset = next;
            start += 1;
        }

        let mut end = start;
        while end < len && offset < high {
            offset = offset.saturating_add(self.pitch(cache, end));
            end += 1;
        }

        if end <= start {
            // Degenerate walk (scroll past the content, or estimates far
            // larger than the buffered span). Never hand back an empty
            // window for a non-empty sequence.
            start = start.min(len - 1);
            end = (start + MIN_FORCED_WINDOW).min(len);
        }

        ftrace!(scroll_offset, viewport_size, len, start, end, "compute_window");
        Window::new(start, end)
    }

    /// Returns `true` when `window` still covers the visible span plus at
    /// least `min_buffer_px` of slack on each side (clipped to the content
    /// bounds). Used to skip re-materialization on small scrolls.
    pub fn covers(
        &self,
        cache: &HeightCache,
        window: Window,
        scroll_offset: u64,
        viewport_size: u32,
        len: usize,
        min_buffer_px: u32,
    ) -> bool {
        if len == 0 {
            return window.is_empty();
        }
        if window.is_empty() || viewport_size == 0 {
            return false;
        }

        let total = self.total_size(cache, len);
        let low = scroll_offset.saturating_sub(min_buffer_px as u64);
        let high = scroll_offset
            .saturating_add(viewport_size as u64)
            .saturating_add(min_buffer_px as u64)
            .min(total);

        let win_start = self.offset_of(cache, window.start);
        let mut win_end = win_start;
        for i in window.start..window.end.min(len) {
            win_end = win_end.saturating_add(self.pitch(cache, i));
        }

        win_start <= low && win_end >= high
    }
}
