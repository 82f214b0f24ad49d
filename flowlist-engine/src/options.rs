/// Configuration for [`crate::Engine`].
///
/// Plain data, cheap to clone. Defaults match a typical chat thread layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOptions {
    /// Fixed layout gap between items, added to every height when computing
    /// offsets and totals.
    pub item_spacing: u32,

    /// Slack (px) the current window must keep around the viewport before a
    /// scroll forces re-materialization.
    pub min_buffer_px: u32,

    /// Render-ahead margin (px) on each side of the viewport when a window
    /// is (re)computed. Widening trades more off-screen rendering for fewer
    /// recomputation passes.
    pub max_buffer_px: u32,

    /// Largest append handled incrementally by extending the window. Bigger
    /// batches fall back to a full reload anchored at the bottom.
    pub small_append_max: usize,

    /// Delay before the bottom anchor is re-asserted after a reload, giving
    /// late measurements time to shift the total content size.
    pub settle_delay_ms: u64,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self {
            item_spacing: 14,
            min_buffer_px: 200,
            max_buffer_px: 400,
            small_append_max: 5,
            settle_delay_ms: 100,
        }
    }

    pub fn with_item_spacing(mut self, item_spacing: u32) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_buffers(mut self, min_buffer_px: u32, max_buffer_px: u32) -> Self {
        self.min_buffer_px = min_buffer_px;
        self.max_buffer_px = max_buffer_px;
        self
    }

    pub fn with_small_append_max(mut self, small_append_max: usize) -> Self {
        self.small_append_max = small_append_max;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}
