/// A half-open index range `[start, end)` currently materialized for
/// rendering.
///
/// `{0, 0}` is valid and means "render nothing".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize, // exclusive
}

impl Window {
    pub const EMPTY: Window = Window { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// A lightweight snapshot of the host scroll container's geometry.
///
/// `total_content_size` is the sum over the sequence of
/// `height(i) + item_spacing` as currently estimated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    pub viewport_size: u32,
    pub total_content_size: u64,
}

/// A scroll command target.
///
/// `End` means "scroll to the very bottom of the content, wherever that
/// currently is" and stays correct even while the total content size is still
/// converging from estimates to measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget {
    Offset(u64),
    End,
}
