use flowlist::{ScrollTarget, Window};

/// The host scroll container, as the engine sees it.
///
/// The bridge reports current geometry and accepts imperative render/scroll
/// commands. Commands are issued synchronously; the host applies them to its
/// real layout and, once the visual effect has landed, confirms by calling
/// [`Engine::render_complete`] (typically together with
/// [`Engine::record_heights`] for the freshly rendered rows).
///
/// That two-phase command/confirmation protocol is what serializes
/// structural reconciliations: an operation is "in flight" from the moment
/// its commands are issued until the host confirms, and the engine drops any
/// structural snapshot that arrives in between.
///
/// [`Engine::render_complete`]: crate::Engine::render_complete
/// [`Engine::record_heights`]: crate::Engine::record_heights
pub trait ViewportBridge {
    /// Current scroll offset in px.
    fn scroll_offset(&self) -> u64;

    /// Current viewport size in px along the scroll axis. `0` means the host
    /// has not been laid out yet; the engine falls back to an initial batch.
    fn viewport_size(&self) -> u32;

    /// Materialize exactly this index range.
    fn set_rendered_range(&mut self, window: Window);

    /// Absolute offset of the rendered range within the total content.
    fn set_rendered_content_offset(&mut self, offset_px: u64);

    /// Current estimated total content size.
    fn set_total_content_size(&mut self, total_px: u64);

    /// Move the scroll position. [`ScrollTarget::End`] pins to the bottom of
    /// the content, wherever that currently is.
    fn scroll_to(&mut self, target: ScrollTarget);
}
