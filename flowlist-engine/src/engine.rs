use alloc::vec::Vec;

use flowlist::{HeightCache, ScrollTarget, ViewportState, Window, WindowCalculator};

use crate::classify::{Change, TrackingState, classify};
use crate::expiry::CountdownTracker;
use crate::{EngineOptions, HasCountdown, ListItem, ViewportBridge};

/// Result of feeding one snapshot into the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The snapshot was classified and its recovery action issued.
    Applied(Change),
    /// A structural reconciliation was already in flight; the snapshot was
    /// dropped. The next settled snapshot reclassifies against the tracking
    /// state of the last *completed* operation, so nothing is lost.
    DroppedBusy,
}

/// Tracking memo staged by an in-flight structural operation, committed only
/// when the host confirms the visual effect.
struct PendingCommit<K> {
    tracking: TrackingState<K>,
    reassert_end: bool,
}

/// The real-time virtualized list engine.
///
/// Owns the current sequence snapshot and all derived state (height cache,
/// materialized window, tracking memo, countdown side-channel) and drives a
/// [`ViewportBridge`] through the correct recovery action for every way the
/// sequence can change: append, prepend, deletion, in-place mutation, or an
/// ambiguous structural shuffle.
///
/// Single-threaded and event-driven. Three event sources interleave:
///
/// - [`on_scroll`] from the host scroll container (always cheap, never
///   blocked),
/// - [`apply_snapshot`] pushes of the complete current sequence,
/// - a 1 s [`tick`] for countdowns and the post-reload settle re-assert.
///
/// Structural reconciliations are strictly serialized: from the moment one
/// issues bridge commands until the host calls [`render_complete`], further
/// structural snapshots are dropped. Data-only updates apply at any time.
///
/// [`on_scroll`]: Engine::on_scroll
/// [`apply_snapshot`]: Engine::apply_snapshot
/// [`tick`]: Engine::tick
/// [`render_complete`]: Engine::render_complete
pub struct Engine<T: ListItem, B> {
    bridge: B,
    options: EngineOptions,
    calc: WindowCalculator,
    heights: HeightCache,
    items: Vec<T>,
    window: Window,
    tracking: TrackingState<T::Key>,
    reconciling: bool,
    pending: Option<PendingCommit<T::Key>>,
    settle_deadline_ms: Option<u64>,
    countdowns: CountdownTracker<T::Key>,
}

impl<T, B> Engine<T, B>
where
    T: ListItem + HasCountdown,
    B: ViewportBridge,
{
    pub fn new(bridge: B, options: EngineOptions) -> Self {
        Self {
            bridge,
            calc: WindowCalculator::new(options.item_spacing),
            options,
            heights: HeightCache::new(),
            items: Vec::new(),
            window: Window::EMPTY,
            tracking: TrackingState::default(),
            reconciling: false,
            pending: None,
            settle_deadline_ms: None,
            countdowns: CountdownTracker::new(),
        }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn into_bridge(self) -> B {
        self.bridge
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The index range currently materialized.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Whether a structural reconciliation is in flight (commands issued,
    /// host confirmation pending).
    pub fn is_reconciling(&self) -> bool {
        self.reconciling
    }

    /// Tracking memo of the last *completed* structural operation.
    pub fn tracking(&self) -> &TrackingState<T::Key> {
        &self.tracking
    }

    pub fn height_cache(&self) -> &HeightCache {
        &self.heights
    }

    /// Estimated total content size for the current sequence.
    pub fn total_size(&self) -> u64 {
        self.calc.total_size(&self.heights, self.items.len())
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            scroll_offset: self.bridge.scroll_offset(),
            viewport_size: self.bridge.viewport_size(),
            total_content_size: self.total_size(),
        }
    }

    /// The synchronous render callback: the host asks for `count` items
    /// starting at `start` and gets a slice of the resident snapshot,
    /// clamped into range.
    pub fn slice(&self, start: usize, count: usize) -> &[T] {
        let s = start.min(self.items.len());
        let e = start.saturating_add(count).min(self.items.len());
        &self.items[s..e]
    }

    /// Published remaining seconds for an item's countdown.
    pub fn remaining_seconds(&self, key: &T::Key) -> Option<u64> {
        self.countdowns.remaining_seconds(key)
    }

    /// Whether the host should keep its 1 s countdown interval alive.
    pub fn countdown_running(&self) -> bool {
        self.countdowns.is_running()
    }

    /// Feeds a complete sequence snapshot into the engine.
    ///
    /// The snapshot is classified against the last committed tracking state
    /// and the matching recovery action is issued to the bridge. Structural
    /// actions acquire the reconciling flag; if it is already held the
    /// snapshot is dropped, never queued.
    pub fn apply_snapshot(&mut self, snapshot: Vec<T>, now_ms: u64) -> ApplyOutcome {
        let change = classify(&self.tracking, &snapshot);
        fdebug!(count = snapshot.len(), ?change, "apply_snapshot");

        if self.reconciling && (change.is_structural() || snapshot.len() != self.items.len()) {
            fdebug!("snapshot dropped; reconciliation in flight");
            return ApplyOutcome::DroppedBusy;
        }

        match change {
            Change::Cleared => self.clear(),
            Change::DataOnly => self.apply_data_only(snapshot),
            Change::Append { added } if added <= self.options.small_append_max => {
                self.extend_appended(snapshot, added)
            }
            Change::Prepend { added } => self.reload_prepended(snapshot, added),
            Change::Deletion => self.reload_after_deletion(snapshot),
            Change::InitialLoad | Change::Structural | Change::Append { .. } => {
                self.reload_at_end(snapshot)
            }
        }

        self.countdowns.sync(&self.items, now_ms);
        ApplyOutcome::Applied(change)
    }

    /// Host confirmation that the last issued structural commands have taken
    /// visual effect. Commits the staged tracking memo and releases the
    /// reconciling flag.
    pub fn render_complete(&mut self, now_ms: u64) {
        let Some(pending) = self.pending.take() else {
            self.reconciling = false;
            return;
        };
        self.tracking = pending.tracking;
        self.reconciling = false;
        if pending.reassert_end {
            self.settle_deadline_ms = Some(now_ms.saturating_add(self.options.settle_delay_ms));
        }
    }

    /// Scroll event from the host. Recomputes the window if the current one
    /// no longer keeps enough slack around the viewport. Never guarded by
    /// the reconciling flag: it reads only the materialized window and
    /// cached heights.
    pub fn on_scroll(&mut self, scroll_offset: u64) {
        let len = self.items.len();
        let viewport = self.bridge.viewport_size();
        if self.calc.covers(
            &self.heights,
            self.window,
            scroll_offset,
            viewport,
            len,
            self.options.min_buffer_px,
        ) {
            return;
        }

        let window = self.calc.compute_window(
            &self.heights,
            scroll_offset,
            viewport,
            len,
            self.options.max_buffer_px,
        );
        if window == self.window {
            return;
        }
        ftrace!(scroll_offset, ?window, "on_scroll rematerialize");
        self.window = window;
        self.bridge.set_rendered_range(window);
        self.bridge
            .set_rendered_content_offset(self.calc.offset_of(&self.heights, window.start));
    }

    /// Feeds real heights for freshly rendered rows back into the cache and
    /// pushes the corrected geometry. Estimation drift is self-healing:
    /// every rendered batch tightens the cache and the running average.
    pub fn record_heights(&mut self, batch: impl IntoIterator<Item = (usize, u32)>) {
        self.heights.record_batch(batch);
        let total = self.total_size();
        self.bridge.set_total_content_size(total);
        self.bridge
            .set_rendered_content_offset(self.calc.offset_of(&self.heights, self.window.start));
        self.on_scroll(self.bridge.scroll_offset());
    }

    /// Periodic tick (expected roughly every second). Drives countdowns and
    /// the post-reload bottom re-assert.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(deadline) = self.settle_deadline_ms {
            if now_ms >= deadline {
                self.settle_deadline_ms = None;
                self.bridge.scroll_to(ScrollTarget::End);
            }
        }
        self.countdowns.tick(now_ms);
    }

    /// Tears down timer state. An in-flight structural reconciliation is
    /// allowed to complete via [`render_complete`]; cancelling it would
    /// leave the window inconsistent.
    ///
    /// [`render_complete`]: Engine::render_complete
    pub fn shutdown(&mut self) {
        self.countdowns.clear();
        self.settle_deadline_ms = None;
    }

    fn clear(&mut self) {
        self.items.clear();
        self.heights.clear();
        self.window = Window::EMPTY;
        self.tracking = TrackingState::default();
        self.pending = None;
        self.settle_deadline_ms = None;
        self.bridge.set_total_content_size(0);
        self.bridge.set_rendered_range(Window::EMPTY);
        self.bridge.set_rendered_content_offset(0);
    }

    fn apply_data_only(&mut self, snapshot: Vec<T>) {
        let mut changed = 0usize;
        let upper = self.window.end.min(snapshot.len()).min(self.items.len());
        for i in self.window.start..upper {
            if self.items[i].key() == snapshot[i].key()
                && self.items[i].content_hash() != snapshot[i].content_hash()
            {
                changed += 1;
            }
        }
        ftrace!(changed, "data-only update");
        // Stored payloads are replaced wholesale (never mutated in place),
        // so reference-equality change detection in the host stays correct.
        // Window and scroll position are untouched.
        self.items = snapshot;
    }

    fn reload_at_end(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
        let len = self.items.len();
        let viewport = self.bridge.viewport_size();
        let total = self.total_size();
        let anchor_offset = total.saturating_sub(viewport as u64);
        let window = self.calc.compute_window(
            &self.heights,
            anchor_offset,
            viewport,
            len,
            self.options.max_buffer_px,
        );
        self.push_window(window, total);
        self.bridge.scroll_to(ScrollTarget::End);
        self.begin_commit(true);
    }

    fn extend_appended(&mut self, snapshot: Vec<T>, added: usize) {
        self.items = snapshot;
        let len = self.items.len();
        let window = Window::new(
            self.window.start,
            self.window.end.saturating_add(added).min(len),
        );
        let total = self.total_size();
        self.push_window(window, total);
        self.bridge.scroll_to(ScrollTarget::End);
        self.begin_commit(true);
    }

    fn reload_prepended(&mut self, snapshot: Vec<T>, added: usize) {
        // Anchor on the first materialized item before touching anything:
        // its numeric index shifts by the prepended count, but its visual
        // position must not move.
        let old_anchor = self.window.start;
        let offset_in_viewport = self
            .bridge
            .scroll_offset()
            .saturating_sub(self.calc.offset_of(&self.heights, old_anchor));

        self.heights.shift(added as isize);
        self.items = snapshot;
        let len = self.items.len();
        let anchor = (old_anchor + added).min(len.saturating_sub(1));
        let target = self
            .calc
            .offset_of(&self.heights, anchor)
            .saturating_add(offset_in_viewport);

        let viewport = self.bridge.viewport_size();
        let window =
            self.calc
                .compute_window(&self.heights, target, viewport, len, self.options.max_buffer_px);
        let total = self.total_size();
        self.push_window(window, total);
        self.bridge.scroll_to(ScrollTarget::Offset(target));
        self.begin_commit(false);
    }

    fn reload_after_deletion(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
        let len = self.items.len();
        debug_assert!(len > 0, "empty snapshots classify as Cleared");
        let anchor = self.window.start.min(len.saturating_sub(1));
        let target = self.calc.offset_of(&self.heights, anchor);
        let viewport = self.bridge.viewport_size();
        let window =
            self.calc
                .compute_window(&self.heights, target, viewport, len, self.options.max_buffer_px);
        let total = self.total_size();
        self.push_window(window, total);
        self.bridge.scroll_to(ScrollTarget::Offset(target));
        self.begin_commit(false);
    }

    fn push_window(&mut self, window: Window, total: u64) {
        self.window = window;
        self.bridge.set_total_content_size(total);
        self.bridge.set_rendered_range(window);
        self.bridge
            .set_rendered_content_offset(self.calc.offset_of(&self.heights, window.start));
    }

    fn begin_commit(&mut self, reassert_end: bool) {
        // A new structural operation supersedes any pending bottom
        // re-assert; end-anchored operations re-arm it on completion.
        self.settle_deadline_ms = None;
        self.pending = Some(PendingCommit {
            tracking: TrackingState::of(&self.items),
            reassert_end,
        });
        self.reconciling = true;
    }
}

impl<T: ListItem, B> core::fmt::Debug for Engine<T, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("count", &self.items.len())
            .field("window", &self.window)
            .field("reconciling", &self.reconciling)
            .field("measured", &self.heights.len())
            .finish_non_exhaustive()
    }
}
