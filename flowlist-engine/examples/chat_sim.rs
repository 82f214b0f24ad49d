// Example: a chat thread going through the usual life of a live list:
// initial load, new messages appended, older history prepended.
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use flowlist_engine::{
    Countdown, Engine, EngineOptions, HasCountdown, ListItem, ScrollTarget, ViewportBridge, Window,
};

#[derive(Clone)]
struct Msg {
    id: u64,
    body: String,
}

impl Msg {
    fn new(id: u64) -> Self {
        Self {
            id,
            body: format!("message {id}"),
        }
    }
}

impl ListItem for Msg {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }

    fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.body.hash(&mut hasher);
        hasher.finish()
    }
}

impl HasCountdown for Msg {
    fn countdown(&self) -> Option<Countdown> {
        None
    }
}

/// Prints every command the engine issues, standing in for a real scroll
/// container.
struct LogBridge {
    scroll_offset: u64,
    viewport_size: u32,
    total: u64,
}

impl ViewportBridge for LogBridge {
    fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    fn set_rendered_range(&mut self, window: Window) {
        println!("  bridge: render rows {}..{}", window.start, window.end);
    }

    fn set_rendered_content_offset(&mut self, offset_px: u64) {
        println!("  bridge: place rendered slice at {offset_px}px");
    }

    fn set_total_content_size(&mut self, total_px: u64) {
        self.total = total_px;
        println!("  bridge: total content {total_px}px");
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        self.scroll_offset = match target {
            ScrollTarget::Offset(px) => px,
            ScrollTarget::End => self.total.saturating_sub(self.viewport_size as u64),
        };
        println!("  bridge: scroll_to {target:?} -> offset {}px", self.scroll_offset);
    }
}

fn main() {
    let bridge = LogBridge {
        scroll_offset: 0,
        viewport_size: 600,
        total: 0,
    };
    let mut engine = Engine::new(bridge, EngineOptions::new());

    println!("initial load of 50 messages:");
    engine.apply_snapshot((100..150).map(Msg::new).collect(), 0);
    // The host renders, measures, and confirms.
    let window = engine.window();
    engine.record_heights((window.start..window.end).map(|i| (i, 96)));
    engine.render_complete(0);

    println!("\n3 new messages arrive while pinned to the bottom:");
    engine.apply_snapshot((100..153).map(Msg::new).collect(), 1_000);
    engine.render_complete(1_000);

    println!("\nuser scrolls to the top and pages in 20 older messages:");
    engine.on_scroll(0);
    let mut with_history: Vec<Msg> = (80..100).map(Msg::new).collect();
    with_history.extend((100..153).map(Msg::new));
    engine.apply_snapshot(with_history, 2_000);
    engine.render_complete(2_000);

    println!("\nfinal state: {engine:?}");
}
