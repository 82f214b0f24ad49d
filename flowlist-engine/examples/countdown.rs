// Example: the countdown side-channel for a view-once image timer.
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use flowlist_engine::{Countdown, CountdownTracker, HasCountdown, ListItem};

#[derive(Clone)]
struct Msg {
    id: u64,
    viewed_at_ms: Option<u64>,
}

impl ListItem for Msg {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }

    fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.viewed_at_ms.hash(&mut hasher);
        hasher.finish()
    }
}

impl HasCountdown for Msg {
    fn countdown(&self) -> Option<Countdown> {
        self.viewed_at_ms.map(|viewed_at_ms| Countdown {
            viewed_at_ms,
            duration_ms: 5_000,
        })
    }
}

fn main() {
    let items = vec![
        Msg { id: 1, viewed_at_ms: None },
        Msg { id: 2, viewed_at_ms: Some(0) },
        Msg { id: 3, viewed_at_ms: Some(2_000) },
    ];

    let mut tracker = CountdownTracker::new();
    tracker.sync(&items, 0);
    println!("running: {}", tracker.is_running());

    // The host keeps a 1s interval alive while is_running() holds.
    let mut now = 0;
    while tracker.is_running() {
        now += 1_000;
        let expired = tracker.tick(now);
        println!(
            "t={now}ms  msg2={:?}s  msg3={:?}s  expired_this_tick={expired}",
            tracker.remaining_seconds(&2),
            tracker.remaining_seconds(&3)
        );
    }
    println!("all timers drained; interval stops");
}
