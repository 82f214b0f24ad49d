//! Snapshot reconciliation for the `flowlist` windowing crate.
//!
//! The `flowlist` crate is pure math: heights in, window out. This crate
//! adds everything needed to keep that window correct and visually stable
//! while the underlying sequence is live:
//!
//! - classification of full-snapshot diffs (append, prepend, deletion,
//!   data-only mutation, or an ambiguous structural change)
//! - the recovery action per class, driven through a [`ViewportBridge`]
//!   with a strict one-in-flight guarantee
//! - scroll anchoring so prepends (older history paged in) never move what
//!   the user is looking at
//! - a countdown side-channel for items with timed expiry
//!
//! The engine is an in-process library component: no I/O, no threads, no
//! wire protocol. Hosts feed it scroll events, complete sequence snapshots,
//! and a periodic tick, all with caller-supplied timestamps.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bridge;
mod classify;
mod engine;
mod expiry;
mod item;
mod key;
mod options;


pub use bridge::ViewportBridge;
pub use classify::{Change, TrackingState, classify};
pub use engine::{ApplyOutcome, Engine};
pub use expiry::{Countdown, CountdownTracker};
pub use item::{HasCountdown, ListItem};
pub use key::EngineKey;
pub use options::EngineOptions;

pub use flowlist::{ScrollTarget, ViewportState, Window};
