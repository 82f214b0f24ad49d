//! Headless windowing math for live, append-heavy lists (chat threads, feeds).
//!
//! This crate holds the pure, UI-agnostic pieces of a virtualized list:
//! per-index height measurement with an adaptive estimator for unmeasured
//! items, and a planner that maps a scroll offset + viewport size onto the
//! index range worth materializing.
//!
//! It deliberately knows nothing about where the data comes from or how it
//! changes over time. Snapshot diffing, scroll anchoring across structural
//! changes, and countdown side-channels live in the `flowlist-engine` crate.
//!
//! A host layer is expected to provide:
//! - viewport size and scroll offset (in px along the scroll axis)
//! - real item heights once rendered, fed back via [`HeightCache`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod heights;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use heights::HeightCache;
pub use types::{ScrollTarget, ViewportState, Window};
pub use window::WindowCalculator;
