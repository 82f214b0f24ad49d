use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

fn cache_with_heights(heights: &[u32]) -> HeightCache {
    let mut cache = HeightCache::new();
    cache.record_batch(heights.iter().copied().enumerate());
    cache
}

fn expected_total(cache: &HeightCache, spacing: u32, len: usize) -> u64 {
    (0..len)
        .map(|i| cache.estimate(i) as u64 + spacing as u64)
        .sum()
}

fn expected_offset(cache: &HeightCache, spacing: u32, index: usize) -> u64 {
    (0..index)
        .map(|i| cache.estimate(i) as u64 + spacing as u64)
        .sum()
}

#[test]
fn estimate_defaults_to_eighty_px_cold() {
    let cache = HeightCache::new();
    assert_eq!(cache.estimate(0), 80);
    assert_eq!(cache.estimate(12345), 80);
    assert!(!cache.is_measured(0));
}

#[test]
fn measured_heights_win_over_the_average() {
    let mut cache = HeightCache::new();
    cache.record(3, 200);
    assert_eq!(cache.estimate(3), 200);
    assert!(cache.is_measured(3));
    assert!(!cache.is_measured(2));
}

#[test]
fn running_average_uses_exponential_smoothing() {
    let mut cache = HeightCache::new();
    // batch mean 120 => avg = 80 * 0.7 + 120 * 0.3 = 92
    cache.record_batch([(0, 100), (1, 140)]);
    assert!((cache.running_average() - 92.0).abs() < 1e-3);
    assert_eq!(cache.estimate(99), 92);

    // second batch mean 92 leaves the average fixed
    cache.record_batch([(2, 92), (3, 92)]);
    assert!((cache.running_average() - 92.0).abs() < 1e-3);
}

#[test]
fn empty_batch_does_not_move_the_average() {
    let mut cache = HeightCache::new();
    cache.record_batch(core::iter::empty());
    assert!((cache.running_average() - 80.0).abs() < 1e-6);
}

#[test]
fn clear_drops_measurements_but_keeps_the_average() {
    let mut cache = HeightCache::new();
    cache.record_batch([(0, 120), (1, 120)]);
    let avg = cache.running_average();
    cache.clear();
    assert_eq!(cache.len(), 0);
    assert!(!cache.is_measured(0));
    assert!((cache.running_average() - avg).abs() < 1e-6);
}

#[test]
fn shift_rekeys_entries_and_drops_underflow() {
    let mut cache = HeightCache::new();
    cache.record_batch([(0, 10), (1, 20), (5, 50)]);

    cache.shift(3);
    assert_eq!(cache.estimate(3), 10);
    assert_eq!(cache.estimate(4), 20);
    assert_eq!(cache.estimate(8), 50);
    assert!(!cache.is_measured(0));

    cache.shift(-4);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.estimate(0), 20);
    assert_eq!(cache.estimate(4), 50);
}

#[test]
fn total_and_offset_are_prefix_sums_with_spacing() {
    let cache = cache_with_heights(&[10, 20, 30]);
    let calc = WindowCalculator::new(5);
    assert_eq!(calc.total_size(&cache, 3), 10 + 5 + 20 + 5 + 30 + 5);
    assert_eq!(calc.offset_of(&cache, 0), 0);
    assert_eq!(calc.offset_of(&cache, 1), 15);
    assert_eq!(calc.offset_of(&cache, 2), 40);
}

#[test]
fn empty_sequence_yields_empty_window_and_zero_total() {
    let cache = HeightCache::new();
    let calc = WindowCalculator::new(14);
    assert_eq!(calc.total_size(&cache, 0), 0);
    let w = calc.compute_window(&cache, 0, 600, 0, 400);
    assert_eq!(w, Window::EMPTY);
}

#[test]
fn unsized_viewport_yields_fallback_batch() {
    let cache = HeightCache::new();
    let calc = WindowCalculator::new(14);
    assert_eq!(calc.compute_window(&cache, 0, 0, 100, 400), Window::new(0, 20));
    assert_eq!(calc.compute_window(&cache, 0, 0, 7, 400), Window::new(0, 7));
}

#[test]
fn buffered_window_around_scroll_offset() {
    // 1000 items, 80px each, spacing 14 => pitch 94.
    let cache = HeightCache::new();
    let calc = WindowCalculator::new(14);
    let w = calc.compute_window(&cache, 4000, 600, 1000, 400);

    assert!(w.start >= 35 && w.start <= 45, "start = {}", w.start);
    assert!(w.end >= 50 && w.end <= 55, "end = {}", w.end);
    assert!(!w.contains(0));
    assert!(!w.contains(999));

    // The covered span must actually include the buffered viewport.
    let start_off = calc.offset_of(&cache, w.start);
    let end_off = calc.offset_of(&cache, w.end);
    assert!(start_off <= 4000 - 400);
    assert!(end_off >= 4000 + 600 + 400);
}

#[test]
fn compute_window_is_idempotent() {
    let mut lcg = Lcg::new(7);
    let heights: Vec<u32> = (0..200).map(|_| lcg.gen_range_u32(1, 300)).collect();
    let cache = cache_with_heights(&heights);
    let calc = WindowCalculator::new(14);

    let a = calc.compute_window(&cache, 9_000, 600, 200, 400);
    let b = calc.compute_window(&cache, 9_000, 600, 200, 400);
    assert_eq!(a, b);
}

#[test]
fn scroll_past_the_end_still_yields_a_valid_window() {
    let cache = cache_with_heights(&[80; 5]);
    let calc = WindowCalculator::new(14);
    let w = calc.compute_window(&cache, 1_000_000, 600, 5, 400);
    assert!(w.start <= w.end && w.end <= 5);
    assert!(!w.is_empty());
    assert_eq!(w.end, 5);
}

#[test]
fn window_validity_random_sweep() {
    let mut lcg = Lcg::new(42);
    let calc = WindowCalculator::new(14);

    for _ in 0..200 {
        let len = lcg.gen_range_usize(0, 500);
        let mut cache = HeightCache::new();
        for i in 0..len {
            if lcg.next_u64() & 1 == 0 {
                cache.record(i, lcg.gen_range_u32(1, 500));
            }
        }
        let scroll = lcg.gen_range_u64(0, 200_000);
        let viewport = lcg.gen_range_u32(0, 2_000);
        let buffer = lcg.gen_range_u32(0, 1_000);

        let w = calc.compute_window(&cache, scroll, viewport, len, buffer);
        assert!(w.start <= w.end, "start {} > end {}", w.start, w.end);
        assert!(w.end <= len, "end {} > len {len}", w.end);
        if len > 0 && viewport > 0 {
            assert!(!w.is_empty(), "empty window for len={len}");
        }

        // Offsets match the naive prefix-sum oracle.
        assert_eq!(calc.total_size(&cache, len), expected_total(&cache, 14, len));
        if len > 0 {
            let idx = lcg.gen_range_usize(0, len);
            assert_eq!(calc.offset_of(&cache, idx), expected_offset(&cache, 14, idx));
        }
    }
}

#[test]
fn covers_accepts_windows_with_enough_slack() {
    let cache = HeightCache::new();
    let calc = WindowCalculator::new(14);
    let w = calc.compute_window(&cache, 4000, 600, 1000, 400);

    // Right where it was computed, with a smaller min buffer, it covers.
    assert!(calc.covers(&cache, w, 4000, 600, 1000, 200));
    // A small scroll keeps it covered; a large one does not.
    assert!(calc.covers(&cache, w, 4100, 600, 1000, 200));
    assert!(!calc.covers(&cache, w, 8000, 600, 1000, 200));
}

#[test]
fn covers_handles_edges() {
    let cache = HeightCache::new();
    let calc = WindowCalculator::new(14);

    // Empty sequence: only the empty window covers it.
    assert!(calc.covers(&cache, Window::EMPTY, 0, 600, 0, 200));
    // Non-empty sequence: the empty window never covers.
    assert!(!calc.covers(&cache, Window::EMPTY, 0, 600, 10, 200));
    // Window spanning the whole sequence covers any clamped offset.
    let all = Window::new(0, 10);
    assert!(calc.covers(&cache, all, 0, 600, 10, 200));
    assert!(calc.covers(&cache, all, 940, 600, 10, 200));
}

#[test]
fn window_helpers() {
    let w = Window::new(3, 7);
    assert_eq!(w.len(), 4);
    assert!(w.contains(3));
    assert!(w.contains(6));
    assert!(!w.contains(7));
    assert!(!Window::EMPTY.contains(0));
    assert!(Window::EMPTY.is_empty());
}
