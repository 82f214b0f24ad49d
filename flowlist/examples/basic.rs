// Example: planning a render window over a long message history.
use flowlist::{HeightCache, WindowCalculator};

fn main() {
    let mut cache = HeightCache::new();
    let calc = WindowCalculator::new(14);
    let len = 1000;

    // Nothing measured yet: every row uses the cold-start estimate.
    println!("estimated total: {}px", calc.total_size(&cache, len));

    let w = calc.compute_window(&cache, 4000, 600, len, 400);
    println!(
        "window at offset 4000: {w:?} (content offset {}px)",
        calc.offset_of(&cache, w.start)
    );

    // The host renders the window and reports real heights back.
    cache.record_batch((w.start..w.end).map(|i| (i, 120)));
    println!(
        "after measuring {} rows: total={}px avg={:.1}px",
        w.len(),
        calc.total_size(&cache, len),
        cache.running_average()
    );
    println!(
        "window recomputed: {:?}",
        calc.compute_window(&cache, 4000, 600, len, 400)
    );
}
