// Example: how the running average converges as batches are measured.
use flowlist::{HeightCache, WindowCalculator};

fn main() {
    let mut cache = HeightCache::new();
    let calc = WindowCalculator::new(14);

    // Before the host is laid out, the viewport reports size 0 and the
    // planner hands back an initial batch to measure.
    let bootstrap = calc.compute_window(&cache, 0, 0, 500, 400);
    println!("bootstrap window: {bootstrap:?}");

    // Rows in this list are consistently taller than the 80px cold start.
    // Each measured batch pulls the average toward reality.
    for round in 0..5 {
        let start = bootstrap.len() * round;
        cache.record_batch((start..start + bootstrap.len()).map(|i| (i, 150)));
        println!(
            "round {round}: avg={:.1}px unmeasured row estimate={}px",
            cache.running_average(),
            cache.estimate(499)
        );
    }

    println!(
        "total for 500 rows: {}px (spacing included)",
        calc.total_size(&cache, 500)
    );
}
