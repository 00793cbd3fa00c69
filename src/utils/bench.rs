//! Shared benchmark utilities: seeded input generation, shuffling and
//! timing statistics.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded RNG for reproducible benchmark inputs
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Vector of `len` integers drawn uniformly from `range`
pub fn random_vector<R: Rng>(rng: &mut R, len: usize, range: RangeInclusive<i32>) -> Vec<i32> {
    (0..len).map(|_| rng.random_range(range.clone())).collect()
}

/// Shuffle in place with a seeded RNG
pub fn shuffle<T>(slice: &mut [T], seed: u64) {
    slice.shuffle(&mut seeded_rng(seed));
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Sample standard deviation of a list of durations
pub fn calculate_std_dev(times: &[Duration], mean: Duration) -> Duration {
    if times.len() < 2 {
        return Duration::ZERO;
    }

    let mean_ns = mean.as_nanos() as f64;
    let variance: f64 = times
        .iter()
        .map(|t| {
            let diff = t.as_nanos() as f64 - mean_ns;
            diff * diff
        })
        .sum::<f64>()
        / (times.len() - 1) as f64;

    Duration::from_nanos(variance.sqrt() as u64)
}

/// Timing statistics over a set of samples
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub avg: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub std_dev: Duration,
}

/// Compute statistics from a list of durations. Empty input gives all zeros.
pub fn compute_stats(times: &[Duration]) -> Stats {
    let mut sorted = times.to_vec();
    sorted.sort();

    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Stats::default();
    };

    let total: Duration = sorted.iter().sum();
    let avg = total / sorted.len() as u32;

    Stats {
        avg,
        median: sorted[sorted.len() / 2],
        min,
        max,
        std_dev: calculate_std_dev(&sorted, avg),
    }
}

/// Format a duration with a unit that keeps it readable
pub fn format_duration(d: Duration) -> String {
    let ns = d.as_nanos();
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} µs", ns as f64 / 1e3)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1e6)
    } else {
        format!("{:.2} s", ns as f64 / 1e9)
    }
}
