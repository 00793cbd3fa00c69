//! Variant timing with randomized execution order.
//!
//! Every variant is warmed up, then samples of all variants are taken in a
//! shuffled order so that no variant systematically runs on a warmer cache.

use std::hint::black_box;
use std::time::Duration;

use super::bench::{compute_stats, shuffle, time_seed};
use super::cpu_affinity::CpuPinGuard;

/// Time an expression, returning `(elapsed, value)`.
#[macro_export]
macro_rules! measure {
    ($e:expr) => {{
        let start = ::std::time::Instant::now();
        let value = ::std::hint::black_box($e);
        (start.elapsed(), value)
    }};
}

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements
    Global,
    /// Pin and unpin around every sample
    #[default]
    PerExecution,
    Disabled,
}

/// Configuration for variant measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup iterations before measurement (default: 10)
    pub warmup_iterations: usize,
    pub pin_strategy: PinStrategy,
    /// Seed for the sample schedule; time-based when `None`
    pub seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// One execution, timed inside the closure. Returns the elapsed time and
    /// the computed value, if the variant produces one.
    pub run: Box<dyn FnMut() -> (Duration, Option<i64>) + 'a>,
}

/// Result from measuring a single variant
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    pub avg_time: Duration,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of samples taken
    pub runs: usize,
    /// Value returned by the last sample
    pub result_sample: Option<i64>,
    /// Every sample, in execution order, for CSV export
    pub samples: Vec<Duration>,
}

/// Measure variants in a shuffled order and summarize each one.
pub fn measure_variants(mut variants: Vec<Variant<'_>>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant.max(1);

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    // (variant_idx, sample_idx)
    let mut schedule: Vec<(usize, usize)> = (0..variants.len())
        .flat_map(|v| (0..samples).map(move |s| (v, s)))
        .collect();
    shuffle(&mut schedule, config.seed.unwrap_or_else(time_seed));

    let mut measurements: Vec<Vec<Duration>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<i64>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for (variant_idx, _) in schedule {
        let variant = &mut variants[variant_idx];
        let _pin = (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed, result) = (variant.run)();

        measurements[variant_idx].push(elapsed);
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .zip(measurements)
        .zip(result_samples)
        .map(|((variant, times), result_sample)| {
            let stats = compute_stats(&times);
            tracing::debug!(variant = variant.name, avg = ?stats.avg, "variant measured");
            VariantResult {
                name: variant.name.to_string(),
                description: variant.description.to_string(),
                avg_time: stats.avg,
                median_time: stats.median,
                min_time: stats.min,
                max_time: stats.max,
                std_dev: stats.std_dev,
                runs: times.len(),
                result_sample,
                samples: times,
            }
        })
        .collect()
}
