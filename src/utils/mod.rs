//! Utility modules for benchmarking and reporting.

pub mod bench;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

pub use bench::{calculate_std_dev, compute_stats, random_vector, seeded_rng, shuffle, time_seed, Stats};
pub use cpu_affinity::CpuPinGuard;
pub use timer::{measure_variants, PinStrategy, TimingConfig, Variant, VariantResult};

/// Information about a kernel implementation variant.
/// Generic over F which is the function signature.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "original", "scalar_opt")
    pub name: &'static str,
    pub description: &'static str,
    pub function: F,
}
