//! Registry of benchmarkable tasks.
//!
//! The CLI discovers tasks through this registry instead of needing a
//! separate binary per task.

use crate::harness::{Perf, PerfResults, TaskResult};
use crate::utils::timer::{measure_variants, TimingConfig, Variant, VariantResult};
use crate::utils::time_seed;

/// A task whose kernel variants can be verified and benchmarked
pub trait TaskBench: Send + Sync {
    /// Name of the task (e.g., "dot_product")
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Category (e.g., "linear_algebra")
    fn category(&self) -> &'static str;

    fn available_variants(&self) -> Vec<&'static str>;

    /// One closure per variant over inputs of `size` elements generated from
    /// `seed`. Each call performs and times a single execution.
    fn variant_closures<'a>(&'a self, size: usize, seed: u64) -> Vec<Variant<'a>>;

    /// Check every variant against the reference implementation.
    fn verify(&self) -> TaskResult<()>;

    /// Perf runs of the whole task over inputs of `size` elements
    fn perf_run(&self, size: usize, seed: u64, perf: &Perf) -> TaskResult<Vec<PerfResults>>;

    /// Measure all variants at `size`
    fn run_benchmarks(&self, size: usize, config: &TimingConfig) -> Vec<VariantResult> {
        let seed = config.seed.unwrap_or_else(time_seed);
        measure_variants(self.variant_closures(size, seed), config)
    }
}

/// All known tasks, in registration order
pub struct TaskRegistry {
    tasks: Vec<Box<dyn TaskBench>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn register<B: TaskBench + 'static>(&mut self, bench: B) {
        self.tasks.push(Box::new(bench));
    }

    pub fn all(&self) -> &[Box<dyn TaskBench>] {
        &self.tasks
    }

    pub fn find(&self, name: &str) -> Option<&dyn TaskBench> {
        self.tasks
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn TaskBench> {
        self.tasks
            .iter()
            .filter(|t| t.category() == category)
            .map(|t| t.as_ref())
            .collect()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all tasks
pub fn build_registry() -> TaskRegistry {
    let mut registry = TaskRegistry::new();
    registry.register(crate::tasks::dot_product::DotProductBench);
    registry
}
