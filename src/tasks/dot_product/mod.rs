//! # Dot Product Task
//!
//! The dot product (scalar product) of two integer vectors:
//!
//! `dot(a, b) = Σ(a[i] * b[i])`
//!
//! [`VectorDotProduct`] wraps [`calculate_dot_product`] in the four-stage
//! task lifecycle. The kernels in [`code`] are alternative implementations
//! benchmarked against it.

pub mod bench;
pub mod code;
mod task;
#[cfg(test)]
mod test;

pub use code::*;
pub use task::VectorDotProduct;

use crate::harness::{Perf, PerfResults, TaskError, TaskResult};
use crate::registry::TaskBench;
use crate::utils::Variant;

/// Seed used by [`DotProductBench::verify`]
const VERIFY_SEED: u64 = 0x5eed;

/// Registry entry for the dot product task
pub struct DotProductBench;

impl TaskBench for DotProductBench {
    fn name(&self) -> &'static str {
        "dot_product"
    }

    fn description(&self) -> &'static str {
        "Computes the sum of products of corresponding vector elements"
    }

    fn category(&self) -> &'static str {
        "linear_algebra"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants()
            .iter()
            .map(|v| v.name)
            .chain(std::iter::once("task-pipeline"))
            .collect()
    }

    fn variant_closures<'a>(&'a self, size: usize, seed: u64) -> Vec<Variant<'a>> {
        bench::variant_closures(size, seed)
    }

    fn verify(&self) -> TaskResult<()> {
        // Not a multiple of 4, so the unrolled tail is exercised
        let (a, b) = bench::random_inputs(1023, VERIFY_SEED);
        let expected = calculate_dot_product(&a, &b)?;

        let mut results: Vec<(&'static str, i64)> = code::available_variants()
            .iter()
            .map(|v| (v.name, (v.function)(&a, &b)))
            .collect();
        results.push(("task-pipeline", bench::run_task_pipeline(&a, &b)?));

        match results.into_iter().find(|&(_, actual)| actual != expected) {
            Some((variant, actual)) => Err(TaskError::VerificationFailed {
                variant,
                expected,
                actual,
            }),
            None => Ok(()),
        }
    }

    fn perf_run(&self, size: usize, seed: u64, perf: &Perf) -> TaskResult<Vec<PerfResults>> {
        bench::perf_run(size, seed, perf)
    }
}
