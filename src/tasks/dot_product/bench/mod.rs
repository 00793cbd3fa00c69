//! Benchmark closures for the dot product task.

use std::sync::Arc;
use std::time::Instant;

use super::code::available_variants;
use super::task::VectorDotProduct;
use crate::harness::{Perf, PerfResults, TaskData, TaskResult, TaskRunner};
use crate::measure;
use crate::utils::{random_vector, seeded_rng, Variant};

/// Range benchmark inputs are drawn from
const INPUT_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

/// Two random vectors of `size` elements
pub fn random_inputs(size: usize, seed: u64) -> (Vec<i32>, Vec<i32>) {
    let mut rng = seeded_rng(seed);
    let a = random_vector(&mut rng, size, INPUT_RANGE);
    let b = random_vector(&mut rng, size, INPUT_RANGE);
    (a, b)
}

/// Build and drive one task over `a` and `b`, returning the output slot.
pub fn run_task_pipeline(a: &[i32], b: &[i32]) -> TaskResult<i64> {
    let mut out = [0i64];
    let data = TaskData::new()
        .with_input(a)
        .with_input(b)
        .with_output(&mut out[..]);
    TaskRunner::new(VectorDotProduct::new(data)).run_pipeline()?;
    Ok(out[0])
}

/// One closure per kernel variant plus one timing the full task pipeline
pub fn variant_closures(size: usize, seed: u64) -> Vec<Variant<'static>> {
    let (a, b) = random_inputs(size, seed);
    let a = Arc::new(a);
    let b = Arc::new(b);

    let mut variants: Vec<Variant<'static>> = available_variants()
        .into_iter()
        .map(|v| {
            let a = Arc::clone(&a);
            let b = Arc::clone(&b);
            let func = v.function;

            Variant {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let (elapsed, value) = measure!(func(&a, &b));
                    (elapsed, Some(value))
                }),
            }
        })
        .collect();

    variants.push(Variant {
        name: "task-pipeline",
        description: "VectorDotProduct through all four stages",
        run: Box::new(move || {
            let start = Instant::now();
            let value = run_task_pipeline(&a, &b);
            let elapsed = start.elapsed();
            if let Err(e) = &value {
                tracing::warn!(error = %e, "task pipeline failed during benchmark");
            }
            (elapsed, value.ok())
        }),
    });

    variants
}

/// Pipeline and run-stage perf results over random inputs of `size`
pub fn perf_run(size: usize, seed: u64, perf: &Perf) -> TaskResult<Vec<PerfResults>> {
    let (a, b) = random_inputs(size, seed);
    let mut out = [0i64];

    let mut pipeline = || {
        let data = TaskData::new()
            .with_input(&a[..])
            .with_input(&b[..])
            .with_output(&mut out[..]);
        TaskRunner::new(VectorDotProduct::new(data)).run_pipeline()
    };

    let results = vec![perf.pipeline_run(&mut pipeline)?, perf.task_run(&mut pipeline)?];
    for r in &results {
        perf.check_perf_results(r)?;
    }
    Ok(results)
}
