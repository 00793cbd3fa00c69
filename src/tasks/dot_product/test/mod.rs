//! Functional tests for the dot product task.

use rand::Rng;

use super::bench::{perf_run, random_inputs, run_task_pipeline};
use super::*;
use crate::harness::{PerfAttr, PerfMode, Stage, Task, TaskData, TaskRunner};
use crate::utils::{random_vector, seeded_rng};

/// Drive the full pipeline over `a` and `b`, returning output[0]
fn run_task(a: &[i32], b: &[i32]) -> i64 {
    let mut out = vec![0i64; 1];
    let data = TaskData::new()
        .with_input(a)
        .with_input(b)
        .with_output(&mut out[..]);

    let mut runner = TaskRunner::new(VectorDotProduct::new(data));
    runner.validation().expect("task data should be valid");
    runner.pre_processing().unwrap();
    runner.run().unwrap();
    runner.post_processing().unwrap();
    assert_eq!(runner.stage(), Stage::PostProcessed);

    out[0]
}

fn validates(data: TaskData<'_, i32, i64>) -> bool {
    VectorDotProduct::new(data).validation()
}

#[test]
fn test_empty_vectors() {
    assert_eq!(calculate_dot_product(&[], &[]), Ok(0));
}

#[test]
fn test_task_size_20() {
    let mut rng = seeded_rng(20);
    let a = random_vector(&mut rng, 20, 0..=99);
    let b = random_vector(&mut rng, 20, 0..=99);

    assert_eq!(run_task(&a, &b), calculate_dot_product(&a, &b).unwrap());
}

#[test]
fn test_task_size_300() {
    let mut rng = seeded_rng(300);
    let a = random_vector(&mut rng, 300, 0..=99);
    let b = random_vector(&mut rng, 300, 0..=99);

    assert_eq!(run_task(&a, &b), calculate_dot_product(&a, &b).unwrap());
}

#[test]
fn test_task_known_binary() {
    assert_eq!(run_task(&[5, 2], &[6, 10]), 50);
}

#[test]
fn test_task_empty_vectors() {
    assert_eq!(run_task(&[], &[]), 0);
}

#[test]
fn test_calculate_binary() {
    assert_eq!(calculate_dot_product(&[5, 2], &[7, 3]), Ok(41));
}

#[test]
fn test_calculate_ternary() {
    assert_eq!(calculate_dot_product(&[5, 2, 10], &[7, 3, 1]), Ok(51));
}

#[test]
fn test_calculate_negative() {
    assert_eq!(calculate_dot_product(&[-1, -8], &[-5, 7]), Ok(-51));
}

#[test]
fn test_calculate_random_size() {
    let mut rng = rand::rng();
    let size = rng.random_range(1..=100);
    let a = random_vector(&mut rng, size, -10..=10);
    let b = random_vector(&mut rng, size, -10..=10);

    let mut expected: i64 = 0;
    for i in 0..size {
        expected += i64::from(a[i] * b[i]);
    }

    assert_eq!(calculate_dot_product(&a, &b), Ok(expected));
    assert_eq!(run_task(&a, &b), expected);
}

#[test]
fn test_calculate_length_mismatch() {
    assert_eq!(
        calculate_dot_product(&[1, 2, 3], &[1, 2]),
        Err(TaskError::LengthMismatch { left: 3, right: 2 })
    );
}

#[test]
fn test_calculate_overflow() {
    let a = [i32::MIN; 3];
    assert_eq!(calculate_dot_product(&a, &a), Err(TaskError::Overflow));
}

#[test]
fn test_calculate_overflow_ignores_element_order() {
    // First two products push the running sum past i64::MAX, the third
    // brings the total back in range.
    let a = [i32::MIN, i32::MIN, i32::MIN];
    let b = [i32::MIN, i32::MIN, i32::MAX];
    let expected = 4_611_686_020_574_871_552i64;

    assert_eq!(calculate_dot_product(&a, &b), Ok(expected));

    let a_reordered = [i32::MIN, i32::MIN, i32::MIN];
    let b_reordered = [i32::MIN, i32::MAX, i32::MIN];
    assert_eq!(calculate_dot_product(&a_reordered, &b_reordered), Ok(expected));

    assert_eq!(run_task(&a, &b), expected);
}

#[test]
fn test_calculate_extremes_fit() {
    // (-2^31)^2 = 2^62
    assert_eq!(
        calculate_dot_product(&[i32::MIN], &[i32::MIN]),
        Ok(1i64 << 62)
    );
}

#[test]
fn test_validation_rejects_unequal_inputs() {
    let (a, b) = ([1, 2, 3], [1, 2]);
    let mut out = [0i64];
    let data = TaskData::new().with_input(&a[..]).with_input(&b[..]).with_output(&mut out[..]);
    assert!(!validates(data));
}

#[test]
fn test_validation_rejects_output_length() {
    let (a, b) = ([1, 2], [3, 4]);

    let mut wide = [0i64; 2];
    let data = TaskData::new().with_input(&a[..]).with_input(&b[..]).with_output(&mut wide[..]);
    assert!(!validates(data));

    let mut none: [i64; 0] = [];
    let data = TaskData::new().with_input(&a[..]).with_input(&b[..]).with_output(&mut none[..]);
    assert!(!validates(data));
}

#[test]
fn test_validation_rejects_buffer_arity() {
    let (a, b) = ([1, 2], [3, 4]);
    let mut out = [0i64];
    let mut extra = [0i64];

    let data = TaskData::new().with_input(&a[..]).with_output(&mut out[..]);
    assert!(!validates(data));

    let data = TaskData::new()
        .with_input(&a[..])
        .with_input(&b[..])
        .with_input(&b[..])
        .with_output(&mut out[..]);
    assert!(!validates(data));

    let data: TaskData<'_, i32, i64> = TaskData::new().with_input(&a[..]).with_input(&b[..]);
    assert!(!validates(data));

    let data = TaskData::new()
        .with_input(&a[..])
        .with_input(&b[..])
        .with_output(&mut out[..])
        .with_output(&mut extra[..]);
    assert!(!validates(data));
}

#[test]
fn test_invalid_task_never_writes_output() {
    let (a, b) = ([1, 2, 3], [4, 5]);
    let mut out = [-7i64];
    {
        let data = TaskData::new().with_input(&a[..]).with_input(&b[..]).with_output(&mut out[..]);
        let mut runner = TaskRunner::new(VectorDotProduct::new(data));
        assert_eq!(
            runner.run_pipeline(),
            Err(TaskError::ValidationFailed { task: "dot_product" })
        );
        assert!(runner.post_processing().is_err());
    }
    assert_eq!(out[0], -7);
}

#[test]
fn test_run_without_pre_processing_is_rejected() {
    let (a, b) = ([1, 2], [3, 4]);
    let mut out = [0i64];
    let data = TaskData::new().with_input(&a[..]).with_input(&b[..]).with_output(&mut out[..]);
    let mut runner = TaskRunner::new(VectorDotProduct::new(data));

    runner.validation().unwrap();
    assert_eq!(
        runner.run(),
        Err(TaskError::OutOfOrder {
            current: Stage::Validated,
            attempted: Stage::Ran,
        })
    );
    assert_eq!(runner.task().result(), 0);
}

#[test]
fn test_result_available_after_run() {
    let (a, b) = ([5, 2, 10], [7, 3, 1]);
    let mut out = [0i64];
    let data = TaskData::new().with_input(&a[..]).with_input(&b[..]).with_output(&mut out[..]);
    let mut runner = TaskRunner::new(VectorDotProduct::new(data));

    runner.validation().unwrap();
    runner.pre_processing().unwrap();
    runner.run().unwrap();
    assert_eq!(runner.task().result(), 51);
}

#[test]
fn test_variants_match_reference() {
    for size in [0, 1, 3, 4, 5, 64, 1023] {
        let (a, b) = random_inputs(size, size as u64);
        let expected = calculate_dot_product(&a, &b).unwrap();

        for variant in available_variants() {
            assert_eq!(
                (variant.function)(&a, &b),
                expected,
                "variant {} at size {}",
                variant.name,
                size
            );
        }
        assert_eq!(run_task_pipeline(&a, &b), Ok(expected));
    }
}

#[test]
fn test_verify() {
    assert!(DotProductBench.verify().is_ok());
}

#[test]
fn test_variant_closures_report_same_result() {
    let bench = DotProductBench;
    let mut variants = bench.variant_closures(100, 9);
    let names: Vec<_> = variants.iter().map(|v| v.name).collect();
    assert_eq!(names, bench.available_variants());

    let results: Vec<Option<i64>> = variants.iter_mut().map(|v| (v.run)().1).collect();
    assert!(results[0].is_some());
    assert!(results.iter().all(|r| *r == results[0]));
}

#[test]
fn test_perf_pipeline_and_task_run() {
    let perf = Perf::new(PerfAttr {
        num_running: 3,
        pin_to_core: false,
        ..Default::default()
    });

    let results = perf_run(1000, 11, &perf).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].mode, PerfMode::Pipeline);
    assert_eq!(results[1].mode, PerfMode::TaskRun);
    assert!(results.iter().all(|r| r.num_running == 3));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_matches_naive_sum(
            pairs in prop::collection::vec((-1000i32..1000, -1000i32..1000), 0..200)
        ) {
            let (a, b): (Vec<i32>, Vec<i32>) = pairs.into_iter().unzip();
            let naive: i64 = (0..a.len()).map(|i| i64::from(a[i]) * i64::from(b[i])).sum();

            prop_assert_eq!(calculate_dot_product(&a, &b), Ok(naive));
            prop_assert_eq!(run_task(&a, &b), naive);
        }

        #[test]
        fn test_commutative(
            pairs in prop::collection::vec((any::<i16>(), any::<i16>()), 0..100)
        ) {
            let (a, b): (Vec<i32>, Vec<i32>) =
                pairs.into_iter().map(|(x, y)| (i32::from(x), i32::from(y))).unzip();

            prop_assert_eq!(calculate_dot_product(&a, &b), calculate_dot_product(&b, &a));
        }

        #[test]
        fn test_unrolled_matches_original(
            pairs in prop::collection::vec((any::<i32>(), any::<i32>()), 0..64)
        ) {
            let (a, b): (Vec<i32>, Vec<i32>) = pairs.into_iter().unzip();

            prop_assert_eq!(dot_product_scalar_opt(&a, &b), dot_product_original(&a, &b));
        }
    }
}
