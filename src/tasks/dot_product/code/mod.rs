//! Dot product kernels.
//!
//! [`calculate_dot_product`] is the checked entry point used by the task.
//! The unchecked kernels below are benchmarked against it.

mod original;
mod scalar_opt;

pub use original::dot_product_original;
pub use scalar_opt::dot_product_scalar_opt;

use crate::harness::{TaskError, TaskResult};
use crate::utils::VariantInfo;

/// Sum of pairwise products of two vectors.
///
/// Fails with [`TaskError::LengthMismatch`] when the lengths differ and with
/// [`TaskError::Overflow`] when the total does not fit in an `i64`.
/// Intermediate sums may leave that range, so the outcome does not depend on
/// element order. Empty vectors give 0.
///
/// # Example
/// ```
/// use seq_tasks::tasks::dot_product::calculate_dot_product;
///
/// assert_eq!(calculate_dot_product(&[5, 2], &[6, 10]), Ok(50));
/// ```
pub fn calculate_dot_product(vec_1: &[i32], vec_2: &[i32]) -> TaskResult<i64> {
    if vec_1.len() != vec_2.len() {
        return Err(TaskError::LengthMismatch {
            left: vec_1.len(),
            right: vec_2.len(),
        });
    }

    // |x * y| <= 2^62, so no slice length can overflow an i128 sum; only the
    // final total is range-checked.
    let sum: i128 = vec_1
        .iter()
        .zip(vec_2)
        .map(|(&x, &y)| i128::from(x) * i128::from(y))
        .sum();

    i64::try_from(sum).map_err(|_| TaskError::Overflow)
}

/// Type alias for dot product kernel signature
pub type DotProductFn = fn(&[i32], &[i32]) -> i64;

/// All kernel variants, reference first
pub fn available_variants() -> Vec<VariantInfo<DotProductFn>> {
    vec![
        VariantInfo {
            name: "original",
            description: "Iterator reference kernel",
            function: dot_product_original,
        },
        VariantInfo {
            name: "scalar_opt",
            description: "Scalar kernel with 4x loop unrolling",
            function: dot_product_scalar_opt,
        },
    ]
}
