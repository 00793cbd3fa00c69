//! Original (reference) kernel.

/// Dot product of two equal-length vectors, accumulated in `i64`.
///
/// Overflow of the accumulator wraps; use
/// [`calculate_dot_product`](super::calculate_dot_product) when it must be
/// reported instead.
///
/// # Example
/// ```
/// use seq_tasks::tasks::dot_product::dot_product_original;
///
/// assert_eq!(dot_product_original(&[1, 2, 3], &[4, 5, 6]), 32);
/// ```
pub fn dot_product_original(a: &[i32], b: &[i32]) -> i64 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    a.iter()
        .zip(b)
        .fold(0i64, |acc, (&x, &y)| acc.wrapping_add(i64::from(x) * i64::from(y)))
}
