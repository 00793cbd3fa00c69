//! Scalar kernel with 4x loop unrolling.
//!
//! Four independent accumulators break the dependency chain on a single sum,
//! letting the CPU overlap the multiply-adds.

/// Dot product processing 4 elements per iteration.
///
/// Only the common prefix is used if the lengths differ.
pub fn dot_product_scalar_opt(a: &[i32], b: &[i32]) -> i64 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let chunks_a = a.chunks_exact(4);
    let chunks_b = b.chunks_exact(4);
    let (tail_a, tail_b) = (chunks_a.remainder(), chunks_b.remainder());

    let mul = |x: i32, y: i32| i64::from(x) * i64::from(y);
    let (mut sum0, mut sum1, mut sum2, mut sum3) = (0i64, 0i64, 0i64, 0i64);

    for (ca, cb) in chunks_a.zip(chunks_b) {
        sum0 = sum0.wrapping_add(mul(ca[0], cb[0]));
        sum1 = sum1.wrapping_add(mul(ca[1], cb[1]));
        sum2 = sum2.wrapping_add(mul(ca[2], cb[2]));
        sum3 = sum3.wrapping_add(mul(ca[3], cb[3]));
    }

    for (&x, &y) in tail_a.iter().zip(tail_b) {
        sum0 = sum0.wrapping_add(mul(x, y));
    }

    sum0.wrapping_add(sum1).wrapping_add(sum2.wrapping_add(sum3))
}
