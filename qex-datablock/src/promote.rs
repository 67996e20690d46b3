//! Element-wise widening of narrow array inputs to wider declared types.
//!
//! Widening never narrows: each function allocates the target-width vector
//! and converts element by element. The builder picks the function from the
//! `(declared, observed)` pair; anything not covered here is a type mismatch.

/// Widen `i32` elements to `i64`.
#[inline]
pub fn longs_from_ints(values: &[i32]) -> Vec<i64> {
    values.iter().map(|&v| v as i64).collect()
}

/// Widen `i32` elements to `f64`.
#[inline]
pub fn doubles_from_ints(values: &[i32]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

/// Widen `i64` elements to `f64` (IEEE nearest for magnitudes beyond 2^53).
#[inline]
pub fn doubles_from_longs(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

/// Widen `f32` elements to `f64`.
#[inline]
pub fn doubles_from_floats(values: &[f32]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}
