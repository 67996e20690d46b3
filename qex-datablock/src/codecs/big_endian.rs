//! Big-endian encoding helpers for the wire's primitive widths.
//!
//! Naming rules:
//! - `*_be_arr` returns a fixed `[u8; N]` (no allocation).

/// Encode `i32` as big-endian fixed array (no allocation).
#[inline]
pub fn i32_be_arr(v: i32) -> [u8; 4] {
    v.to_be_bytes()
}

/// Encode `i64` as big-endian fixed array (no allocation).
#[inline]
pub fn i64_be_arr(v: i64) -> [u8; 8] {
    v.to_be_bytes()
}

/// Encode IEEE-754 binary32 as big-endian fixed array (no allocation).
#[inline]
pub fn f32_be_arr(v: f32) -> [u8; 4] {
    v.to_be_bytes()
}

/// Encode IEEE-754 binary64 as big-endian fixed array (no allocation).
#[inline]
pub fn f64_be_arr(v: f64) -> [u8; 8] {
    v.to_be_bytes()
}
