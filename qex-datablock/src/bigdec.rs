//! Decimal wire encoding.
//!
//! Format (big-endian):
//!   [0..4) : scale (i32)
//!   [4..]  : unscaled value, minimal two's-complement bytes
//!
//! "Minimal" means redundant sign-extension bytes are stripped: zero encodes
//! as a single `0x00`, -1 as a single `0xFF`, 128 as `00 80`. This matches
//! the magnitude bytes produced by the surrounding system's decimal
//! serializer for every value representable in 128 bits.

use crate::codecs::big_endian::i32_be_arr;
use crate::types::BigDecimalValue;

/// Serialize a decimal into its variable-region payload.
pub fn serialize(value: &BigDecimalValue) -> Vec<u8> {
    let bytes = value.unscaled.to_be_bytes();
    let magnitude = &bytes[sign_extension_prefix_len(&bytes)..];
    let mut out = Vec::with_capacity(4 + magnitude.len());
    out.extend_from_slice(&i32_be_arr(value.scale));
    out.extend_from_slice(magnitude);
    out
}

/// Count of leading bytes that are pure sign extension: `0x00` followed by a
/// clear sign bit, or `0xFF` followed by a set sign bit. At least one byte is
/// always kept.
fn sign_extension_prefix_len(bytes: &[u8; 16]) -> usize {
    let mut start = 0;
    while start < bytes.len() - 1 {
        let next_sign_set = bytes[start + 1] & 0x80 != 0;
        match bytes[start] {
            0x00 if !next_sign_set => start += 1,
            0xFF if next_sign_set => start += 1,
            _ => break,
        }
    }
    start
}
