//! Append-only in-memory byte regions backing the fixed and variable data.

use std::io;

use bytes::Bytes;
use qex_result::Result;

use crate::codecs::big_endian::{f32_be_arr, f64_be_arr, i32_be_arr, i64_be_arr};

/// Append-only byte stream with big-endian primitive writes.
///
/// The region never reorders or truncates, so the offset recorded for an
/// indirect cell is always `len()` at the moment of the write. Growth is
/// fallible: a refused allocation surfaces as `Error::Io` with
/// `ErrorKind::OutOfMemory`.
#[derive(Debug, Default)]
pub struct ByteRegion {
    data: Vec<u8>,
}

impl ByteRegion {
    pub fn with_capacity(capacity: usize) -> Self {
        ByteRegion {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Current byte length of the region.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn put_i32(&mut self, v: i32) -> Result<()> {
        self.put_slice(&i32_be_arr(v))
    }

    #[inline]
    pub fn put_i64(&mut self, v: i64) -> Result<()> {
        self.put_slice(&i64_be_arr(v))
    }

    #[inline]
    pub fn put_f32(&mut self, v: f32) -> Result<()> {
        self.put_slice(&f32_be_arr(v))
    }

    #[inline]
    pub fn put_f64(&mut self, v: f64) -> Result<()> {
        self.put_slice(&f64_be_arr(v))
    }

    pub fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.data
            .try_reserve(bytes.len())
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Consume the region into an immutable buffer.
    #[inline]
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_big_endian_and_appended_in_order() {
        let mut region = ByteRegion::default();
        region.put_i32(1).unwrap();
        region.put_i64(-1).unwrap();
        region.put_slice(b"ab").unwrap();
        assert_eq!(region.len(), 14);
        let frozen = region.freeze();
        assert_eq!(&frozen[0..4], &[0, 0, 0, 1]);
        assert_eq!(&frozen[4..12], &[0xFF; 8]);
        assert_eq!(&frozen[12..], b"ab");
    }
}
