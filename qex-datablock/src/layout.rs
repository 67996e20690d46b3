//! Schema analysis: byte widths, row strides and column offsets.
//!
//! Layouts are computed once per builder and are byte-exact for its whole
//! life. There is no padding and no alignment: the row stride is exactly the
//! sum of the stored cell widths.

use qex_result::{Error, Result};

use crate::types::DataSchema;

/// Fixed-region geometry for a row-interleaved block.
#[derive(Debug, Clone)]
pub struct RowLayout {
    column_offsets: Vec<usize>,
    row_size_in_bytes: usize,
}

impl RowLayout {
    /// Compute per-column byte offsets within one row and the row stride.
    ///
    /// Fails with `UnsupportedType` if any column's type has no stored width.
    pub fn new(schema: &DataSchema) -> Result<Self> {
        let mut column_offsets = Vec::with_capacity(schema.len());
        let mut offset = 0usize;
        for col in 0..schema.len() {
            column_offsets.push(offset);
            offset += cell_size(schema, col)?;
        }
        Ok(RowLayout {
            column_offsets,
            row_size_in_bytes: offset,
        })
    }

    /// Byte offset of column `col` within a row.
    #[inline]
    pub fn column_offset(&self, col: usize) -> usize {
        self.column_offsets[col]
    }

    /// Byte length of one encoded row.
    #[inline]
    pub fn row_size_in_bytes(&self) -> usize {
        self.row_size_in_bytes
    }
}

/// Fixed-region geometry for a column-concatenated block.
///
/// Cumulative offsets depend on the row count, which is only known once the
/// first column arrives; callers construct this after fixing `num_rows` and
/// before writing the first cell.
#[derive(Debug, Clone)]
pub struct ColumnarLayout {
    column_sizes: Vec<usize>,
    cumulative_offsets: Vec<usize>,
    fixed_size_in_bytes: usize,
}

impl ColumnarLayout {
    /// Compute per-column cell sizes and cumulative byte offsets of each
    /// column region for a block of `num_rows` rows.
    pub fn new(schema: &DataSchema, num_rows: usize) -> Result<Self> {
        let mut column_sizes = Vec::with_capacity(schema.len());
        let mut cumulative_offsets = Vec::with_capacity(schema.len());
        let mut cumulative = 0usize;
        for col in 0..schema.len() {
            let size = cell_size(schema, col)?;
            column_sizes.push(size);
            cumulative_offsets.push(cumulative);
            cumulative += size * num_rows;
        }
        Ok(ColumnarLayout {
            column_sizes,
            cumulative_offsets,
            fixed_size_in_bytes: cumulative,
        })
    }

    /// Byte length of one cell of column `col`.
    #[inline]
    pub fn column_size_in_bytes(&self, col: usize) -> usize {
        self.column_sizes[col]
    }

    /// Byte offset of column `col`'s region within the fixed region.
    #[inline]
    pub fn cumulative_offset(&self, col: usize) -> usize {
        self.cumulative_offsets[col]
    }

    /// Total byte length of the fixed region.
    #[inline]
    pub fn fixed_size_in_bytes(&self) -> usize {
        self.fixed_size_in_bytes
    }
}

fn cell_size(schema: &DataSchema, col: usize) -> Result<usize> {
    let dtype = schema.column_data_type(col);
    dtype
        .to_stored()
        .fixed_size_in_bytes()
        .ok_or_else(|| Error::unsupported_type(schema.column_name(col), dtype.name()))
}
