//! Frozen block products.
//!
//! A block is a value-object: once assembled it is immutable and can be
//! handed to other threads. The two flavors differ only in how the fixed
//! region interleaves cells; the variable region and the reverse
//! dictionaries are identical for the same `(schema, data)`.

use bytes::Bytes;

use crate::dict::ReverseDictionary;
use crate::types::DataSchema;

/// Layout tag of a frozen block's fixed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Cells interleaved row by row; each row is `row_size_in_bytes` long.
    Row,
    /// Each column's cells concatenated back to back.
    Columnar,
}

/// Read-side view over a frozen block.
pub trait DataBlock {
    fn block_type(&self) -> BlockType;

    fn num_rows(&self) -> usize;

    fn num_columns(&self) -> usize {
        self.data_schema().len()
    }

    fn data_schema(&self) -> &DataSchema;

    /// The fixed region: `num_rows * row_size` bytes in row layout,
    /// `sum(num_rows * width(col))` bytes in columnar layout.
    fn fixed_data(&self) -> &Bytes;

    /// The variable region, referenced by `(offset, length)` cells in the
    /// fixed region.
    fn variable_data(&self) -> &Bytes;

    /// Reverse dictionaries for the string-bearing columns that were
    /// written: column name to the id-indexed vector of strings.
    fn reverse_dictionary(&self) -> &ReverseDictionary;
}

macro_rules! data_block_impl {
    ($name:ident, $block_type:expr) => {
        impl $name {
            pub(crate) fn new(
                num_rows: usize,
                data_schema: DataSchema,
                reverse_dictionary: ReverseDictionary,
                fixed_data: Bytes,
                variable_data: Bytes,
            ) -> Self {
                $name {
                    num_rows,
                    data_schema,
                    reverse_dictionary,
                    fixed_data,
                    variable_data,
                }
            }
        }

        impl DataBlock for $name {
            fn block_type(&self) -> BlockType {
                $block_type
            }

            fn num_rows(&self) -> usize {
                self.num_rows
            }

            fn data_schema(&self) -> &DataSchema {
                &self.data_schema
            }

            fn fixed_data(&self) -> &Bytes {
                &self.fixed_data
            }

            fn variable_data(&self) -> &Bytes {
                &self.variable_data
            }

            fn reverse_dictionary(&self) -> &ReverseDictionary {
                &self.reverse_dictionary
            }
        }
    };
}

/// Block whose fixed region interleaves cells row by row.
#[derive(Debug, Clone)]
pub struct RowDataBlock {
    num_rows: usize,
    data_schema: DataSchema,
    reverse_dictionary: ReverseDictionary,
    fixed_data: Bytes,
    variable_data: Bytes,
}

data_block_impl!(RowDataBlock, BlockType::Row);

/// Block whose fixed region concatenates each column's cells.
#[derive(Debug, Clone)]
pub struct ColumnarDataBlock {
    num_rows: usize,
    data_schema: DataSchema,
    reverse_dictionary: ReverseDictionary,
    fixed_data: Bytes,
    variable_data: Bytes,
}

data_block_impl!(ColumnarDataBlock, BlockType::Columnar);
