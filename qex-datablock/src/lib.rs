//! Self-describing binary blocks for inter-node result transport.
//!
//! A block is built in one pass from a schema plus row-major or column-major
//! cell data, and freezes into two byte regions: a fixed region of equal-width
//! cells (primitives inline, everything else as an `(offset, length)` pair)
//! and an append-only variable region holding the expansions. String data is
//! dictionary-compressed per column; the reverse dictionaries travel with the
//! block so decoders can resolve ids without a round trip.
//!
//! Modules:
//! - types:   column type enum, schema, tagged cell values.
//! - layout:  per-column widths, row strides and column offsets.
//! - region:  append-only big-endian byte buffers.
//! - dict:    per-column string interners.
//! - promote: element-wise widening of narrow array inputs.
//! - bigdec:  decimal wire encoding.
//! - builder: the cell dispatcher and the two build entry points.
//! - block:   frozen row/columnar block products.

#![forbid(unsafe_code)]

pub mod bigdec;
pub mod block;
pub mod builder;
pub mod dict;
pub mod layout;
pub mod promote;
pub mod region;
pub mod types;

mod codecs;

pub use block::{BlockType, ColumnarDataBlock, DataBlock, RowDataBlock};
pub use builder::DataBlockBuilder;
pub use dict::ReverseDictionary;
pub use qex_result::{Error, Result};
pub use types::{BigDecimalValue, ColumnDataType, DataSchema, Value};
