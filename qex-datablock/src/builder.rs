//! Block construction: schema-driven dispatch of cells into the fixed and
//! variable regions.
//!
//! A builder lives for exactly one block. The two entry points own it from
//! creation to freeze, so no writes can happen after assembly and no handle
//! to a frozen builder can escape. Cells are dispatched strictly in input
//! order; the variable region is append-only, which makes the offset stored
//! in an indirect cell always equal to the region's size at the moment of
//! the write.

use qex_result::{Error, Result};
use tracing::debug;

use crate::bigdec;
use crate::block::{ColumnarDataBlock, RowDataBlock};
use crate::dict::DictionarySet;
use crate::layout::{ColumnarLayout, RowLayout};
use crate::promote;
use crate::region::ByteRegion;
use crate::types::{ColumnDataType, DataSchema, Value};

/// Single-use builder producing one frozen block.
pub struct DataBlockBuilder<'a> {
    schema: &'a DataSchema,
    stored_types: Vec<ColumnDataType>,
    fixed: ByteRegion,
    variable: ByteRegion,
    dictionaries: DictionarySet,
    num_rows: usize,
}

impl<'a> DataBlockBuilder<'a> {
    /// Encode row-major data into a row-layout block.
    ///
    /// Every row must have exactly one value per schema column.
    pub fn build_from_rows(schema: &DataSchema, rows: &[Vec<Value>]) -> Result<RowDataBlock> {
        let layout = RowLayout::new(schema)?;
        let num_rows = rows.len();
        let mut builder = DataBlockBuilder::new(schema, num_rows, num_rows * layout.row_size_in_bytes());
        for row in rows {
            if row.len() != schema.len() {
                return Err(Error::InvalidArgumentError(format!(
                    "row has {} values, schema has {} columns",
                    row.len(),
                    schema.len()
                )));
            }
            for (col, value) in row.iter().enumerate() {
                builder.write_cell(col, value)?;
            }
        }
        debug_assert_eq!(builder.fixed.len(), num_rows * layout.row_size_in_bytes());

        let (num_rows, schema, reverse, fixed, variable) = builder.finish();
        debug!(
            num_rows,
            fixed_bytes = fixed.len(),
            variable_bytes = variable.len(),
            "built row data block"
        );
        Ok(RowDataBlock::new(num_rows, schema, reverse, fixed, variable))
    }

    /// Encode column-major data into a columnar-layout block.
    ///
    /// One value vector per schema column, all of equal length. The row count
    /// is taken from the first column before any cell is written, so the
    /// cumulative column offsets are meaningful for the whole build.
    pub fn build_from_columns(
        schema: &DataSchema,
        columns: &[Vec<Value>],
    ) -> Result<ColumnarDataBlock> {
        if columns.len() != schema.len() {
            return Err(Error::InvalidArgumentError(format!(
                "{} columns supplied, schema has {}",
                columns.len(),
                schema.len()
            )));
        }
        let num_rows = columns.first().map_or(0, Vec::len);
        for (col, column) in columns.iter().enumerate() {
            if column.len() != num_rows {
                return Err(Error::InvalidArgumentError(format!(
                    "column {} has {} values, expected {}",
                    schema.column_name(col),
                    column.len(),
                    num_rows
                )));
            }
        }

        let layout = ColumnarLayout::new(schema, num_rows)?;
        let mut builder = DataBlockBuilder::new(schema, num_rows, layout.fixed_size_in_bytes());
        for (col, column) in columns.iter().enumerate() {
            debug_assert_eq!(builder.fixed.len(), layout.cumulative_offset(col));
            for value in column {
                builder.write_cell(col, value)?;
            }
        }
        debug_assert_eq!(builder.fixed.len(), layout.fixed_size_in_bytes());

        let (num_rows, schema, reverse, fixed, variable) = builder.finish();
        debug!(
            num_rows,
            fixed_bytes = fixed.len(),
            variable_bytes = variable.len(),
            "built columnar data block"
        );
        Ok(ColumnarDataBlock::new(
            num_rows, schema, reverse, fixed, variable,
        ))
    }

    fn new(schema: &'a DataSchema, num_rows: usize, fixed_capacity: usize) -> Self {
        DataBlockBuilder {
            schema,
            stored_types: schema.stored_column_data_types(),
            fixed: ByteRegion::with_capacity(fixed_capacity),
            variable: ByteRegion::default(),
            dictionaries: DictionarySet::new(schema.len()),
            num_rows,
        }
    }

    /// Route one cell to its type-specific encoder.
    fn write_cell(&mut self, col: usize, value: &Value) -> Result<()> {
        let stored = self.stored_types[col];
        match stored {
            ColumnDataType::Int => {
                let v = self.numeric_i32(col, value)?;
                self.fixed.put_i32(v)
            }
            ColumnDataType::Long => {
                let v = self.numeric_i64(col, value)?;
                self.fixed.put_i64(v)
            }
            ColumnDataType::Float => {
                let v = self.numeric_f32(col, value)?;
                self.fixed.put_f32(v)
            }
            ColumnDataType::Double => {
                let v = self.numeric_f64(col, value)?;
                self.fixed.put_f64(v)
            }
            ColumnDataType::BigDecimal => self.write_big_decimal(col, value),
            ColumnDataType::String => self.write_string(col, value),
            ColumnDataType::Bytes => self.write_bytes(col, value),
            ColumnDataType::Object => self.write_object(col, value),
            ColumnDataType::BooleanArray | ColumnDataType::IntArray => {
                self.write_int_array(col, value)
            }
            ColumnDataType::TimestampArray | ColumnDataType::LongArray => {
                self.write_long_array(col, value)
            }
            ColumnDataType::FloatArray => self.write_float_array(col, value),
            ColumnDataType::DoubleArray => self.write_double_array(col, value),
            ColumnDataType::StringArray | ColumnDataType::BytesArray => {
                self.write_string_array(col, value)
            }
            other => Err(Error::unsupported_type(
                self.schema.column_name(col),
                other.name(),
            )),
        }
    }

    fn write_big_decimal(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::BigDecimal(v) = value else {
            return Err(self.mismatch(col, value));
        };
        let bytes = bigdec::serialize(v);
        self.put_indirect_header(bytes.len())?;
        self.variable.put_slice(&bytes)
    }

    fn write_string(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::String(s) = value else {
            return Err(self.mismatch(col, value));
        };
        let id = self.dictionaries.column(col).id_of(s);
        self.fixed.put_i32(id as i32)
    }

    fn write_bytes(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::Bytes(bytes) = value else {
            return Err(self.mismatch(col, value));
        };
        self.put_indirect_header(bytes.len())?;
        self.variable.put_slice(bytes)
    }

    /// The stored length covers the payload only; the 4-byte type tag is an
    /// additional prefix in the variable region that decoders consume before
    /// reading `length` bytes.
    fn write_object(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::Object { type_tag, payload } = value else {
            return Err(self.mismatch(col, value));
        };
        self.put_indirect_header(payload.len())?;
        self.variable.put_i32(*type_tag)?;
        self.variable.put_slice(payload)
    }

    fn write_int_array(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::IntArray(values) = value else {
            return Err(self.mismatch(col, value));
        };
        self.put_int_elements(values)
    }

    fn write_long_array(&mut self, col: usize, value: &Value) -> Result<()> {
        match value {
            Value::IntArray(ints) => self.put_long_elements(&promote::longs_from_ints(ints)),
            Value::LongArray(longs) => self.put_long_elements(longs),
            _ => Err(self.mismatch(col, value)),
        }
    }

    fn write_float_array(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::FloatArray(values) = value else {
            return Err(self.mismatch(col, value));
        };
        self.put_float_elements(values)
    }

    fn write_double_array(&mut self, col: usize, value: &Value) -> Result<()> {
        match value {
            Value::IntArray(ints) => self.put_double_elements(&promote::doubles_from_ints(ints)),
            Value::LongArray(longs) => self.put_double_elements(&promote::doubles_from_longs(longs)),
            Value::FloatArray(floats) => {
                self.put_double_elements(&promote::doubles_from_floats(floats))
            }
            Value::DoubleArray(doubles) => self.put_double_elements(doubles),
            _ => Err(self.mismatch(col, value)),
        }
    }

    fn write_string_array(&mut self, col: usize, value: &Value) -> Result<()> {
        let Value::StringArray(values) = value else {
            return Err(self.mismatch(col, value));
        };
        self.put_indirect_header(4 + 4 * values.len())?;
        self.variable.put_i32(values.len() as i32)?;
        let dictionary = self.dictionaries.column(col);
        for element in values {
            let id = dictionary.id_of(element);
            self.variable.put_i32(id as i32)?;
        }
        Ok(())
    }

    fn put_int_elements(&mut self, values: &[i32]) -> Result<()> {
        self.put_indirect_header(4 + 4 * values.len())?;
        self.variable.put_i32(values.len() as i32)?;
        for &v in values {
            self.variable.put_i32(v)?;
        }
        Ok(())
    }

    fn put_long_elements(&mut self, values: &[i64]) -> Result<()> {
        self.put_indirect_header(4 + 8 * values.len())?;
        self.variable.put_i32(values.len() as i32)?;
        for &v in values {
            self.variable.put_i64(v)?;
        }
        Ok(())
    }

    fn put_float_elements(&mut self, values: &[f32]) -> Result<()> {
        self.put_indirect_header(4 + 4 * values.len())?;
        self.variable.put_i32(values.len() as i32)?;
        for &v in values {
            self.variable.put_f32(v)?;
        }
        Ok(())
    }

    fn put_double_elements(&mut self, values: &[f64]) -> Result<()> {
        self.put_indirect_header(4 + 8 * values.len())?;
        self.variable.put_i32(values.len() as i32)?;
        for &v in values {
            self.variable.put_f64(v)?;
        }
        Ok(())
    }

    /// Write the `(offset, length)` pair of an indirect cell into the fixed
    /// region. `offset` is the variable region's size right now, i.e. before
    /// the cell's payload is appended.
    fn put_indirect_header(&mut self, payload_len: usize) -> Result<()> {
        let offset = i32::try_from(self.variable.len())
            .map_err(|_| Error::Internal("variable region exceeds i32 range".to_string()))?;
        let length = i32::try_from(payload_len)
            .map_err(|_| Error::Internal("variable value exceeds i32 range".to_string()))?;
        self.fixed.put_i32(offset)?;
        self.fixed.put_i32(length)
    }

    fn numeric_i32(&self, col: usize, value: &Value) -> Result<i32> {
        value.as_i32().ok_or_else(|| self.mismatch(col, value))
    }

    fn numeric_i64(&self, col: usize, value: &Value) -> Result<i64> {
        value.as_i64().ok_or_else(|| self.mismatch(col, value))
    }

    fn numeric_f32(&self, col: usize, value: &Value) -> Result<f32> {
        value.as_f32().ok_or_else(|| self.mismatch(col, value))
    }

    fn numeric_f64(&self, col: usize, value: &Value) -> Result<f64> {
        value.as_f64().ok_or_else(|| self.mismatch(col, value))
    }

    fn mismatch(&self, col: usize, value: &Value) -> Error {
        Error::type_mismatch(
            self.schema.column_name(col),
            self.schema.column_data_type(col).name(),
            value.kind(),
        )
    }

    /// Freeze: consume the builder into the block's parts.
    fn finish(
        self,
    ) -> (
        usize,
        DataSchema,
        crate::dict::ReverseDictionary,
        bytes::Bytes,
        bytes::Bytes,
    ) {
        let reverse = self.dictionaries.into_reverse_map(self.schema);
        (
            self.num_rows,
            self.schema.clone(),
            reverse,
            self.fixed.freeze(),
            self.variable.freeze(),
        )
    }
}
