//! Core type definitions for the block encoder.

use std::fmt;

/// Logical data type of a schema column.
///
/// The encoder never operates on logical types directly: [`to_stored`] folds
/// each logical type onto the type actually written to the wire (`Boolean`
/// cells travel as `Int`, `Timestamp` as `Long`, `Json` through the `String`
/// dictionary path). Types without a stored form are rejected with
/// `UnsupportedType` when a schema reaches the encoder.
///
/// [`to_stored`]: ColumnDataType::to_stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnDataType {
    Int,
    Long,
    Float,
    Double,
    BigDecimal,
    Boolean,
    Timestamp,
    String,
    Json,
    Bytes,
    Object,
    BooleanArray,
    IntArray,
    LongArray,
    TimestampArray,
    FloatArray,
    DoubleArray,
    StringArray,
    BytesArray,
    Unknown,
}

impl ColumnDataType {
    /// Fold this logical type onto the type stored on the wire.
    #[inline]
    pub fn to_stored(self) -> ColumnDataType {
        match self {
            ColumnDataType::Boolean => ColumnDataType::Int,
            ColumnDataType::Timestamp => ColumnDataType::Long,
            ColumnDataType::Json => ColumnDataType::String,
            other => other,
        }
    }

    /// Bytes one cell of this type occupies in the fixed region, or `None`
    /// when the type has no wire form.
    ///
    /// Primitives are stored inline; `String` stores a 4-byte dictionary id;
    /// every other type stores an 8-byte `(offset, length)` pair into the
    /// variable region.
    pub fn fixed_size_in_bytes(self) -> Option<usize> {
        match self {
            ColumnDataType::Int | ColumnDataType::Boolean => Some(4),
            ColumnDataType::Long | ColumnDataType::Timestamp => Some(8),
            ColumnDataType::Float => Some(4),
            ColumnDataType::Double => Some(8),
            ColumnDataType::String | ColumnDataType::Json => Some(4),
            ColumnDataType::BigDecimal
            | ColumnDataType::Bytes
            | ColumnDataType::Object
            | ColumnDataType::BooleanArray
            | ColumnDataType::IntArray
            | ColumnDataType::LongArray
            | ColumnDataType::TimestampArray
            | ColumnDataType::FloatArray
            | ColumnDataType::DoubleArray
            | ColumnDataType::StringArray
            | ColumnDataType::BytesArray => Some(8),
            ColumnDataType::Unknown => None,
        }
    }

    /// Static name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            ColumnDataType::Int => "INT",
            ColumnDataType::Long => "LONG",
            ColumnDataType::Float => "FLOAT",
            ColumnDataType::Double => "DOUBLE",
            ColumnDataType::BigDecimal => "BIG_DECIMAL",
            ColumnDataType::Boolean => "BOOLEAN",
            ColumnDataType::Timestamp => "TIMESTAMP",
            ColumnDataType::String => "STRING",
            ColumnDataType::Json => "JSON",
            ColumnDataType::Bytes => "BYTES",
            ColumnDataType::Object => "OBJECT",
            ColumnDataType::BooleanArray => "BOOLEAN_ARRAY",
            ColumnDataType::IntArray => "INT_ARRAY",
            ColumnDataType::LongArray => "LONG_ARRAY",
            ColumnDataType::TimestampArray => "TIMESTAMP_ARRAY",
            ColumnDataType::FloatArray => "FLOAT_ARRAY",
            ColumnDataType::DoubleArray => "DOUBLE_ARRAY",
            ColumnDataType::StringArray => "STRING_ARRAY",
            ColumnDataType::BytesArray => "BYTES_ARRAY",
            ColumnDataType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of named, typed columns describing one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSchema {
    column_names: Vec<String>,
    column_data_types: Vec<ColumnDataType>,
}

impl DataSchema {
    /// Build a schema from `(name, type)` pairs. Names must be unique; the
    /// encoder does not check this.
    pub fn new<N: Into<String>>(columns: Vec<(N, ColumnDataType)>) -> Self {
        let mut column_names = Vec::with_capacity(columns.len());
        let mut column_data_types = Vec::with_capacity(columns.len());
        for (name, dtype) in columns {
            column_names.push(name.into());
            column_data_types.push(dtype);
        }
        DataSchema {
            column_names,
            column_data_types,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.column_names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.column_names.is_empty()
    }

    #[inline]
    pub fn column_name(&self, idx: usize) -> &str {
        &self.column_names[idx]
    }

    #[inline]
    pub fn column_data_type(&self, idx: usize) -> ColumnDataType {
        self.column_data_types[idx]
    }

    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[inline]
    pub fn column_data_types(&self) -> &[ColumnDataType] {
        &self.column_data_types
    }

    /// Per-column stored types, logical types folded.
    pub fn stored_column_data_types(&self) -> Vec<ColumnDataType> {
        self.column_data_types
            .iter()
            .map(|dtype| dtype.to_stored())
            .collect()
    }
}

/// A 128-bit decimal: unscaled integer plus base-10 scale.
///
/// The numeric value is `unscaled * 10^(-scale)`. The wire form is produced
/// by [`crate::bigdec::serialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigDecimalValue {
    pub unscaled: i128,
    pub scale: i32,
}

impl BigDecimalValue {
    #[inline]
    pub fn new(unscaled: i128, scale: i32) -> Self {
        BigDecimalValue { unscaled, scale }
    }
}

/// A single input cell, tagged by its observed shape.
///
/// Scalars of any numeric variant can be viewed at any numeric width (the
/// `as_*` methods below); arrays keep their observed element type so the
/// dispatcher can pick a widening path per declared column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigDecimal(BigDecimalValue),
    String(String),
    Bytes(Vec<u8>),
    Object { type_tag: i32, payload: Vec<u8> },
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
}

impl Value {
    /// Static name of the observed shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::BigDecimal(_) => "BigDecimal",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Object { .. } => "Object",
            Value::IntArray(_) => "IntArray",
            Value::LongArray(_) => "LongArray",
            Value::FloatArray(_) => "FloatArray",
            Value::DoubleArray(_) => "DoubleArray",
            Value::StringArray(_) => "StringArray",
        }
    }

    /// View a numeric scalar as `i32` (2's-complement truncation, saturating
    /// from floats). `None` for non-numeric shapes.
    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int(v) => Some(v),
            Value::Long(v) => Some(v as i32),
            Value::Float(v) => Some(v as i32),
            Value::Double(v) => Some(v as i32),
            _ => None,
        }
    }

    /// View a numeric scalar as `i64`. `None` for non-numeric shapes.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    /// View a numeric scalar as `f32` (IEEE rounding from wider types).
    /// `None` for non-numeric shapes.
    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::Int(v) => Some(v as f32),
            Value::Long(v) => Some(v as f32),
            Value::Float(v) => Some(v),
            Value::Double(v) => Some(v as f32),
            _ => None,
        }
    }

    /// View a numeric scalar as `f64`. `None` for non-numeric shapes.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_types_fold_onto_stored() {
        assert_eq!(ColumnDataType::Boolean.to_stored(), ColumnDataType::Int);
        assert_eq!(ColumnDataType::Timestamp.to_stored(), ColumnDataType::Long);
        assert_eq!(ColumnDataType::Json.to_stored(), ColumnDataType::String);
        assert_eq!(ColumnDataType::Bytes.to_stored(), ColumnDataType::Bytes);
    }

    #[test]
    fn test_numeric_views_follow_cast_semantics() {
        assert_eq!(Value::Long(0x1_0000_0001).as_i32(), Some(1));
        assert_eq!(Value::Double(3.9).as_i32(), Some(3));
        assert_eq!(Value::Double(-3.9).as_i64(), Some(-3));
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::String("7".to_string()).as_i32(), None);
    }
}
