//! Randomized invariant checks over mixed schemas.
//!
//! Seeds are fixed so failures reproduce. The walks below re-derive every
//! `(offset, length)` cell from the declared layout and verify the variable
//! region is consumed exactly once, in write order, with no gaps.

mod common;

use common::{be_i32, cell_pair};
use qex_datablock::layout::{ColumnarLayout, RowLayout};
use qex_datablock::{
    BigDecimalValue, ColumnDataType, DataBlock, DataBlockBuilder, DataSchema, Value,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WORD_POOL: [&str; 6] = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];

fn random_value(rng: &mut StdRng, dtype: ColumnDataType) -> Value {
    match dtype {
        ColumnDataType::Int | ColumnDataType::Boolean => {
            Value::Int(rng.random_range(-1_000..1_000))
        }
        ColumnDataType::Long | ColumnDataType::Timestamp => {
            Value::Long(rng.random_range(-1_000_000..1_000_000))
        }
        ColumnDataType::Float => Value::Float(rng.random_range(-1_000..1_000) as f32 / 4.0),
        ColumnDataType::Double => Value::Double(rng.random_range(-1_000..1_000) as f64 / 4.0),
        ColumnDataType::BigDecimal => Value::BigDecimal(BigDecimalValue::new(
            rng.random_range(-1_000_000_000i128..1_000_000_000),
            rng.random_range(0..6),
        )),
        ColumnDataType::String | ColumnDataType::Json => {
            Value::String(WORD_POOL[rng.random_range(0..WORD_POOL.len())].to_string())
        }
        ColumnDataType::Bytes => {
            let len = rng.random_range(0..8);
            Value::Bytes((0..len).map(|_| rng.random_range(0..=255u8)).collect())
        }
        ColumnDataType::Object => {
            let len = rng.random_range(0..6);
            Value::Object {
                type_tag: rng.random_range(0..16),
                payload: (0..len).map(|_| rng.random_range(0..=255u8)).collect(),
            }
        }
        ColumnDataType::BooleanArray | ColumnDataType::IntArray => {
            let len = rng.random_range(0..5);
            Value::IntArray((0..len).map(|_| rng.random_range(-100..100)).collect())
        }
        ColumnDataType::TimestampArray | ColumnDataType::LongArray => {
            // half the rows exercise the int->long widening path
            let len = rng.random_range(0..5);
            if rng.random_range(0..2) == 0 {
                Value::IntArray((0..len).map(|_| rng.random_range(-100..100)).collect())
            } else {
                Value::LongArray((0..len).map(|_| rng.random_range(-100_000..100_000)).collect())
            }
        }
        ColumnDataType::FloatArray => {
            let len = rng.random_range(0..5);
            Value::FloatArray((0..len).map(|_| rng.random_range(-64..64) as f32 / 2.0).collect())
        }
        ColumnDataType::DoubleArray => {
            let len = rng.random_range(0..5);
            match rng.random_range(0..4) {
                0 => Value::IntArray((0..len).map(|_| rng.random_range(-100..100)).collect()),
                1 => Value::LongArray((0..len).map(|_| rng.random_range(-100..100)).collect()),
                2 => Value::FloatArray(
                    (0..len).map(|_| rng.random_range(-64..64) as f32 / 2.0).collect(),
                ),
                _ => Value::DoubleArray(
                    (0..len).map(|_| rng.random_range(-64..64) as f64 / 2.0).collect(),
                ),
            }
        }
        ColumnDataType::StringArray | ColumnDataType::BytesArray => {
            let len = rng.random_range(0..4);
            Value::StringArray(
                (0..len)
                    .map(|_| WORD_POOL[rng.random_range(0..WORD_POOL.len())].to_string())
                    .collect(),
            )
        }
        ColumnDataType::Unknown => unreachable!("not generated"),
    }
}

fn mixed_schema() -> DataSchema {
    DataSchema::new(vec![
        ("i", ColumnDataType::Int),
        ("l", ColumnDataType::Long),
        ("d", ColumnDataType::Double),
        ("s", ColumnDataType::String),
        ("dec", ColumnDataType::BigDecimal),
        ("raw", ColumnDataType::Bytes),
        ("obj", ColumnDataType::Object),
        ("la", ColumnDataType::LongArray),
        ("da", ColumnDataType::DoubleArray),
        ("sa", ColumnDataType::StringArray),
    ])
}

fn random_rows(rng: &mut StdRng, schema: &DataSchema, num_rows: usize) -> Vec<Vec<Value>> {
    (0..num_rows)
        .map(|_| {
            (0..schema.len())
                .map(|c| random_value(rng, schema.column_data_type(c)))
                .collect()
        })
        .collect()
}

fn transpose(schema: &DataSchema, rows: &[Vec<Value>]) -> Vec<Vec<Value>> {
    (0..schema.len())
        .map(|c| rows.iter().map(|row| row[c].clone()).collect())
        .collect()
}

/// Is the stored type an `(offset, length)` cell, and does its variable
/// record carry an extra prefix the stored length does not cover?
fn indirect_extra_bytes(dtype: ColumnDataType) -> Option<usize> {
    match dtype.to_stored() {
        ColumnDataType::Int
        | ColumnDataType::Long
        | ColumnDataType::Float
        | ColumnDataType::Double
        | ColumnDataType::String => None,
        ColumnDataType::Object => Some(4),
        _ => Some(0),
    }
}

#[test]
fn test_fixed_region_lengths_match_layouts() {
    let mut rng = StdRng::seed_from_u64(0xDA7A_B10C);
    let schema = mixed_schema();
    let rows = random_rows(&mut rng, &schema, 171);
    let columns = transpose(&schema, &rows);

    let row_block = DataBlockBuilder::build_from_rows(&schema, &rows).unwrap();
    let col_block = DataBlockBuilder::build_from_columns(&schema, &columns).unwrap();

    let row_layout = RowLayout::new(&schema).unwrap();
    let col_layout = ColumnarLayout::new(&schema, rows.len()).unwrap();
    assert_eq!(
        row_block.fixed_data().len(),
        rows.len() * row_layout.row_size_in_bytes()
    );
    assert_eq!(col_block.fixed_data().len(), col_layout.fixed_size_in_bytes());
}

/// Walk the fixed region in write order and verify every indirect cell's
/// offset equals the variable bytes consumed so far.
#[test]
fn test_variable_offsets_are_contiguous_in_write_order() {
    let mut rng = StdRng::seed_from_u64(0x0FF5_E75);
    let schema = mixed_schema();
    let rows = random_rows(&mut rng, &schema, 57);

    // row layout: cells visited row-major
    let block = DataBlockBuilder::build_from_rows(&schema, &rows).unwrap();
    let layout = RowLayout::new(&schema).unwrap();
    let fixed = block.fixed_data();
    let mut consumed = 0usize;
    for r in 0..rows.len() {
        for c in 0..schema.len() {
            if let Some(extra) = indirect_extra_bytes(schema.column_data_type(c)) {
                let pos = r * layout.row_size_in_bytes() + layout.column_offset(c);
                let (offset, length) = cell_pair(fixed, pos);
                assert_eq!(offset as usize, consumed, "cell ({r}, {c})");
                consumed += length as usize + extra;
            }
        }
    }
    assert_eq!(consumed, block.variable_data().len());

    // columnar layout: cells visited column-major
    let columns = transpose(&schema, &rows);
    let block = DataBlockBuilder::build_from_columns(&schema, &columns).unwrap();
    let layout = ColumnarLayout::new(&schema, rows.len()).unwrap();
    let fixed = block.fixed_data();
    let mut consumed = 0usize;
    for c in 0..schema.len() {
        if let Some(extra) = indirect_extra_bytes(schema.column_data_type(c)) {
            for r in 0..rows.len() {
                let pos = layout.cumulative_offset(c) + r * layout.column_size_in_bytes(c);
                let (offset, length) = cell_pair(fixed, pos);
                assert_eq!(offset as usize, consumed, "cell ({r}, {c})");
                consumed += length as usize + extra;
            }
        }
    }
    assert_eq!(consumed, block.variable_data().len());
}

/// With a single variable-width column the two layouts append the same
/// payloads in the same order: variable regions, dictionaries and every
/// fixed cell agree. (With several variable columns only the per-column
/// payload order is shared, so the regions would interleave differently.)
#[test]
fn test_row_and_columnar_equivalence_randomized() {
    let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);
    let schema = DataSchema::new(vec![
        ("id", ColumnDataType::Int),
        ("name", ColumnDataType::String),
        ("vals", ColumnDataType::DoubleArray),
        ("score", ColumnDataType::Double),
    ]);
    let rows = random_rows(&mut rng, &schema, 200);
    let columns = transpose(&schema, &rows);

    let row_block = DataBlockBuilder::build_from_rows(&schema, &rows).unwrap();
    let col_block = DataBlockBuilder::build_from_columns(&schema, &columns).unwrap();

    assert_eq!(row_block.variable_data(), col_block.variable_data());
    assert_eq!(row_block.reverse_dictionary(), col_block.reverse_dictionary());

    let row_layout = RowLayout::new(&schema).unwrap();
    let col_layout = ColumnarLayout::new(&schema, rows.len()).unwrap();
    for r in 0..rows.len() {
        for c in 0..schema.len() {
            let width = col_layout.column_size_in_bytes(c);
            let row_pos = r * row_layout.row_size_in_bytes() + row_layout.column_offset(c);
            let col_pos = col_layout.cumulative_offset(c) + r * width;
            assert_eq!(
                &row_block.fixed_data()[row_pos..row_pos + width],
                &col_block.fixed_data()[col_pos..col_pos + width],
                "cell ({r}, {c}) differs between layouts"
            );
        }
    }
}

/// Dictionary ids observed on the wire are dense per column and resolve
/// through the delivered reverse map to the strings that were written.
#[test]
fn test_dictionary_ids_are_dense_and_resolvable() {
    let mut rng = StdRng::seed_from_u64(0xD1C7);
    let schema = DataSchema::new(vec![("s", ColumnDataType::String)]);
    let rows = random_rows(&mut rng, &schema, 300);
    let block = DataBlockBuilder::build_from_rows(&schema, &rows).unwrap();

    let reverse = &block.reverse_dictionary()["s"];
    let mut seen = vec![false; reverse.len()];
    for (r, row) in rows.iter().enumerate() {
        let id = be_i32(block.fixed_data(), r * 4) as usize;
        assert!(id < reverse.len());
        seen[id] = true;
        let Value::String(expected) = &row[0] else {
            unreachable!()
        };
        assert_eq!(&reverse[id], expected);
    }
    // dense: every id in 0..len was assigned to some cell
    assert!(seen.iter().all(|&b| b));
}
