//! Per-column string interning.
//!
//! Each string-bearing column gets its own id space, assigned densely in
//! first-occurrence order. Because ids are dense, the reverse map is just the
//! insertion-order vector; the forward map exists only to dedupe.

use rustc_hash::FxHashMap;

use crate::types::DataSchema;

/// Reverse dictionaries delivered with a frozen block: column name to the
/// id-indexed vector of strings. Only columns that were actually written
/// appear.
pub type ReverseDictionary = FxHashMap<String, Vec<String>>;

/// Dense string interner for one column.
#[derive(Debug, Default)]
pub struct Dictionary {
    forward: FxHashMap<String, u32>,
    reverse: Vec<String>,
}

impl Dictionary {
    /// Return the id for `value`, inserting it with the next dense id on
    /// first occurrence.
    pub fn id_of(&mut self, value: &str) -> u32 {
        if let Some(&id) = self.forward.get(value) {
            return id;
        }
        let id = self.forward.len() as u32;
        self.forward.insert(value.to_string(), id);
        self.reverse.push(value.to_string());
        id
    }

    /// Number of distinct strings interned so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    fn into_reverse(self) -> Vec<String> {
        self.reverse
    }
}

/// Lazily-created interners indexed by column position.
///
/// Indexing by position avoids hashing the column name once per cell; the
/// name-keyed shape consumers expect is produced only at freeze.
#[derive(Debug)]
pub struct DictionarySet {
    slots: Vec<Option<Dictionary>>,
}

impl DictionarySet {
    pub fn new(num_columns: usize) -> Self {
        DictionarySet {
            slots: (0..num_columns).map(|_| None).collect(),
        }
    }

    /// The interner for column `col`, created on first use.
    #[inline]
    pub fn column(&mut self, col: usize) -> &mut Dictionary {
        self.slots[col].get_or_insert_with(Dictionary::default)
    }

    /// Freeze into the delivered `column name -> id -> string` shape.
    pub fn into_reverse_map(self, schema: &DataSchema) -> ReverseDictionary {
        let mut out = ReverseDictionary::default();
        for (col, slot) in self.slots.into_iter().enumerate() {
            if let Some(dictionary) = slot {
                out.insert(schema.column_name(col).to_string(), dictionary.into_reverse());
            }
        }
        out
    }
}
