use std::io;
use thiserror::Error;

/// Unified error type for all qex operations.
///
/// Every failure aborts the block being built: partial builders are discarded,
/// nothing is retried, and the caller observes exactly one error naming the
/// offending column where one exists.
///
/// `Error` implements `Send` and `Sync`, so a failed build can be reported from
/// a different thread than the one that ran it.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying byte stream could not be extended.
    ///
    /// Block regions are in-memory buffers; the only way they refuse a write is
    /// a failed allocation, which surfaces here with `ErrorKind::OutOfMemory`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The declared column type has no wire form.
    ///
    /// Raised when a schema carries a type the block encoder cannot store
    /// (e.g. `Unknown`). Fatal for the block.
    #[error("unsupported data type: {dtype} for column: {column}")]
    UnsupportedType { column: String, dtype: &'static str },

    /// The supplied value cannot be coerced to the declared column type.
    ///
    /// Widening promotions are attempted first; anything that still does not
    /// fit the declared shape (e.g. a scalar where an array is required, or a
    /// float array for a long-array column) lands here. Fatal for the block.
    #[error("type mismatch for column: {column}: declared {dtype}, got {got}")]
    TypeMismatch {
        column: String,
        dtype: &'static str,
        got: &'static str,
    },

    /// Invalid caller input that is not a per-cell type problem.
    ///
    /// Ragged rows (shorter than the schema) and columnar input whose columns
    /// disagree on length or count are rejected here before any cell is
    /// dispatched.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Internal error indicating a bug or an exceeded wire limit.
    ///
    /// Raised when a region or value outgrows the 32-bit offsets the wire
    /// format can address. Should not occur for inputs within the format's
    /// design envelope.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an [`Error::UnsupportedType`] naming the offending column.
    #[inline]
    pub fn unsupported_type(column: impl Into<String>, dtype: &'static str) -> Self {
        Error::UnsupportedType {
            column: column.into(),
            dtype,
        }
    }

    /// Create an [`Error::TypeMismatch`] naming the offending column and the
    /// shape actually supplied.
    #[inline]
    pub fn type_mismatch(
        column: impl Into<String>,
        dtype: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            dtype,
            got,
        }
    }
}
