//! Error types and result definitions for the qex data exchange layer.
//!
//! This crate provides the unified error type ([`Error`]) and result type alias
//! ([`Result<T>`]) used throughout the qex crates. All operations that could fail
//! return `Result<T>`, where the error variant carries the offending column name
//! and type so callers observe a single actionable error per failed block.
//!
//! # Error Philosophy
//!
//! qex uses a single error enum ([`Error`]) rather than crate-specific error types.
//!
//! This approach:
//! - Simplifies error handling across crate boundaries
//! - Allows errors to propagate naturally with the `?` operator
//! - Provides clear error messages for end users
//! - Enables structured error matching for programmatic handling
//!
//! # Error Categories
//!
//! - **I/O errors** ([`Error::Io`]): the underlying byte stream cannot be extended
//! - **Unsupported types** ([`Error::UnsupportedType`]): declared column type has no wire form
//! - **Type mismatches** ([`Error::TypeMismatch`]): supplied value cannot be coerced to the declared type
//! - **User input errors** ([`Error::InvalidArgumentError`]): malformed caller input (e.g. ragged rows)
//! - **Internal errors** ([`Error::Internal`]): bugs or exceeded wire limits

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
