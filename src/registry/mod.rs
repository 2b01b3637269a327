//! # Column Registry Module
//!
//! The string-keyed store of dynamically-typed, append-only columns that
//! backs a run record.
//!
//! ## Design Principles
//!
//! 1. **Closed type set**: a column's payload is a [`ColumnData`] variant
//!    over a fixed set of primitives. There is no "unknown type" state: the
//!    export pass matches exhaustively and the compiler checks coverage.
//!
//! 2. **Typed-or-absent access**: consumers go through [`ColumnValue`]-typed
//!    accessors that return `None` when the name is missing or the tag does
//!    not match. No casts, no reinterpretation.
//!
//! 3. **Immutable tags**: the tag is fixed when the column is created.
//!    Creating an existing name with a different tag is a loud error, never
//!    a silent overwrite, because downstream serialization dispatch is
//!    tag-driven.
//!
//! 4. **Deterministic traversal**: columns iterate in key order, so an
//!    export over an unmodified registry is reproducible.

mod error;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use error::RegistryError;
pub use store::ColumnRegistry;
pub use types::{Column, ColumnData, ColumnValue, TypeTag};
