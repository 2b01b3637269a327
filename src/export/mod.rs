//! # Export Engine Module
//!
//! The terminal pass over a run's column registry: filter columns by export
//! flag and required element count, then dispatch each survivor to the
//! container sink path matching its runtime type.
//!
//! Dispatch is an exhaustive match over the closed [`ColumnData`] set, so
//! there is no "unknown type" failure mode. Columns the container format
//! cannot represent (`bool`, or a string column with nothing recorded) are
//! diagnosed through the log and skipped; one bad column never aborts a
//! run's export. The sink is closed on every exit path.
//!
//! [`ColumnData`]: crate::registry::ColumnData

mod engine;


pub use engine::{export, ExportError, ExportFilter, ExportStats, ANALYSIS_GROUP};
