//! # runmeta - Run-Metadata Recording for Scientific Experiments
//!
//! `runmeta` accumulates heterogeneous, named, append-only measurement series
//! (scalars, small arrays, strings) produced during an experiment run and
//! persists them into a self-describing, compressed binary container for
//! later comparison across runs.
//!
//! ## Key Features
//!
//! - **Schema by first write**: `record("score", 0.87f32)` creates a typed
//!   column on first use; subsequent records append. A run's schema is
//!   implicitly defined by which typed values are recorded under which names.
//!
//! - **Closed typed column model**: columns are a tagged union over a fixed
//!   primitive set (8/16/32-bit integers, `f32`, `bool`, `String`), so the
//!   export pass dispatches exhaustively instead of comparing type strings.
//!
//! - **Provenance stamped at construction**: timestamp, run name and
//!   description, command-line arguments, and a version fingerprint obtained
//!   from an injectable provider (by default, `git rev-parse HEAD`).
//!
//! - **Compressed container output**: one container per run: a ZIP archive
//!   holding one ZSTD-compressed Parquet dataset per numeric column, string
//!   columns as JSON attributes, and a manifest identifying the format.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use runmeta::codec::CodecConfig;
//! use runmeta::recorder::RunRecorder;
//!
//! let argv: Vec<String> = std::env::args().collect();
//! let mut run = RunRecorder::with_run_info("trial1", "baseline sweep", &argv)?;
//!
//! run.record("score", 0.87f32)?;
//! run.record("score", 0.91f32)?;
//! run.record("particles", 1024u16)?;
//!
//! let stats = run.write_container(".", CodecConfig::default())?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This produces a container named `trial1<epoch>.h5`, where `<epoch>` is
//! the number of seconds since 2000-01-01T00:00:00:
//!
//! ```text
//! trial1809907200.h5 (ZIP archive)
//! ├── mimetype                      # "application/vnd.runmeta" (first entry)
//! ├── manifest.json                 # format version, creation time, writer
//! └── Analysis_data/
//!     ├── score.parquet             # float32 dataset, ZSTD compressed
//!     ├── particles.parquet         # uint16 dataset
//!     └── attributes.json           # Date, Name, Description, arg_*, git_hash
//! ```
//!
//! Containers are standard ZIP + Parquet + JSON and can be inspected with
//! any Parquet-compatible tool; the library itself is write-only.
//!
//! ## Architecture
//!
//! - [`registry`]: the string-keyed store of dynamically-typed columns
//! - [`recorder`]: the user-facing accumulation API and run identity capture
//! - [`codec`]: the container sink: compressed dataset and attribute writes
//! - [`export`]: the filtering/dispatch pass that walks the registry and
//!   invokes the type-appropriate codec path per column
//!
//! ## Threading
//!
//! The recorder performs no internal synchronization. Record calls during
//! the run and the terminal export are expected to execute sequentially on
//! one logical thread; concurrent producers must serialize access (or keep
//! one recorder per worker and merge before export).

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod export;
pub mod recorder;
pub mod registry;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::codec::{
        CodecConfig, CodecError, CompressionType, ContainerSink, GroupHandle, ZipContainerSink,
    };
    pub use crate::export::{export, ExportError, ExportFilter, ExportStats, ANALYSIS_GROUP};
    pub use crate::recorder::{
        FixedVersionProvider, GitVersionProvider, RecorderError, RunRecorder, VersionProvider,
    };
    pub use crate::registry::{
        Column, ColumnData, ColumnRegistry, ColumnValue, RegistryError, TypeTag,
    };
}
