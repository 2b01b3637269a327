//! # Container Codec Module
//!
//! The I/O collaborator that performs actual binary/compressed writes
//! against the container format. The rest of the crate treats it as an
//! opaque capability behind the [`ContainerSink`] trait: create a group,
//! write a compressed homogeneous array as a named dataset, write a scalar
//! string as a named attribute, close everything.
//!
//! ## Container Format
//!
//! The production sink, [`ZipContainerSink`], writes a single-file ZIP
//! archive:
//!
//! ```text
//! {file_name}.h5 (ZIP archive)
//! ├── mimetype                  # "application/vnd.runmeta" (uncompressed, first entry)
//! ├── manifest.json             # format version, creation time, writer (Deflate)
//! └── {group}/
//!     ├── {dataset}.parquet     # one single-column Parquet file per array dataset
//!     └── attributes.json       # scalar string attributes of the group (Deflate)
//! ```
//!
//! Parquet entries are stored **uncompressed** within the ZIP because they
//! already carry their own internal compression (ZSTD by default), chosen
//! once per sink via [`CodecConfig`] rather than per dataset.

mod config;
mod container;
mod error;


pub use config::{CodecConfig, CompressionType};
pub use container::{
    ContainerSink, GroupHandle, ZipContainerSink, ATTRIBUTES_FILE, CONTAINER_EXTENSION,
    MANIFEST_FILE, RUNMETA_FORMAT_VERSION, RUNMETA_MIMETYPE,
};
pub use error::CodecError;
