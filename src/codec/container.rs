use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float32Array, Int16Array, Int32Array, Int8Array, UInt16Array, UInt8Array,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use super::config::CodecConfig;
use super::error::CodecError;

/// MIME type for runmeta container files, written as the archive's first entry
pub const RUNMETA_MIMETYPE: &str = "application/vnd.runmeta";

/// Container format version - follows semantic versioning
pub const RUNMETA_FORMAT_VERSION: &str = "1.0.0";

/// File extension of run containers
pub const CONTAINER_EXTENSION: &str = "h5";

/// Name of the manifest entry inside a container
pub const MANIFEST_FILE: &str = "manifest.json";

/// Name of the per-group string-attribute entry inside a container
pub const ATTRIBUTES_FILE: &str = "attributes.json";

/// Handle to a group created inside an open container.
///
/// Issued by [`ContainerSink::create_group`] and valid only for the sink
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHandle(usize);

impl GroupHandle {
    /// Wrap a sink-assigned group index. Sink implementations call this
    /// from `create_group`; handles are opaque to everyone else.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The sink-assigned index of this group
    pub fn index(self) -> usize {
        self.0
    }
}

/// Write-side capability of the container codec.
///
/// One method per primitive element kind: the export pass discovers a
/// column's runtime type and calls the matching path. Implementations
/// compress each dataset with a policy fixed at sink construction.
///
/// `close` must be idempotent and must release every resource the sink
/// holds; callers are expected to invoke it on every exit path, including
/// after a failed write.
pub trait ContainerSink {
    /// Create a named group; datasets and attributes are written into groups
    fn create_group(&mut self, name: &str) -> Result<GroupHandle, CodecError>;

    /// Write an `i8` array as a named compressed dataset
    fn write_i8_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[i8],
    ) -> Result<(), CodecError>;

    /// Write a `u8` array as a named compressed dataset
    fn write_u8_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[u8],
    ) -> Result<(), CodecError>;

    /// Write an `i16` array as a named compressed dataset
    fn write_i16_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[i16],
    ) -> Result<(), CodecError>;

    /// Write a `u16` array as a named compressed dataset
    fn write_u16_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[u16],
    ) -> Result<(), CodecError>;

    /// Write an `i32` array as a named compressed dataset
    fn write_i32_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[i32],
    ) -> Result<(), CodecError>;

    /// Write an `f32` array as a named compressed dataset
    fn write_f32_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[f32],
    ) -> Result<(), CodecError>;

    /// Write a scalar string as a named attribute of the group
    fn write_string_attribute(
        &mut self,
        group: GroupHandle,
        name: &str,
        value: &str,
    ) -> Result<(), CodecError>;

    /// Finalize the container and release all resources. Idempotent.
    fn close(&mut self) -> Result<(), CodecError>;
}

/// Manifest entry identifying the container format and its producer
#[derive(Debug, Serialize)]
struct ContainerManifest {
    format_version: String,
    created: String,
    writer: String,
}

/// Production sink: single-file ZIP container of Parquet datasets.
///
/// Each array dataset becomes a single-column Parquet file stored (without
/// further ZIP compression) under `{group}/{name}.parquet`; string
/// attributes are gathered per group and flushed as
/// `{group}/attributes.json` when the sink closes, together with the
/// top-level `manifest.json`.
///
/// Creating the sink creates the file, so an unopened handle cannot exist:
/// an open failure surfaces as an error from [`ZipContainerSink::create`]
/// and no partially-opened state is left behind.
pub struct ZipContainerSink {
    output_path: PathBuf,
    zip: Option<ZipWriter<BufWriter<File>>>,
    config: CodecConfig,
    groups: Vec<String>,
    attributes: Vec<BTreeMap<String, String>>,
}

impl ZipContainerSink {
    /// Create a container file at `path`, truncating any existing file.
    ///
    /// Writes the `mimetype` entry immediately (first entry, uncompressed,
    /// as container identification requires).
    pub fn create<P: AsRef<Path>>(path: P, config: CodecConfig) -> Result<Self, CodecError> {
        let output_path = path.as_ref().to_path_buf();

        let file = File::create(&output_path)?;
        let buf_writer = BufWriter::new(file);
        let mut zip = ZipWriter::new(buf_writer);

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        zip.start_file("mimetype", options)?;
        zip.write_all(RUNMETA_MIMETYPE.as_bytes())?;

        Ok(Self {
            output_path,
            zip: Some(zip),
            config,
            groups: Vec::new(),
            attributes: Vec::new(),
        })
    }

    /// Path of the container being written
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn group_name(&self, group: GroupHandle) -> Result<&str, CodecError> {
        self.groups
            .get(group.index())
            .map(|s| s.as_str())
            .ok_or(CodecError::UnknownGroup(group.index()))
    }

    /// Encode a single-column batch to an in-memory Parquet buffer and store
    /// it as a ZIP entry under the group.
    fn write_array_entry(
        &mut self,
        group: GroupHandle,
        name: &str,
        array: ArrayRef,
    ) -> Result<(), CodecError> {
        let entry_name = format!("{}/{}.parquet", self.group_name(group)?, name);
        let zip = self.zip.as_mut().ok_or(CodecError::Closed)?;

        let field = Field::new(name, array.data_type().clone(), false);
        let schema = Arc::new(Schema::new(vec![field]));
        let batch = RecordBatch::try_new(schema.clone(), vec![array])?;

        // The ZIP writer needs the full entry upfront, so the Parquet file
        // is assembled in memory first. Run datasets are small.
        let mut buffer = Cursor::new(Vec::new());
        let mut writer =
            ArrowWriter::try_new(&mut buffer, schema, Some(self.config.to_writer_properties()))?;
        writer.write(&batch)?;
        writer.close()?;

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        zip.start_file(entry_name, options)?;
        zip.write_all(&buffer.into_inner())?;
        Ok(())
    }

    fn build_manifest_json() -> Result<String, CodecError> {
        let manifest = ContainerManifest {
            format_version: RUNMETA_FORMAT_VERSION.to_string(),
            created: chrono::Utc::now().to_rfc3339(),
            writer: format!("runmeta-rs v{}", env!("CARGO_PKG_VERSION")),
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

impl ContainerSink for ZipContainerSink {
    fn create_group(&mut self, name: &str) -> Result<GroupHandle, CodecError> {
        if self.zip.is_none() {
            return Err(CodecError::Closed);
        }
        self.groups.push(name.to_string());
        self.attributes.push(BTreeMap::new());
        Ok(GroupHandle(self.groups.len() - 1))
    }

    fn write_i8_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[i8],
    ) -> Result<(), CodecError> {
        self.write_array_entry(group, name, Arc::new(Int8Array::from(values.to_vec())))
    }

    fn write_u8_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[u8],
    ) -> Result<(), CodecError> {
        self.write_array_entry(group, name, Arc::new(UInt8Array::from(values.to_vec())))
    }

    fn write_i16_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[i16],
    ) -> Result<(), CodecError> {
        self.write_array_entry(group, name, Arc::new(Int16Array::from(values.to_vec())))
    }

    fn write_u16_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[u16],
    ) -> Result<(), CodecError> {
        self.write_array_entry(group, name, Arc::new(UInt16Array::from(values.to_vec())))
    }

    fn write_i32_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[i32],
    ) -> Result<(), CodecError> {
        self.write_array_entry(group, name, Arc::new(Int32Array::from(values.to_vec())))
    }

    fn write_f32_array(
        &mut self,
        group: GroupHandle,
        name: &str,
        values: &[f32],
    ) -> Result<(), CodecError> {
        self.write_array_entry(group, name, Arc::new(Float32Array::from(values.to_vec())))
    }

    fn write_string_attribute(
        &mut self,
        group: GroupHandle,
        name: &str,
        value: &str,
    ) -> Result<(), CodecError> {
        let index = group.index();
        if self.zip.is_none() {
            return Err(CodecError::Closed);
        }
        self.group_name(group)?;
        self.attributes[index].insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<(), CodecError> {
        let Some(mut zip) = self.zip.take() else {
            return Ok(());
        };

        for (group, attributes) in self.groups.iter().zip(&self.attributes) {
            if attributes.is_empty() {
                continue;
            }
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644);
            let json = serde_json::to_string_pretty(attributes)?;
            zip.start_file(format!("{group}/{ATTRIBUTES_FILE}"), options)?;
            zip.write_all(json.as_bytes())?;
        }

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        zip.start_file(MANIFEST_FILE, options)?;
        zip.write_all(Self::build_manifest_json()?.as_bytes())?;

        let inner = zip.finish()?;
        inner.into_inner().map_err(|e| {
            CodecError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("failed to flush ZIP buffer: {}", e.error()),
            ))
        })?;
        Ok(())
    }
}
