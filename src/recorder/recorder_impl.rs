use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use log::info;

use crate::codec::{CodecConfig, CONTAINER_EXTENSION, ZipContainerSink};
use crate::export::{export, ExportError, ExportFilter, ExportStats};
use crate::registry::{ColumnRegistry, ColumnValue, RegistryError};

use super::error::RecorderError;
use super::version::{GitVersionProvider, VersionProvider};

/// Well-known column holding the run's wall-clock timestamp
pub const DATE_COLUMN: &str = "Date";
/// Well-known column holding the run label
pub const NAME_COLUMN: &str = "Name";
/// Well-known column holding the free-text run description
pub const DESCRIPTION_COLUMN: &str = "Description";
/// Well-known column holding the version fingerprint
pub const GIT_HASH_COLUMN: &str = "git_hash";
/// Prefix of the per-argument columns (`arg_0`, `arg_1`, ...)
pub const ARG_COLUMN_PREFIX: &str = "arg_";

/// Accumulates one run's metadata and writes it out as a container.
///
/// Construction stamps the registry with run identity (timestamp, label,
/// arguments, version fingerprint); `record` calls accumulate measurement
/// series during the run; [`RunRecorder::write_container`] performs the
/// terminal export pass. One recorder corresponds to one container file.
///
/// Not internally synchronized: record and export sequentially from one
/// logical thread.
#[derive(Debug)]
pub struct RunRecorder {
    registry: ColumnRegistry,
    name: String,
    description: String,
    file_name: String,
}

impl RunRecorder {
    /// Create an unnamed run record (timestamp and fingerprint only).
    ///
    /// The container file name is the epoch offset alone. Fingerprinting
    /// uses [`GitVersionProvider`]; a spawn failure aborts construction.
    pub fn new() -> Result<Self, RecorderError> {
        Self::build("", "", &[], false, &GitVersionProvider)
    }

    /// Create an unnamed run record with an injected fingerprint provider
    pub fn new_with_provider(provider: &dyn VersionProvider) -> Result<Self, RecorderError> {
        Self::build("", "", &[], false, provider)
    }

    /// Create a labelled run record.
    ///
    /// `argv` is the full command line; the leading program name is not
    /// recorded, each remaining argument lands in its own `arg_<i>` column
    /// in original order.
    pub fn with_run_info(
        name: &str,
        description: &str,
        argv: &[String],
    ) -> Result<Self, RecorderError> {
        Self::build(name, description, argv, true, &GitVersionProvider)
    }

    /// Labelled run record with an injected fingerprint provider
    pub fn with_run_info_and_provider(
        name: &str,
        description: &str,
        argv: &[String],
        provider: &dyn VersionProvider,
    ) -> Result<Self, RecorderError> {
        Self::build(name, description, argv, true, provider)
    }

    fn build(
        name: &str,
        description: &str,
        argv: &[String],
        labelled: bool,
        provider: &dyn VersionProvider,
    ) -> Result<Self, RecorderError> {
        let now = Local::now();
        let mut recorder = Self {
            registry: ColumnRegistry::new(),
            name: name.to_string(),
            description: description.to_string(),
            file_name: format!("{}{}", name, seconds_since_y2k(now)),
        };

        recorder.record_str(DATE_COLUMN, &format_ctime(now))?;
        if labelled {
            recorder.record_str(NAME_COLUMN, name)?;
            recorder.record_str(DESCRIPTION_COLUMN, description)?;
        }
        for (i, arg) in argv.iter().skip(1).enumerate() {
            recorder.record_str(&format!("{ARG_COLUMN_PREFIX}{i}"), arg)?;
        }

        // Stored verbatim, trailing newline and all, so the fingerprint
        // column is byte-comparable with what the tool printed.
        let fingerprint = provider.version_fingerprint()?;
        recorder.record_str(GIT_HASH_COLUMN, &fingerprint)?;

        Ok(recorder)
    }

    /// Record one value under `name`, creating the column on first use.
    ///
    /// The first write defines the column's type for the rest of the run;
    /// a later record of a different type under the same name fails with
    /// [`RegistryError::TypeMismatch`] and leaves the column unchanged.
    pub fn record<T: ColumnValue>(&mut self, name: &str, value: T) -> Result<(), RegistryError> {
        self.registry.get_or_create::<T>(name)?;
        self.registry.append(name, value)
    }

    /// Record one string value under `name`; same contract as [`record`]
    ///
    /// [`record`]: RunRecorder::record
    pub fn record_str(&mut self, name: &str, value: &str) -> Result<(), RegistryError> {
        self.record(name, value.to_string())
    }

    /// The run label this recorder was constructed with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The run description this recorder was constructed with
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base name of the run's container file: the run label followed by the
    /// number of seconds since 2000-01-01T00:00:00 at construction time
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Read-only view of the accumulated registry
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Full container path for this run under `dir`
    pub fn container_path<P: AsRef<Path>>(&self, dir: P) -> PathBuf {
        dir.as_ref()
            .join(format!("{}.{}", self.file_name, CONTAINER_EXTENSION))
    }

    /// Write every export-flagged column into a container under `dir`.
    ///
    /// The terminal pass of a run: opens a [`ZipContainerSink`] at
    /// [`container_path`], exports with no length filter, and reports the
    /// final container size. A container that cannot be created is logged
    /// and returned as an error without touching the registry; the
    /// recorder stays intact, so the caller can retry elsewhere.
    ///
    /// [`container_path`]: RunRecorder::container_path
    pub fn write_container<P: AsRef<Path>>(
        &self,
        dir: P,
        config: CodecConfig,
    ) -> Result<ExportStats, ExportError> {
        let path = self.container_path(dir);

        let mut sink = match ZipContainerSink::create(&path, config) {
            Ok(sink) => sink,
            Err(e) => {
                log::error!("could not create container [{}]: {}", path.display(), e);
                return Err(ExportError::Codec(e));
            }
        };

        let mut stats = export(&self.registry, &mut sink, &ExportFilter::default())?;
        stats.file_size_bytes = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        info!("run metadata written to [{}]", path.display());
        Ok(stats)
    }
}

/// ctime-style rendering of the construction timestamp, host-local
fn format_ctime(now: DateTime<Local>) -> String {
    now.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Whole seconds elapsed between 2000-01-01T00:00:00 (host-local) and `now`
fn seconds_since_y2k(now: DateTime<Local>) -> i64 {
    let y2k = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("2000-01-01T00:00:00 is a valid timestamp");
    (now.naive_local() - y2k).num_seconds()
}
