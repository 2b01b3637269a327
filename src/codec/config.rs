use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;

/// Compression options for container datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        // Run containers hold small series; zstd level 1 keeps the terminal
        // export pass cheap while still compressing repetitive data well.
        Self::Zstd(1)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Balanced compression
    pub fn balanced() -> Self {
        Self::Zstd(3)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }
}

/// Construction-time configuration of a container sink.
///
/// The codec and level are fixed once for the whole sink; every dataset in
/// the container is written under the same policy.
#[derive(Debug, Clone, Default)]
pub struct CodecConfig {
    /// Compression applied inside each Parquet dataset
    pub compression: CompressionType,
}

impl CodecConfig {
    /// Create Parquet writer properties from this configuration
    pub(super) fn to_writer_properties(&self) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or(ZstdLevel::default()))
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        WriterProperties::builder()
            .set_compression(compression)
            .build()
    }
}
