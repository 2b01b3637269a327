use std::fmt;

use log::warn;

use crate::codec::{CodecError, ContainerSink};
use crate::registry::{ColumnData, ColumnRegistry};

/// Name of the top-level container group an export pass writes into
pub const ANALYSIS_GROUP: &str = "Analysis_data";

/// Errors that can occur during an export pass
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Error from the container codec
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Column selection for one export pass.
///
/// A column is written when its export flag equals `export_flag` and, if
/// `required_length` is nonzero, its element count equals `required_length`.
/// The length filter lets a caller export only columns of one cardinality
/// (e.g. per-particle arrays vs. scalar metadata), which the container's
/// companion description format needs grouped together.
#[derive(Debug, Clone, Copy)]
pub struct ExportFilter {
    /// Required element count; `0` disables the length filter
    pub required_length: usize,
    /// Export-flag state a column must have to be written
    pub export_flag: bool,
}

impl Default for ExportFilter {
    fn default() -> Self {
        Self {
            required_length: 0,
            export_flag: true,
        }
    }
}

/// Statistics from a completed export pass
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Number of array datasets written
    pub datasets_written: usize,
    /// Number of scalar string attributes written
    pub attributes_written: usize,
    /// Number of columns that passed the filters but were diagnosed and skipped
    pub columns_skipped: usize,
    /// Final container size in bytes (0 when the sink has no backing file)
    pub file_size_bytes: u64,
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} datasets and {} attributes ({} columns skipped)",
            self.datasets_written, self.attributes_written, self.columns_skipped
        )
    }
}

/// Walk the registry and write every qualifying column through the sink.
///
/// Creates the [`ANALYSIS_GROUP`] group, applies `filter` to each column in
/// traversal order, and dispatches on the column's runtime type: numeric
/// columns become compressed array datasets; a string column persists only
/// its **first** recorded value as a scalar attribute (the documented
/// truncation contract); bool columns are diagnosed and skipped.
///
/// The sink is closed before this function returns, whatever the outcome.
/// Skipped columns are not errors: a pass that diagnosed some columns and
/// wrote the rest reports success with partial content.
pub fn export(
    registry: &ColumnRegistry,
    sink: &mut dyn ContainerSink,
    filter: &ExportFilter,
) -> Result<ExportStats, ExportError> {
    let result = write_columns(registry, sink, filter);
    let close_result = sink.close();

    let stats = result?;
    close_result?;
    Ok(stats)
}

fn write_columns(
    registry: &ColumnRegistry,
    sink: &mut dyn ContainerSink,
    filter: &ExportFilter,
) -> Result<ExportStats, ExportError> {
    let group = sink.create_group(ANALYSIS_GROUP)?;
    let mut stats = ExportStats::default();

    for (name, column) in registry.iter() {
        if column.export_flag() != filter.export_flag {
            continue;
        }
        if filter.required_length != 0 && column.len() != filter.required_length {
            continue;
        }

        match column.data() {
            ColumnData::Int8(values) => {
                sink.write_i8_array(group, name, values)?;
                stats.datasets_written += 1;
            }
            ColumnData::UInt8(values) => {
                sink.write_u8_array(group, name, values)?;
                stats.datasets_written += 1;
            }
            ColumnData::Int16(values) => {
                sink.write_i16_array(group, name, values)?;
                stats.datasets_written += 1;
            }
            ColumnData::UInt16(values) => {
                sink.write_u16_array(group, name, values)?;
                stats.datasets_written += 1;
            }
            ColumnData::Int32(values) => {
                sink.write_i32_array(group, name, values)?;
                stats.datasets_written += 1;
            }
            ColumnData::Float32(values) => {
                sink.write_f32_array(group, name, values)?;
                stats.datasets_written += 1;
            }
            ColumnData::String(values) => match values.first() {
                // Only the first recorded string is persisted per name.
                Some(first) => {
                    sink.write_string_attribute(group, name, first)?;
                    stats.attributes_written += 1;
                }
                None => {
                    warn!("string column '{name}' has no recorded value; skipping");
                    stats.columns_skipped += 1;
                }
            },
            ColumnData::Bool(_) => {
                warn!("bool column '{name}' can't be stored with the xdmf sidecar, change datatype; skipping");
                stats.columns_skipped += 1;
            }
        }
    }

    Ok(stats)
}
