use std::collections::BTreeMap;

use super::error::RegistryError;
use super::types::{Column, ColumnValue, TypeTag};

/// The string-keyed store of typed columns backing one run record.
///
/// Created empty at recorder construction, populated incrementally for the
/// duration of a run, and traversed read-only by the export pass. The
/// registry is never persisted or reloaded in-process; persistence is
/// entirely the container file's job.
///
/// Columns iterate in key order, so a traversal over an unmodified registry
/// is deterministic.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    columns: BTreeMap<String, Column>,
}

impl ColumnRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a column with the given tag and an empty value sequence.
    ///
    /// Idempotent no-op if a column of the same name and tag already exists.
    /// A name collision with a different tag fails with
    /// [`RegistryError::TypeMismatch`] rather than silently overwriting.
    pub fn create(&mut self, name: &str, tag: TypeTag) -> Result<(), RegistryError> {
        match self.columns.get(name) {
            Some(existing) if existing.type_tag() == tag => Ok(()),
            Some(existing) => Err(RegistryError::TypeMismatch {
                name: name.to_string(),
                existing: existing.type_tag(),
                requested: tag,
            }),
            None => {
                self.columns.insert(name.to_string(), Column::new(tag));
                Ok(())
            }
        }
    }

    /// Append a value to an existing column and mark it for export.
    ///
    /// The column must already exist with a tag matching `T`; auto-creation
    /// is the recorder's responsibility, not the registry's.
    pub fn append<T: ColumnValue>(&mut self, name: &str, value: T) -> Result<(), RegistryError> {
        let column = self
            .columns
            .get_mut(name)
            .ok_or_else(|| RegistryError::ColumnMissing(name.to_string()))?;
        column.push(value).map_err(|_| RegistryError::TypeMismatch {
            name: name.to_string(),
            existing: column.type_tag(),
            requested: T::TYPE_TAG,
        })
    }

    /// Fetch the column named `name`, creating it with `T`'s tag if absent.
    ///
    /// This is the explicit form of the "record creates if absent" contract:
    /// a fresh column comes back with an empty sequence and its export flag
    /// unset. An existing column with a different tag is a collision and
    /// fails loudly.
    pub fn get_or_create<T: ColumnValue>(&mut self, name: &str) -> Result<&mut Column, RegistryError> {
        if let Some(existing) = self.columns.get(name) {
            if existing.type_tag() != T::TYPE_TAG {
                return Err(RegistryError::TypeMismatch {
                    name: name.to_string(),
                    existing: existing.type_tag(),
                    requested: T::TYPE_TAG,
                });
            }
        }
        Ok(self
            .columns
            .entry(name.to_string())
            .or_insert_with(|| Column::new(T::TYPE_TAG)))
    }

    /// Typed view of a column's values.
    ///
    /// Returns `None` if no column of that name exists or its tag does not
    /// match `T`. Consumers must check for absence before use; this contract
    /// is how the rest of the system avoids unchecked casts.
    pub fn lookup_typed<T: ColumnValue>(&self, name: &str) -> Option<&[T]> {
        self.columns.get(name).and_then(|c| c.values::<T>())
    }

    /// Untyped column lookup
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Read-only traversal over all columns, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if no columns exist
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
