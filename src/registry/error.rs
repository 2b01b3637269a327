use super::types::TypeTag;

/// Errors that can occur during registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A column exists under this name with a different type tag.
    ///
    /// Creating or appending under an existing name with a mismatched tag
    /// would corrupt the tag-driven serialization dispatch, so the operation
    /// fails instead of reinterpreting data.
    #[error("column '{name}' already exists as {existing}, requested {requested}")]
    TypeMismatch {
        /// Name of the colliding column
        name: String,
        /// Tag the column was created with
        existing: TypeTag,
        /// Tag the caller asked for
        requested: TypeTag,
    },

    /// Append was called for a column that has not been created
    #[error("column '{0}' does not exist")]
    ColumnMissing(String),
}
