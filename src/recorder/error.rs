use crate::registry::RegistryError;

/// Errors that can occur while constructing or using a recorder
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// An external command could not be started.
    ///
    /// Fatal at construction time: the version fingerprint is a provenance
    /// requirement, not optional metadata.
    #[error("failed to run '{command}': {source}")]
    CommandFailed {
        /// The command line that could not be spawned
        command: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Error from the column registry
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
