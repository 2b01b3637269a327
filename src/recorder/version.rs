use std::process::Command;

use super::error::RecorderError;

/// Source of the version fingerprint stamped into every run record.
///
/// Injectable so tests supply a fixed string instead of shelling out, and
/// so hosts without the external tool can degrade to a placeholder.
pub trait VersionProvider {
    /// Produce the fingerprint, verbatim (trailing whitespace included)
    fn version_fingerprint(&self) -> Result<String, RecorderError>;
}

/// Fingerprints the working tree with `git rev-parse HEAD`.
///
/// The query blocks until the subprocess exits; there is no timeout, so a
/// hanging git hangs recorder construction.
#[derive(Debug, Default)]
pub struct GitVersionProvider;

impl VersionProvider for GitVersionProvider {
    fn version_fingerprint(&self) -> Result<String, RecorderError> {
        run_external_command("git", &["rev-parse", "HEAD"])
    }
}

/// Provider returning a pre-set fingerprint, for tests and for hosts that
/// cannot or should not invoke a version-control tool.
#[derive(Debug, Clone)]
pub struct FixedVersionProvider(String);

impl FixedVersionProvider {
    /// Create a provider that always yields `fingerprint`
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self(fingerprint.into())
    }
}

impl VersionProvider for FixedVersionProvider {
    fn version_fingerprint(&self) -> Result<String, RecorderError> {
        Ok(self.0.clone())
    }
}

/// Spawn a command synchronously and capture its standard output in full.
///
/// Output is drained to end-of-stream regardless of size and returned
/// verbatim, trailing whitespace included. A command that starts but exits
/// nonzero still yields whatever it printed (pipe-capture semantics); only
/// a spawn failure is an error.
pub fn run_external_command(program: &str, args: &[&str]) -> Result<String, RecorderError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| RecorderError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            source,
        })?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
