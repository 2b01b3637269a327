//! # Recorder Module
//!
//! The user-facing accumulation API for one experiment run, plus the
//! construction-time identity capture that stamps provenance into the
//! registry before any measurement is recorded.
//!
//! ## Schema by First Write
//!
//! [`RunRecorder::record`] creates the named column on first use with the
//! value's type and appends on every later call. A run's schema is whatever
//! got recorded; nothing is declared up front. Recording a name again with
//! a different type is a collision and fails loudly.
//!
//! ## Run Identity
//!
//! Construction populates well-known single-element string columns:
//! `Date` (wall-clock timestamp), `Name` and `Description` (parameterized
//! constructors only), `arg_0..arg_{k-1}` (the command line, excluding the
//! program name), and `git_hash` (a version fingerprint from the
//! [`VersionProvider`] collaborator, by default `git rev-parse HEAD`,
//! stored verbatim including the tool's trailing newline). All of them are
//! flagged for export.
//!
//! A fingerprint failure aborts construction: a run record without
//! provenance is silently incomparable, so the failure is surfaced where it
//! happens. Tests and degraded environments inject [`FixedVersionProvider`]
//! instead.

mod error;
mod recorder_impl;
mod version;


pub use error::RecorderError;
pub use recorder_impl::{
    RunRecorder, ARG_COLUMN_PREFIX, DATE_COLUMN, DESCRIPTION_COLUMN, GIT_HASH_COLUMN, NAME_COLUMN,
};
pub use version::{
    run_external_command, FixedVersionProvider, GitVersionProvider, VersionProvider,
};
