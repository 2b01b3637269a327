//! Integration tests for the run container format
//!
//! These tests verify:
//! 1. Run identity capture populating the well-known columns
//! 2. The full record-then-export pass producing a valid container
//! 3. Container structure (mimetype first entry, datasets, attributes)
//! 4. Readback of exported datasets through standard Parquet tooling

use std::fs::File;
use std::io::Read;

use arrow::array::Float32Array;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::tempdir;
use zip::ZipArchive;

use runmeta::codec::CodecConfig;
use runmeta::recorder::{FixedVersionProvider, RunRecorder};
use runmeta::registry::TypeTag;

fn trial_recorder() -> RunRecorder {
    let argv = vec!["prog".to_string(), "--x".to_string(), "5".to_string()];
    RunRecorder::with_run_info_and_provider(
        "trial1",
        "test",
        &argv,
        &FixedVersionProvider::new("abc123\n"),
    )
    .unwrap()
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Vec<u8> {
    let mut entry = archive.by_name(name).unwrap();
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf).unwrap();
    buf
}

#[test]
fn test_end_to_end_run_record() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut run = trial_recorder();

    // Identity columns: single-element strings, flagged for export
    for name in ["Date", "Name", "Description", "arg_0", "arg_1", "git_hash"] {
        let column = run.registry().get(name).unwrap_or_else(|| panic!("missing {name}"));
        assert_eq!(column.type_tag(), TypeTag::String);
        assert_eq!(column.len(), 1);
        assert!(column.export_flag());
    }
    assert_eq!(
        run.registry().lookup_typed::<String>("arg_0"),
        Some(&["--x".to_string()][..])
    );
    assert_eq!(
        run.registry().lookup_typed::<String>("arg_1"),
        Some(&["5".to_string()][..])
    );

    run.record("score", 0.87f32).unwrap();
    run.record("score", 0.87f32).unwrap();
    run.record("score", 0.91f32).unwrap();
    assert_eq!(run.registry().get("score").unwrap().len(), 3);

    // A bool column is storable but must not reach the container
    run.record("converged", true).unwrap();

    let dir = tempdir().unwrap();
    let stats = run.write_container(dir.path(), CodecConfig::default()).unwrap();

    assert_eq!(stats.datasets_written, 1);
    assert_eq!(stats.attributes_written, 6);
    assert_eq!(stats.columns_skipped, 1);
    assert!(stats.file_size_bytes > 0);

    let path = run.container_path(dir.path());
    assert!(path.is_file());
    assert!(path.to_string_lossy().ends_with(".h5"));
    let file_name = path.file_stem().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("trial1"));

    let file = File::open(&path).unwrap();
    let mut archive = ZipArchive::new(file).unwrap();

    // Container identification: mimetype first, uncompressed
    let first_entry = archive.by_index(0).unwrap();
    assert_eq!(first_entry.name(), "mimetype");
    assert_eq!(first_entry.compression(), zip::CompressionMethod::Stored);
    drop(first_entry);

    // The score dataset reads back through plain Parquet tooling
    let score_bytes = Bytes::from(read_entry(&mut archive, "Analysis_data/score.parquet"));
    let mut reader = ParquetRecordBatchReaderBuilder::try_new(score_bytes)
        .unwrap()
        .build()
        .unwrap();
    let batch = reader.next().unwrap().unwrap();
    assert_eq!(batch.num_rows(), 3);
    let scores = batch
        .column(0)
        .as_any()
        .downcast_ref::<Float32Array>()
        .unwrap();
    assert_eq!(scores.values().to_vec(), vec![0.87f32, 0.87, 0.91]);

    // All six identity strings are attributes of the analysis group
    let attrs = read_entry(&mut archive, "Analysis_data/attributes.json");
    let attrs: serde_json::Value = serde_json::from_slice(&attrs).unwrap();
    assert_eq!(attrs["Name"], "trial1");
    assert_eq!(attrs["Description"], "test");
    assert_eq!(attrs["arg_0"], "--x");
    assert_eq!(attrs["arg_1"], "5");
    assert_eq!(attrs["git_hash"], "abc123\n");
    assert!(attrs["Date"].is_string());

    // No bool-typed content anywhere in the archive
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(!names.iter().any(|n| n.contains("converged")));
}

#[test]
fn test_unnamed_run_container_is_epoch_named() {
    let run = RunRecorder::new_with_provider(&FixedVersionProvider::new("abc123\n")).unwrap();

    let dir = tempdir().unwrap();
    run.write_container(dir.path(), CodecConfig::default()).unwrap();

    let path = run.container_path(dir.path());
    assert!(path.is_file());
    let stem = path.file_stem().unwrap().to_string_lossy().to_string();
    assert!(stem.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_container_open_failure_is_recoverable() {
    let mut run = trial_recorder();
    run.record("score", 0.5f32).unwrap();

    let dir = tempdir().unwrap();
    let missing = dir.path().join("no_such_subdir");

    // The export pass fails cleanly; the recorder and registry are intact
    assert!(run.write_container(&missing, CodecConfig::default()).is_err());
    assert_eq!(run.registry().get("score").unwrap().len(), 1);

    // A retry at a writable location succeeds
    let stats = run.write_container(dir.path(), CodecConfig::default()).unwrap();
    assert_eq!(stats.datasets_written, 1);
}

#[test]
fn test_multiple_runs_do_not_collide() {
    let dir = tempdir().unwrap();

    let mut first = trial_recorder();
    first.record("score", 1.0f32).unwrap();
    first.write_container(dir.path(), CodecConfig::default()).unwrap();

    let mut second = RunRecorder::with_run_info_and_provider(
        "trial2",
        "follow-up",
        &["prog".to_string()],
        &FixedVersionProvider::new("def456\n"),
    )
    .unwrap();
    second.record("score", 2.0f32).unwrap();
    second.write_container(dir.path(), CodecConfig::default()).unwrap();

    assert!(first.container_path(dir.path()).is_file());
    assert!(second.container_path(dir.path()).is_file());
    assert_ne!(
        first.container_path(dir.path()),
        second.container_path(dir.path())
    );
}
