use std::fs;

use summarizer_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("reports");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_report() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("reports"));

    let first = writer.write("summary.pdf", b"%PDF-1").unwrap();
    assert_eq!(first.file_name().unwrap(), "summary.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"%PDF-1");

    let second = writer.write("summary.pdf", b"%PDF-2").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"%PDF-2");
}

#[test]
fn refuses_file_as_download_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let err = writer.write("summary.pdf", b"data").unwrap_err();
    assert!(matches!(err, PersistError::DownloadDir { ref dir, .. } if *dir == file_path));
    assert!(!file_path.with_file_name("summary.pdf").exists());
}
