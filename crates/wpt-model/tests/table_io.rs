//! File-backed load and write tests.

use std::fs;

use tempfile::TempDir;
use wpt_model::{TableError, TabularFile};

#[test]
fn load_then_write_reproduces_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("requests.txt");
    let target = dir.path().join("copy.txt");
    let contents = "Host\tURL\tBytes In\na.com\t/\t512\nb.com\t/x.css\t128\n";
    fs::write(&source, contents).unwrap();

    let table = TabularFile::load(&source).expect("load");
    table.write(&target).expect("write");

    assert_eq!(fs::read_to_string(&target).unwrap(), contents);
}

#[test]
fn write_truncates_existing_target() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out.txt");
    fs::write(&target, "stale\tcontent\nthat\tis\nmuch\tlonger\n").unwrap();

    let table = TabularFile::parse("A\tB\n1\t2", '\t').unwrap();
    table.write(&target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "A\tB\n1\t2\n");
}

#[test]
fn inserted_column_is_written_empty_until_set() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out.txt");
    let mut table = TabularFile::parse("Host\tURL\na.com\t/\nb.com\t/y", '\t').unwrap();
    table.add_column_after("URL", "SanitizedURL").unwrap();
    table
        .row_mut(1)
        .unwrap()
        .set("SanitizedURL", "/y")
        .unwrap();
    table.write(&target).unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "Host\tURL\tSanitizedURL\na.com\t/\t\nb.com\t/y\t/y\n"
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.txt");
    let err = TabularFile::load(&path).unwrap_err();
    match err {
        TableError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected io error, got {other}"),
    }
}

#[test]
fn empty_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "\n\n").unwrap();
    assert!(matches!(
        TabularFile::load(&path),
        Err(TableError::MalformedSource { .. })
    ));
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nope").join("out.txt");
    let table = TabularFile::parse("A\n1", '\t').unwrap();
    assert!(matches!(table.write(&target), Err(TableError::Io { .. })));
}
