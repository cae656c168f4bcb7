//! Integration tests for the combine stage.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wpt_model::{TableError, TabularFile};
use wpt_transform::{CombineOptions, ProvenanceColumns, TransformError, combine};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn two_sources(dir: &Path) -> Vec<PathBuf> {
    vec![
        write(dir, "A.txt", "Host\tURL\na.com\t/1\na.com\t/2\n"),
        write(dir, "B.txt", "Host\tURL\nb.com\t/3\nb.com\t/4\n"),
    ]
}

#[test]
fn combines_two_sources_with_provenance() {
    let dir = TempDir::new().unwrap();
    let sources = two_sources(dir.path());
    let target = dir.path().join("combined.txt");

    let summary = combine(&sources, &target, &CombineOptions::default()).expect("combine");

    assert_eq!(summary.rows, 4);
    assert_eq!(summary.sources.len(), 2);
    assert_eq!(summary.sources[1].file_number, 2);
    assert_eq!(summary.sources[1].rows, 2);

    let combined = TabularFile::load(&target).unwrap();
    assert_eq!(
        combined.header().serialize(),
        "RowCombined\tFileNameOriginal\tFileNumberOriginal\tRowOriginal\tHost\tURL"
    );
    assert_eq!(combined.row_count(), 4);

    let third = combined.row(2).unwrap();
    assert_eq!(third.get("FileNumberOriginal").unwrap(), Some("2"));
    assert_eq!(third.get("RowOriginal").unwrap(), Some("1"));
    assert_eq!(third.get("RowCombined").unwrap(), Some("3"));
    assert_eq!(third.get("FileNameOriginal").unwrap(), Some("B.txt"));
    assert_eq!(third.get("URL").unwrap(), Some("/3"));
}

#[test]
fn output_is_concatenation_in_given_order() {
    let dir = TempDir::new().unwrap();
    let mut sources = two_sources(dir.path());
    sources.reverse();
    let target = dir.path().join("combined.txt");

    combine(&sources, &target, &CombineOptions::default()).unwrap();

    let text = fs::read_to_string(&target).unwrap();
    let body: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(
        body,
        [
            "1\tB.txt\t1\t1\tb.com\t/3",
            "2\tB.txt\t1\t2\tb.com\t/4",
            "3\tA.txt\t2\t1\ta.com\t/1",
            "4\tA.txt\t2\t2\ta.com\t/2",
        ]
    );
}

#[test]
fn lines_are_trimmed_and_blank_lines_skipped() {
    let dir = TempDir::new().unwrap();
    let sources = vec![write(
        dir.path(),
        "crlf.txt",
        "Host\tURL\r\na.com\t/x\r\n\r\nb.com\t/y  \r\n",
    )];
    let target = dir.path().join("combined.txt");

    let summary = combine(&sources, &target, &CombineOptions::default()).unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "RowCombined\tFileNameOriginal\tFileNumberOriginal\tRowOriginal\tHost\tURL\n\
         1\tcrlf.txt\t1\t1\ta.com\t/x\n\
         2\tcrlf.txt\t1\t2\tb.com\t/y\n"
    );
}

#[test]
fn custom_provenance_names_and_delimiter() {
    let dir = TempDir::new().unwrap();
    let sources = vec![write(dir.path(), "a.csv", "Host,URL\na.com,/\n")];
    let target = dir.path().join("combined.csv");
    let options = CombineOptions {
        delimiter: ',',
        provenance: ProvenanceColumns {
            row_combined: "Row".to_string(),
            file_name: "File".to_string(),
            file_number: "FileNo".to_string(),
            row_original: "SourceRow".to_string(),
        },
    };

    combine(&sources, &target, &options).unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "Row,File,FileNo,SourceRow,Host,URL\n1,a.csv,1,1,a.com,/\n"
    );
}

#[test]
fn empty_source_list_is_rejected() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("combined.txt");
    assert!(matches!(
        combine(&[], &target, &CombineOptions::default()),
        Err(TransformError::NoSources { .. })
    ));
    assert!(!target.exists());
}

#[test]
fn malformed_source_aborts_without_touching_target() {
    let dir = TempDir::new().unwrap();
    let mut sources = two_sources(dir.path());
    sources.push(write(dir.path(), "empty.txt", "  \n"));
    let target = dir.path().join("combined.txt");
    fs::write(&target, "previous run\n").unwrap();

    let err = combine(&sources, &target, &CombineOptions::default()).unwrap_err();

    match err {
        TransformError::Table(TableError::MalformedSource { path, .. }) => {
            assert!(path.ends_with("empty.txt"));
        }
        other => panic!("expected malformed source, got {other}"),
    }
    assert_eq!(fs::read_to_string(&target).unwrap(), "previous run\n");
}

#[test]
fn missing_source_is_malformed() {
    let dir = TempDir::new().unwrap();
    let sources = vec![dir.path().join("absent.txt")];
    let target = dir.path().join("combined.txt");
    assert!(matches!(
        combine(&sources, &target, &CombineOptions::default()),
        Err(TransformError::Table(TableError::MalformedSource { .. }))
    ));
}
