use std::fs;
use std::path::Path;

use hub_ingest::{
    CourseSource, CsvSource, IngestError, ReadOptions, SkipKind, TableSource, discover_sources,
    sha256_hex,
};

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write file");
}

const CAS: &str = "code,name,Quantitative Reasoning I,Ethical Reasoning\n\
CAS CS 131,Combinatoric Structures,1,0\n\
CAS PH 150,Introduction to Ethics,0,1\n";

#[test]
fn reads_csv_source() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cas_all_courses.csv");
    write(&path, CAS);

    let source = CsvSource::new(&path, "cas");
    let read = source.read(&ReadOptions::default()).expect("read csv");
    assert_eq!(read.records.len(), 2);
    assert_eq!(read.records[0].identifier, "CAS CS 131");
    assert_eq!(read.records[0].source_tag, "cas");
    assert!(read.records[0].satisfies("Quantitative Reasoning I"));
    assert!(read.records[1].satisfies("Ethical Reasoning"));
    assert_eq!(read.skipped_rows, 0);
}

#[test]
fn missing_file_is_source_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = CsvSource::new(dir.path().join("gone.csv"), "gone");
    let err = source.read(&ReadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::SourceNotFound { .. }));
    assert_eq!(err.kind(), SkipKind::SourceNotFound);
}

#[test]
fn single_column_header_is_malformed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.csv");
    write(&path, "code\nCAS CS 131\n");
    let err = CsvSource::new(&path, "bad")
        .read(&ReadOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), SkipKind::MalformedSource);
}

#[test]
fn checksum_pin_is_enforced() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cas_all_courses.csv");
    write(&path, CAS);

    let good = CsvSource::new(&path, "cas").with_sha256(sha256_hex(CAS.as_bytes()).to_uppercase());
    assert!(good.read(&ReadOptions::default()).is_ok());

    let bad = CsvSource::new(&path, "cas").with_sha256("0".repeat(64));
    let err = bad.read(&ReadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::ChecksumMismatch { .. }));
}

#[test]
fn discovers_sources_by_suffix() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(&dir.path().join("khc_all_courses.csv"), CAS);
    write(&dir.path().join("cas_all_courses.csv"), CAS);
    write(&dir.path().join("filtered_courses.csv"), CAS);
    write(&dir.path().join("notes.txt"), "not a csv");

    let sources = discover_sources(dir.path(), "_all_courses").expect("discover");
    let tags: Vec<&str> = sources.iter().map(CourseSource::tag).collect();
    assert_eq!(tags, vec!["cas", "khc"]);
}

#[test]
fn discovery_in_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = discover_sources(&dir.path().join("nope"), "_all_courses").unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn table_source_uses_same_parser() {
    let source = TableSource::from_rows(
        "sha",
        &["code", "name", "Scientific Inquiry II", "Social Inquiry II"],
        &[&["SHA HF 100", "Hospitality", "1", "1"], &["0000", "junk", "1", "1"]],
    );
    assert_eq!(source.locator(), "table:sha");
    let read = source.read(&ReadOptions::default()).expect("read table");
    assert_eq!(read.records.len(), 1);
    assert_eq!(read.records[0].requirements.len(), 2);
    assert_eq!(read.skipped_rows, 1);
}
