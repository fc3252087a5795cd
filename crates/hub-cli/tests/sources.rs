use std::fs;

use hub_cli::sources::{SourceSelection, index_builder, load_catalog};
use hub_ingest::{CourseSource, DEFAULT_SOURCE_SUFFIX};

const CAS: &str = "code,name,Quantitative Reasoning I,Ethical Reasoning\n\
CAS CS 131,Combinatoric Structures,1,0\n";

#[test]
fn explicit_sources_come_before_discovered_ones() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cas = dir.path().join("cas_all_courses.csv");
    fs::write(&cas, CAS).expect("cas");
    fs::write(dir.path().join("khc_all_courses.csv"), CAS).expect("khc");
    let extra = dir.path().join("Extra Courses.csv");
    fs::write(&extra, CAS).expect("extra");

    let selection = SourceSelection {
        sources: vec![extra, cas],
        source_dir: Some(dir.path().to_path_buf()),
        suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
    };
    let sources = selection.resolve().expect("resolve");
    let tags: Vec<&str> = sources.iter().map(CourseSource::tag).collect();
    assert_eq!(tags, vec!["extra courses", "cas", "khc"]);
}

#[test]
fn missing_source_dir_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let selection = SourceSelection {
        sources: Vec::new(),
        source_dir: Some(dir.path().join("missing")),
        suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
    };
    let err = selection.resolve().unwrap_err();
    assert!(format!("{err:#}").contains("directory not found"));
}

#[test]
fn embedded_catalog_without_sources_is_rejected() {
    let catalog = load_catalog(None).expect("embedded catalog");
    let err = index_builder(&catalog, &SourceSelection::default()).unwrap_err();
    assert!(err.to_string().contains("no course sources configured"));
}

#[test]
fn command_line_sources_build_an_index() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("cas_all_courses.csv"), CAS).expect("cas");
    let catalog = load_catalog(None).expect("embedded catalog");
    let selection = SourceSelection {
        source_dir: Some(dir.path().to_path_buf()),
        suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
        ..SourceSelection::default()
    };
    let index = index_builder(&catalog, &selection)
        .expect("builder")
        .build()
        .expect("index");
    assert_eq!(index.resolve_identifier("combinatoric structures").as_deref(), Some("CAS CS 131"));
}

#[test]
fn catalog_file_lists_sources() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("cas_all_courses.csv"), CAS).expect("cas");
    let manifest = dir.path().join("catalog.toml");
    fs::write(
        &manifest,
        r#"
[manifest]
schema = "hub-resolver.catalog"
schema_version = 1

[[requirements]]
name = "Quantitative Reasoning I"

[[requirements]]
name = "Ethical Reasoning"

[[sources]]
path = "cas_all_courses.csv"
"#,
    )
    .expect("manifest");

    let catalog = load_catalog(Some(&manifest)).expect("catalog");
    let index = index_builder(&catalog, &SourceSelection::default())
        .expect("builder")
        .build()
        .expect("index");
    assert_eq!(index.len(), 1);
    assert_eq!(index.source_tag("CAS CS 131"), Some("cas"));
}
