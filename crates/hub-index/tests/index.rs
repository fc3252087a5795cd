use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use hub_catalog::HubCatalog;
use hub_index::{AggregationIndex, BuildError, IndexBuilder, RecommendOptions};
use hub_ingest::{CsvSource, ReadOptions, SkipKind, TableSource};
use hub_model::Requirement;
use proptest::prelude::*;

const HEADER: &str = "code,name,Quantitative Reasoning I,Ethical Reasoning";

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write file");
}

fn names(requirements: &[Requirement]) -> Vec<&str> {
    requirements.iter().map(Requirement::as_str).collect()
}

fn scenario_index() -> AggregationIndex {
    let source = TableSource::from_rows(
        "cas",
        &["code", "name", "Quantitative Reasoning I", "Ethical Reasoning"],
        &[&["CAS CS 131", "Combinatoric Structures", "1", "0"]],
    );
    AggregationIndex::build([source], &ReadOptions::default()).expect("build")
}

#[test]
fn resolves_by_name_and_by_code() {
    let index = scenario_index();
    assert_eq!(
        index.resolve_identifier("Combinatoric Structures").as_deref(),
        Some("CAS CS 131")
    );
    assert_eq!(
        index.resolve_identifier("cas cs 131"),
        index.resolve_identifier("CAS CS 131")
    );
    assert_eq!(names(&index.requirements_for("cas cs 131")), vec!["Quantitative Reasoning I"]);
    assert!(index.requirements_for("CAS CS 999").is_empty());
    assert_eq!(index.course_name("  combinatoric structures "), Some("Combinatoric Structures"));
}

#[test]
fn bulk_lookup_keeps_order_and_unions_requirements() {
    let index = scenario_index();
    let bulk = index.requirements_for_many(["CAS CS 131", "nonexistent"]);
    assert_eq!(bulk.results.len(), 2);

    let hit = &bulk.results[0];
    assert!(hit.found);
    assert_eq!(hit.input, "CAS CS 131");
    assert_eq!(hit.resolved_code.as_deref(), Some("CAS CS 131"));
    assert_eq!(names(&hit.requirements), vec!["Quantitative Reasoning I"]);
    assert_eq!(hit.source_tag.as_deref(), Some("cas"));

    let miss = &bulk.results[1];
    assert!(!miss.found);
    assert_eq!(miss.input, "nonexistent");
    assert_eq!(miss.resolved_code, None);
    assert!(miss.requirements.is_empty());
    assert_eq!(miss.source_tag, None);

    let union: Vec<&str> = bulk.unique_requirements.iter().map(Requirement::as_str).collect();
    assert_eq!(union, vec!["Quantitative Reasoning I"]);
}

#[test]
fn bulk_lookup_keeps_duplicates() {
    let index = scenario_index();
    let bulk = index.requirements_for_many(vec!["cas cs 131".to_string(), "CAS CS 131".to_string()]);
    assert_eq!(bulk.results.len(), 2);
    assert!(bulk.results.iter().all(|r| r.found));
}

#[test]
fn later_sources_extend_requirements_but_not_names() {
    let a = TableSource::from_rows(
        "a",
        &["code", "name", "Quantitative Reasoning I"],
        &[&["CAS CS 131", "Foo", "1"]],
    );
    let b = TableSource::from_rows(
        "b",
        &["code", "name", "Quantitative Reasoning I", "Critical Thinking"],
        &[&["CAS CS 131", "Bar", "0", "1"]],
    );

    let alone = AggregationIndex::build([a.clone()], &ReadOptions::default()).expect("a");
    let merged = AggregationIndex::build([a, b], &ReadOptions::default()).expect("a+b");

    let before: BTreeSet<Requirement> = alone.requirements_for("CAS CS 131").into_iter().collect();
    let after: BTreeSet<Requirement> = merged.requirements_for("CAS CS 131").into_iter().collect();
    assert!(after.is_superset(&before));
    assert!(after.iter().any(|r| r.as_str() == "Critical Thinking"));

    assert_eq!(merged.all_courses()["CAS CS 131"], "Foo");
    assert_eq!(merged.resolve_identifier("Bar"), None);
    assert_eq!(merged.source_tag("CAS CS 131"), Some("a"));
    assert_eq!(merged.courses_for("Critical Thinking"), vec!["CAS CS 131"]);
}

#[test]
fn missing_source_is_skipped_and_valid_sources_are_merged() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cas = dir.path().join("cas_all_courses.csv");
    let khc = dir.path().join("khc_all_courses.csv");
    write(&cas, &format!("{HEADER}\nCAS CS 131,Combinatoric Structures,1,0\n"));
    write(&khc, &format!("{HEADER}\nKHC RH 101,Rhetoric,0,1\n"));

    let sources = vec![
        CsvSource::new(&cas, "cas"),
        CsvSource::new(dir.path().join("gone_all_courses.csv"), "gone"),
        CsvSource::new(&khc, "khc"),
    ];
    let index = AggregationIndex::build(&sources, &ReadOptions::default()).expect("build");

    let codes: Vec<String> = index.all_courses().into_keys().collect();
    assert_eq!(codes, vec!["CAS CS 131", "KHC RH 101"]);

    let report = index.report();
    assert_eq!(report.sources.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].tag, "gone");
    assert_eq!(report.skipped[0].kind, SkipKind::SourceNotFound);
}

#[test]
fn malformed_source_is_skipped() {
    let bad = TableSource::from_rows("bad", &["code"], &[&["CAS CS 131"]]);
    let good = TableSource::from_rows(
        "good",
        &["code", "name", "Ethical Reasoning"],
        &[&["CAS PH 150", "Introduction to Ethics", "1"]],
    );
    let index = IndexBuilder::new(ReadOptions::default())
        .source(bad)
        .source(good)
        .build()
        .expect("build");
    assert_eq!(index.len(), 1);
    assert_eq!(index.report().skipped[0].kind, SkipKind::MalformedSource);
}

#[test]
fn all_sources_missing_is_empty_index() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sources = vec![
        CsvSource::new(dir.path().join("a.csv"), "a"),
        CsvSource::new(dir.path().join("b.csv"), "b"),
    ];
    let err = AggregationIndex::build(&sources, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, BuildError::EmptyIndex { .. }));
    assert_eq!(err.skipped().len(), 2);
    assert!(err.to_string().starts_with("index not initialized"));
}

#[test]
fn sources_with_only_headers_are_an_empty_index() {
    let empty = TableSource::from_rows("empty", &["code", "name", "Ethical Reasoning"], &[]);
    let err = AggregationIndex::build([empty], &ReadOptions::default()).unwrap_err();
    assert!(err.skipped().is_empty());
    assert_eq!(err.report().sources.len(), 1);
}

#[test]
fn catalog_drives_progress_and_recommendations() {
    let catalog = HubCatalog::embedded().expect("catalog");
    let source = TableSource::from_rows(
        "cas",
        &[
            "code",
            "name",
            "Quantitative Reasoning I",
            "Critical Thinking",
            "Social Inquiry II",
            "Ethical Reasoning",
        ],
        &[
            &["CAS CS 131", "Combinatoric Structures", "1", "1", "0", "0"],
            &["CAS PH 150", "Introduction to Ethics", "0", "1", "0", "1"],
            &["CAS EC 101", "Introductory Microeconomics", "1", "1", "1", "0"],
            &["CAS MA 123", "Calculus I", "1", "0", "0", "0"],
        ],
    );
    let index = AggregationIndex::build([source], &catalog.read_options()).expect("build");

    let progress = index.progress(["cas cs 131", "Combinatoric Structures", "CAS XX 000"], &catalog);
    assert_eq!(progress.courses, vec!["CAS CS 131"]);
    assert_eq!(progress.unresolved, vec!["CAS XX 000"]);

    let qr = progress
        .targets
        .iter()
        .find(|t| t.name == "Quantitative Reasoning I")
        .expect("qr target");
    assert!(qr.fulfilled);
    let ct = progress
        .targets
        .iter()
        .find(|t| t.name == "Critical Thinking")
        .expect("ct target");
    assert_eq!((ct.current, ct.required, ct.fulfilled), (1, 2, false));

    let toolkit = progress
        .categories
        .iter()
        .find(|c| c.category == "Intellectual Toolkit")
        .expect("toolkit");
    assert_eq!((toolkit.current, toolkit.required, toolkit.percent), (1, 8, 13));
    assert_eq!(toolkit.fulfilled, 0);

    let picks = index.recommend(["CAS CS 131"], &catalog, &RecommendOptions::default());
    let codes: Vec<&str> = picks.iter().map(|p| p.code.as_str()).collect();
    // EC 101 advances Critical Thinking and the combined Inquiry II slot;
    // MA 123 only advances the already fulfilled QR I target.
    assert_eq!(codes, vec!["CAS EC 101", "CAS PH 150"]);
    assert_eq!(picks[0].score, 2);
    assert_eq!(
        picks[0].advances,
        vec!["Scientific Inquiry II or Social Inquiry II", "Critical Thinking"]
    );

    let limited = index.recommend(
        ["CAS CS 131"],
        &catalog,
        &RecommendOptions {
            limit: 1,
            department: Some("ph".to_string()),
        },
    );
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].code, "CAS PH 150");
}

fn code_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["CAS CS 131", "CAS MA 123", "KHC RH 101", "SHA HF 100", "QST FE 101"]),
        any::<bool>(),
    )
        .prop_map(|(code, lower)| if lower { code.to_lowercase() } else { code.to_string() })
}

fn table_strategy() -> impl Strategy<Value = Vec<(String, String, [bool; 3])>> {
    prop::collection::vec(
        (code_strategy(), "[A-Za-z ]{0,12}", any::<[bool; 3]>()),
        0..8,
    )
}

proptest! {
    #[test]
    fn requirement_sets_are_exact_transposes(tables in prop::collection::vec(table_strategy(), 1..4)) {
        let headers = ["code", "name", "Quantitative Reasoning I", "Ethical Reasoning", "Critical Thinking"];
        let sources: Vec<TableSource> = tables
            .iter()
            .enumerate()
            .map(|(i, rows)| {
                let rows: Vec<Vec<&str>> = rows
                    .iter()
                    .map(|(code, name, flags)| {
                        let mut row = vec![code.as_str(), name.as_str()];
                        row.extend(flags.iter().map(|f| if *f { "1" } else { "0" }));
                        row
                    })
                    .collect();
                let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
                TableSource::from_rows(format!("s{i}"), &headers, &rows)
            })
            .collect();

        let total_rows: usize = tables.iter().map(Vec::len).sum();
        let result = AggregationIndex::build(&sources, &ReadOptions::default());
        if total_rows == 0 {
            prop_assert!(result.is_err());
            return Ok(());
        }
        let index = result.expect("non-empty build");

        for code in index.all_courses().keys() {
            let requirements = index.requirements_for(code);
            for requirement in &requirements {
                prop_assert!(index.courses_for(requirement.as_str()).contains(code));
            }
            for requirement in index.requirements() {
                let listed = index.courses_for(requirement.as_str()).contains(code);
                prop_assert_eq!(listed, requirements.contains(requirement));
            }
        }
    }

    #[test]
    fn lookups_ignore_case_and_padding(code in code_strategy(), pad in "[ \t]{0,3}") {
        let source = TableSource::from_rows(
            "t",
            &["code", "name", "Ethical Reasoning"],
            &[&[code.as_str(), "Some Course", "1"]],
        );
        let index = AggregationIndex::build([source], &ReadOptions::default()).expect("build");
        let padded = format!("{pad}{}{pad}", code.to_lowercase());
        prop_assert_eq!(index.resolve_identifier(&padded), Some(code.to_uppercase()));
        prop_assert_eq!(index.requirements_for(&padded).len(), 1);
    }
}
