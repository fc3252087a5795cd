//! Source file discovery.

use std::path::{Path, PathBuf};

use crate::csv_source::CsvSource;
use crate::error::{IngestError, Result};

/// File-stem suffix of per-school course exports (`cas_all_courses.csv`).
pub const DEFAULT_SOURCE_SUFFIX: &str = "_all_courses";

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Derives a source tag from a file stem: `"CAS_all_courses"` -> `"cas"`.
///
/// Returns `None` when the stem does not end with `suffix` or nothing is
/// left before it.
pub fn derive_tag(stem: &str, suffix: &str) -> Option<String> {
    let stem = stem.to_ascii_lowercase();
    let suffix = suffix.to_ascii_lowercase();
    let tag = stem.strip_suffix(&suffix)?;
    let tag = tag.trim_matches(|c: char| c == '_' || c == '-' || c.is_whitespace());
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

/// Finds every `<tag><suffix>.csv` file in `dir`, sorted by filename.
pub fn discover_sources(dir: &Path, suffix: &str) -> Result<Vec<CsvSource>> {
    let mut sources = Vec::new();
    for path in list_csv_files(dir)? {
        let stem = path
            .file_stem()
            .and_then(|v| v.to_str())
            .unwrap_or("")
            .to_string();
        if let Some(tag) = derive_tag(&stem, suffix) {
            sources.push(CsvSource::new(path, tag));
        }
    }
    Ok(sources)
}
