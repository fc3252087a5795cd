//! CSV file backend.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::hash::sha256_hex;
use crate::source::CourseSource;
use crate::table::{RawTable, ReadOptions, SourceRead, parse_table};

/// A course table stored as a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    tag: String,
    sha256: Option<String>,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag: tag.into(),
            sha256: None,
        }
    }

    /// Pins the expected sha256 of the file contents.
    #[must_use]
    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = Some(sha256.into().to_ascii_lowercase());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::SourceNotFound {
                    locator: self.locator(),
                }
            } else {
                IngestError::Unreadable {
                    locator: self.locator(),
                    source: e,
                }
            }
        })
    }

    fn verify(&self, bytes: &[u8]) -> Result<()> {
        let Some(expected) = &self.sha256 else {
            return Ok(());
        };
        let actual = sha256_hex(bytes);
        if &actual != expected {
            return Err(IngestError::ChecksumMismatch {
                locator: self.locator(),
                expected: expected.clone(),
                actual,
            });
        }
        Ok(())
    }
}

impl CourseSource for CsvSource {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn locator(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self, options: &ReadOptions) -> Result<SourceRead> {
        let bytes = self.read_bytes()?;
        self.verify(&bytes)?;
        let table = read_raw_table(&bytes, &self.locator())?;
        debug!(
            source_tag = %self.tag,
            path = %self.path.display(),
            rows = table.rows.len(),
            "read csv source"
        );
        parse_table(&self.tag, &self.locator(), &table, options)
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Code and name columns are trimmed; requirement cells are kept verbatim.
fn data_row(record: &csv::StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(idx, cell)| if idx < 2 { cell.trim().to_string() } else { cell.to_string() })
        .collect()
}

/// Splits CSV bytes into a header row and data rows.
///
/// Records may have any width; fully blank records are dropped.
fn read_raw_table(bytes: &[u8], locator: &str) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| IngestError::malformed(locator, e.to_string()))?
            .iter()
            .map(normalize_cell)
            .collect(),
        None => return Err(IngestError::malformed(locator, "missing header row")),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| IngestError::malformed(locator, e.to_string()))?;
        let row = data_row(&record);
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(RawTable::new(headers, rows))
}
