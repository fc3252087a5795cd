//! Row parsing shared by every source backend.

use std::collections::BTreeSet;

use hub_model::{CourseRecord, Requirement};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Cell value marking that a course satisfies a requirement column. Compared
/// exactly: `" 1 "`, `"1.0"` and `"yes"` do not count.
const SATISFIED: &str = "1";

/// A header row plus data rows, before interpretation.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

/// Row-level policy applied while reading a source.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Skip rows whose code starts with `0`.
    ///
    /// Upstream course exports contain garbage rows of this shape; the guard
    /// is on by default and can be switched off per catalog.
    pub skip_zero_prefixed: bool,
    /// When set, requirement columns whose header is not in this set are
    /// dropped instead of being treated as requirements.
    pub known_requirements: Option<BTreeSet<String>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_zero_prefixed: true,
            known_requirements: None,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn with_skip_zero_prefixed(mut self, enable: bool) -> Self {
        self.skip_zero_prefixed = enable;
        self
    }

    #[must_use]
    pub fn with_known_requirements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_requirements = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Outcome of reading one source.
#[derive(Debug, Clone, Default)]
pub struct SourceRead {
    pub records: Vec<CourseRecord>,
    /// Rows dropped by the empty-code or zero-prefix guards.
    pub skipped_rows: usize,
    /// Requirement columns that were not usable (blank or unknown header).
    pub dropped_columns: Vec<String>,
}

/// Interprets a raw table as course records.
///
/// Column 0 is the course code, column 1 the course name, every further
/// column a requirement. Rows shorter than the header are padded with
/// "not satisfied".
pub fn parse_table(
    tag: &str,
    locator: &str,
    table: &RawTable,
    options: &ReadOptions,
) -> Result<SourceRead> {
    if table.headers.len() < 2 {
        return Err(IngestError::malformed(
            locator,
            format!(
                "header needs at least a code and a name column, found {} column(s)",
                table.headers.len()
            ),
        ));
    }

    let mut dropped_columns = Vec::new();
    let mut columns: Vec<(usize, Requirement)> = Vec::new();
    for (idx, header) in table.headers.iter().enumerate().skip(2) {
        let known = options
            .known_requirements
            .as_ref()
            .is_none_or(|known| known.contains(header.trim()));
        match Requirement::new(header.as_str()) {
            Ok(requirement) if known => columns.push((idx, requirement)),
            _ => {
                warn!(source_tag = %tag, column = %header, "dropping requirement column");
                dropped_columns.push(header.clone());
            }
        }
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped_rows = 0usize;
    for row in &table.rows {
        let identifier = row.first().map(|v| v.trim()).unwrap_or("");
        if identifier.is_empty() || (options.skip_zero_prefixed && identifier.starts_with('0')) {
            skipped_rows += 1;
            continue;
        }
        let name = row.get(1).map(String::as_str).unwrap_or("");
        let mut record = CourseRecord::new(identifier, name, tag);
        for (idx, requirement) in &columns {
            let satisfied = row
                .get(*idx)
                .is_some_and(|cell| cell == SATISFIED);
            if satisfied {
                record.push_requirement(requirement.clone());
            }
        }
        records.push(record);
    }

    debug!(
        source_tag = %tag,
        records = records.len(),
        skipped_rows,
        requirement_columns = columns.len(),
        "parsed source table"
    );

    Ok(SourceRead {
        records,
        skipped_rows,
        dropped_columns,
    })
}
