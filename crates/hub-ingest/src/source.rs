use crate::error::Result;
use crate::table::{RawTable, ReadOptions, SourceRead, parse_table};

/// A readable course table.
///
/// Implementations resolve their locator (a file path, a table name, ...)
/// and hand the rows to [`parse_table`]. A source is read at most once per
/// index build and must either return all of its records or an error.
pub trait CourseSource: Send + Sync {
    /// Tag recorded on every record from this source.
    fn tag(&self) -> &str;

    /// Human-readable locator used in diagnostics.
    fn locator(&self) -> String;

    fn read(&self, options: &ReadOptions) -> Result<SourceRead>;
}

impl<T: CourseSource + ?Sized> CourseSource for &T {
    fn tag(&self) -> &str {
        (**self).tag()
    }

    fn locator(&self) -> String {
        (**self).locator()
    }

    fn read(&self, options: &ReadOptions) -> Result<SourceRead> {
        (**self).read(options)
    }
}

impl<T: CourseSource + ?Sized> CourseSource for Box<T> {
    fn tag(&self) -> &str {
        (**self).tag()
    }

    fn locator(&self) -> String {
        (**self).locator()
    }

    fn read(&self, options: &ReadOptions) -> Result<SourceRead> {
        (**self).read(options)
    }
}

/// A course table held in memory.
///
/// Used for rows that already came out of another store (a database query,
/// a scraper run) and for tests.
#[derive(Debug, Clone)]
pub struct TableSource {
    tag: String,
    name: String,
    table: RawTable,
}

impl TableSource {
    pub fn new(tag: impl Into<String>, table: RawTable) -> Self {
        let tag = tag.into();
        Self {
            name: format!("table:{tag}"),
            tag,
            table,
        }
    }

    /// Builds a source from string slices, mostly for fixtures.
    pub fn from_rows(tag: impl Into<String>, headers: &[&str], rows: &[&[&str]]) -> Self {
        let table = RawTable::new(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        );
        Self::new(tag, table)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl CourseSource for TableSource {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn locator(&self) -> String {
        self.name.clone()
    }

    fn read(&self, options: &ReadOptions) -> Result<SourceRead> {
        parse_table(&self.tag, &self.name, &self.table, options)
    }
}
