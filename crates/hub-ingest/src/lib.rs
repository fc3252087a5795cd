//! Course source ingestion.
//!
//! A course source is any table whose first two columns are the course code
//! and course name and whose remaining columns are hub requirements, with a
//! `1` cell marking that the course satisfies that requirement.
//!
//! # Features
//!
//! - **Sources**: [`CourseSource`] with a CSV file backend ([`CsvSource`]) and
//!   an in-memory backend ([`TableSource`]) sharing one row parser
//! - **Discovery**: find `<tag>_all_courses.csv` files in a directory
//! - **Checksums**: optional sha256 pinning of source files
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hub_ingest::{CourseSource, ReadOptions, discover_sources};
//!
//! for source in discover_sources(Path::new("data"), "_all_courses")? {
//!     let read = source.read(&ReadOptions::default())?;
//!     println!("{}: {} courses", source.tag(), read.records.len());
//! }
//! ```

#![deny(unsafe_code)]

mod csv_source;
mod discovery;
mod error;
mod hash;
mod source;
mod table;

// === Error Types ===
pub use error::{IngestError, Result, SkipKind};

// === Sources ===
pub use csv_source::CsvSource;
pub use source::{CourseSource, TableSource};

// === Row Parsing ===
pub use table::{RawTable, ReadOptions, SourceRead, parse_table};

// === Discovery ===
pub use discovery::{DEFAULT_SOURCE_SUFFIX, derive_tag, discover_sources, list_csv_files};

// === Checksums ===
pub use hash::sha256_hex;
