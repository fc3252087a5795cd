//! Error types for course source ingestion.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while reading a course source.
///
/// Every variant is scoped to one source: a failed source is skipped by the
/// index build and the remaining sources are still read.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Locator Errors ===
    /// The locator does not resolve to any data.
    #[error("source not found: {locator}")]
    SourceNotFound { locator: String },

    /// The locator resolved but could not be read.
    #[error("failed to read source {locator}: {source}")]
    Unreadable {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// Source discovery directory is missing.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to list a discovery directory.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Content Errors ===
    /// The header is structurally invalid or a record could not be decoded.
    #[error("malformed source {locator}: {reason}")]
    MalformedSource { locator: String, reason: String },

    /// The source bytes do not match the pinned sha256.
    #[error("sha256 mismatch for {locator} (expected {expected}, got {actual})")]
    ChecksumMismatch {
        locator: String,
        expected: String,
        actual: String,
    },
}

impl IngestError {
    pub(crate) fn malformed(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Classifies this failure for build diagnostics.
    pub fn kind(&self) -> SkipKind {
        match self {
            Self::SourceNotFound { .. }
            | Self::Unreadable { .. }
            | Self::DirectoryNotFound { .. }
            | Self::DirectoryRead { .. } => SkipKind::SourceNotFound,
            Self::MalformedSource { .. } | Self::ChecksumMismatch { .. } => {
                SkipKind::MalformedSource
            }
        }
    }
}

/// Why a source was left out of an index build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SkipKind {
    /// The locator did not resolve to readable data.
    SourceNotFound,
    /// The data was readable but structurally invalid.
    MalformedSource,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound => f.write_str("SourceNotFound"),
            Self::MalformedSource => f.write_str("MalformedSource"),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
