use thiserror::Error;

use crate::report::{BuildReport, SkippedSource};

/// Errors that abort an index build.
///
/// Per-source failures are not build errors: they are recorded in the
/// [`BuildReport`] and the build moves on to the next source.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(
        "index not initialized: no course records ingested ({} source(s) skipped)",
        .report.skipped.len()
    )]
    EmptyIndex { report: BuildReport },
}

impl BuildError {
    /// Sources left out of the failed build.
    pub fn skipped(&self) -> &[SkippedSource] {
        match self {
            Self::EmptyIndex { report } => &report.skipped,
        }
    }

    pub fn report(&self) -> &BuildReport {
        match self {
            Self::EmptyIndex { report } => report,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
