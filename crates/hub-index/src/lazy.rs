use std::sync::OnceLock;

use tracing::debug;

use crate::error::BuildError;
use crate::index::{AggregationIndex, IndexBuilder};

/// An index built on first access, at most once.
///
/// Concurrent first callers block until the single build finishes; every
/// later call is a plain read. A failed build is kept as well and the index
/// stays "not initialized" until a new `LazyIndex` is made.
#[derive(Debug)]
pub struct LazyIndex {
    builder: IndexBuilder,
    cell: OnceLock<Result<AggregationIndex, BuildError>>,
}

impl LazyIndex {
    pub fn new(builder: IndexBuilder) -> Self {
        Self {
            builder,
            cell: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Result<&AggregationIndex, &BuildError> {
        self.cell
            .get_or_init(|| {
                debug!(sources = self.builder.source_count(), "building index on first access");
                self.builder.build()
            })
            .as_ref()
    }

    /// True once a build has completed successfully. Never triggers a build.
    pub fn is_ready(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}
