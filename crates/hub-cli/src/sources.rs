//! Catalog and source selection from command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use hub_catalog::{HubCatalog, tag_for_path};
use hub_index::IndexBuilder;
use hub_ingest::{CsvSource, discover_sources};

/// Sources named on the command line.
///
/// When any are given they replace the sources listed by the catalog.
#[derive(Debug, Clone, Default)]
pub struct SourceSelection {
    pub sources: Vec<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub suffix: String,
}

impl SourceSelection {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.source_dir.is_none()
    }

    /// Explicit files first, in the order given, then the directory scan.
    pub fn resolve(&self) -> Result<Vec<CsvSource>> {
        let mut sources: Vec<CsvSource> = self
            .sources
            .iter()
            .map(|path| CsvSource::new(path, tag_for_path(path)))
            .collect();
        if let Some(dir) = &self.source_dir {
            let found = discover_sources(dir, &self.suffix)
                .with_context(|| format!("scan source directory {}", dir.display()))?;
            debug!(dir = %dir.display(), found = found.len(), "discovered course sources");
            sources.extend(
                found
                    .into_iter()
                    .filter(|s| !self.sources.iter().any(|p| p == s.path())),
            );
        }
        Ok(sources)
    }
}

/// Loads the catalog at `path`, or the embedded one.
pub fn load_catalog(path: Option<&Path>) -> Result<HubCatalog> {
    match path {
        Some(path) => {
            HubCatalog::load(path).with_context(|| format!("load catalog {}", path.display()))
        }
        None => HubCatalog::embedded().context("load embedded catalog"),
    }
}

/// Builder for the index the commands query.
pub fn index_builder(catalog: &HubCatalog, selection: &SourceSelection) -> Result<IndexBuilder> {
    let builder = if selection.is_empty() {
        IndexBuilder::from_catalog(catalog)
    } else {
        IndexBuilder::new(catalog.read_options()).sources(selection.resolve()?)
    };
    if builder.source_count() == 0 {
        bail!(
            "no course sources configured: pass --source, --source-dir, or a catalog that lists sources"
        );
    }
    Ok(builder)
}
