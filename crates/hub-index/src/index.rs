//! The aggregation index and its build.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use hub_catalog::HubCatalog;
use hub_ingest::{CourseSource, ReadOptions};
use hub_model::{CourseRecord, Requirement, normalize};

use crate::error::{BuildError, Result};
use crate::report::{BuildReport, SkippedSource, SourceReport};

/// Course lookup tables merged from every readable source.
///
/// All keys are canonical codes (see [`hub_model::normalize`]) except the
/// values of `name_to_code`, which keep the identifier as first written.
/// The index is never mutated after [`AggregationIndex::build`] returns.
#[derive(Debug, Clone, Default)]
pub struct AggregationIndex {
    pub(crate) code_to_name: BTreeMap<String, String>,
    pub(crate) name_to_code: BTreeMap<String, String>,
    pub(crate) code_to_requirements: BTreeMap<String, Vec<Requirement>>,
    pub(crate) requirement_to_codes: BTreeMap<Requirement, BTreeSet<String>>,
    pub(crate) code_to_source_tag: BTreeMap<String, String>,
    report: BuildReport,
}

impl AggregationIndex {
    /// Reads every source in order and merges their records.
    ///
    /// A source that fails to read is skipped, logged, and recorded in the
    /// build report. The build fails only when no record was ingested at all.
    pub fn build<I>(sources: I, options: &ReadOptions) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: CourseSource,
    {
        let span = info_span!("build");
        let _guard = span.enter();
        let started = Instant::now();

        let mut index = Self::default();
        let mut report = BuildReport::default();

        for source in sources {
            let tag = source.tag().to_string();
            let locator = source.locator();
            let source_span = info_span!("source", tag = %tag);
            let _source_guard = source_span.enter();

            // Read fully before merging: a failing source contributes nothing.
            match source.read(options) {
                Ok(read) => {
                    debug!(
                        %locator,
                        records = read.records.len(),
                        skipped_rows = read.skipped_rows,
                        "merging source"
                    );
                    report.sources.push(SourceReport {
                        tag,
                        locator,
                        records: read.records.len(),
                        skipped_rows: read.skipped_rows,
                        dropped_columns: read.dropped_columns,
                    });
                    for record in read.records {
                        index.ingest(record);
                    }
                }
                Err(error) => {
                    let kind = error.kind();
                    warn!(%locator, %kind, %error, "skipping source");
                    report.skipped.push(SkippedSource {
                        tag,
                        locator,
                        kind,
                        reason: error.to_string(),
                    });
                }
            }
        }

        if report.records_read() == 0 {
            warn!(
                skipped = report.skipped.len(),
                "no course records ingested; index not initialized"
            );
            return Err(BuildError::EmptyIndex { report });
        }

        index.requirement_to_codes = transpose(&index.code_to_requirements);
        index.report = report;

        info!(
            courses = index.code_to_name.len(),
            requirements = index.requirement_to_codes.len(),
            sources_read = index.report.sources.len(),
            sources_skipped = index.report.skipped.len(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "course index built"
        );
        Ok(index)
    }

    /// Merges one record: first sighting seeds every table, later sightings
    /// only extend the requirement list.
    fn ingest(&mut self, record: CourseRecord) {
        let CourseRecord {
            identifier,
            display_name,
            requirements,
            source_tag,
        } = record;
        let code = normalize(&identifier);

        match self.code_to_requirements.entry(code.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(requirements);
                let name_key = normalize(&display_name);
                if !name_key.is_empty() {
                    self.name_to_code.entry(name_key).or_insert(identifier);
                }
                self.code_to_name.insert(code.clone(), display_name);
                self.code_to_source_tag.insert(code, source_tag);
            }
            Entry::Occupied(mut slot) => {
                let merged = slot.get_mut();
                for requirement in requirements {
                    if !merged.contains(&requirement) {
                        merged.push(requirement);
                    }
                }
            }
        }
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Number of distinct canonical codes.
    pub fn len(&self) -> usize {
        self.code_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_name.is_empty()
    }

    /// Requirements satisfied by at least one indexed course, sorted.
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirement_to_codes.keys()
    }

    /// Source tag of the first source that carried `code` (canonical form).
    pub fn source_tag(&self, code: &str) -> Option<&str> {
        self.code_to_source_tag.get(code).map(String::as_str)
    }
}

fn transpose(
    code_to_requirements: &BTreeMap<String, Vec<Requirement>>,
) -> BTreeMap<Requirement, BTreeSet<String>> {
    let mut out: BTreeMap<Requirement, BTreeSet<String>> = BTreeMap::new();
    for (code, requirements) in code_to_requirements {
        for requirement in requirements {
            out.entry(requirement.clone())
                .or_default()
                .insert(code.clone());
        }
    }
    out
}

/// Collects sources and row policy for one build.
pub struct IndexBuilder {
    options: ReadOptions,
    sources: Vec<Box<dyn CourseSource>>,
}

impl IndexBuilder {
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            sources: Vec::new(),
        }
    }

    /// Row policy and sources (manifest list, then discovery) of a catalog.
    pub fn from_catalog(catalog: &HubCatalog) -> Self {
        Self::new(catalog.read_options()).sources(catalog.resolve_sources())
    }

    #[must_use]
    pub fn source(mut self, source: impl CourseSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    #[must_use]
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: CourseSource + 'static,
    {
        self.sources
            .extend(sources.into_iter().map(|s| Box::new(s) as Box<dyn CourseSource>));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn build(&self) -> Result<AggregationIndex> {
        AggregationIndex::build(&self.sources, &self.options)
    }
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let locators: Vec<String> = self.sources.iter().map(|s| s.locator()).collect();
        f.debug_struct("IndexBuilder")
            .field("options", &self.options)
            .field("sources", &locators)
            .finish()
    }
}
