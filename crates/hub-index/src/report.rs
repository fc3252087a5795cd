#![deny(unsafe_code)]

use serde::Serialize;

use hub_catalog::{HubCatalog, Policy};
use hub_ingest::SkipKind;

use crate::error::BuildError;
use crate::index::AggregationIndex;

pub const DOCTOR_SCHEMA: &str = "hub-resolver.doctor";
pub const DOCTOR_SCHEMA_VERSION: u32 = 1;

/// Per-source outcome of an index build, in build order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub sources: Vec<SourceReport>,
    pub skipped: Vec<SkippedSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub tag: String,
    pub locator: String,
    pub records: usize,
    pub skipped_rows: usize,
    pub dropped_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    pub tag: String,
    pub locator: String,
    pub kind: SkipKind,
    pub reason: String,
}

impl BuildReport {
    pub fn records_read(&self) -> usize {
        self.sources.iter().map(|s| s.records).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStatus {
    Ready,
    NotInitialized,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub status: IndexStatus,
    pub policy: Policy,
    pub counts: DoctorCounts,
    pub sources: Vec<SourceReport>,
    pub skipped: Vec<SkippedSource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorCounts {
    pub sources_read: usize,
    pub sources_skipped: usize,
    pub records_read: usize,
    pub courses: usize,
    pub requirements_in_use: usize,
    pub catalog_requirements: usize,
    pub targets: usize,
}

impl DoctorReport {
    pub fn from_build(
        build: std::result::Result<&AggregationIndex, &BuildError>,
        catalog: &HubCatalog,
    ) -> Self {
        let (status, report, courses, requirements_in_use) = match build {
            Ok(index) => (
                IndexStatus::Ready,
                index.report(),
                index.len(),
                index.requirements().count(),
            ),
            Err(error) => (IndexStatus::NotInitialized, error.report(), 0, 0),
        };
        Self {
            schema: DOCTOR_SCHEMA.to_string(),
            schema_version: DOCTOR_SCHEMA_VERSION,
            status,
            policy: catalog.policy.clone(),
            counts: DoctorCounts {
                sources_read: report.sources.len(),
                sources_skipped: report.skipped.len(),
                records_read: report.records_read(),
                courses,
                requirements_in_use,
                catalog_requirements: catalog.requirements.len(),
                targets: catalog.targets.len(),
            },
            sources: report.sources.clone(),
            skipped: report.skipped.clone(),
        }
    }
}
