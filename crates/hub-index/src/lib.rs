//! Course aggregation index for hub requirement lookups.
//!
//! The index merges course records from any number of sources (see
//! `hub_ingest`) into bidirectional code/name tables and per-requirement
//! course sets, then answers lookups without further locking.
//!
//! - [`AggregationIndex::build`] / [`IndexBuilder`]: one build pass; failing
//!   sources are skipped and listed in the [`BuildReport`]
//! - query methods on [`AggregationIndex`]: single and bulk lookup, reverse
//!   lookup by requirement, listings, progress and recommendations
//! - [`LazyIndex`]: build on first access behind a one-time barrier
//! - [`DoctorReport`]: machine-readable build diagnostics

#![deny(unsafe_code)]

pub mod error;
pub mod index;
pub mod lazy;
pub mod progress;
pub mod query;
pub mod recommend;
pub mod report;

pub use error::{BuildError, Result};
pub use index::{AggregationIndex, IndexBuilder};
pub use lazy::LazyIndex;
pub use progress::{CategoryProgress, HubProgress, TargetProgress};
pub use query::{BulkLookup, CourseLookup, RequirementMatch};
pub use recommend::{DEFAULT_RECOMMENDATION_LIMIT, RecommendOptions, Recommendation};
pub use report::{BuildReport, DoctorReport, IndexStatus, SkippedSource, SourceReport};
