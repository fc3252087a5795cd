//! Hub requirement catalog and course source manifest.
//!
//! A catalog is a TOML manifest naming the closed set of hub requirements,
//! the progress targets built on them, the ordered list of course sources and
//! the row policy applied while reading them. The Boston University Hub
//! catalog is embedded and used when no manifest is given.

#![deny(unsafe_code)]

pub mod catalog;
pub mod embedded;
pub mod error;
pub mod manifest;

pub use crate::catalog::{CatalogRequirement, HubCatalog, ProgressTarget, tag_for_path};
pub use crate::error::{CatalogError, Result};
pub use crate::manifest::{Discovery, Manifest, Policy, SourceEntry};
