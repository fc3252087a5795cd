//! Catalog data embedded at compile time.

/// Boston University Hub catalog (21 requirements, 20 progress targets).
pub const BU_HUB_CATALOG: &str = include_str!("../data/bu_hub.toml");

/// Schema identifier every catalog manifest must declare.
pub const CATALOG_SCHEMA: &str = "hub-resolver.catalog";

/// Supported manifest schema version.
pub const CATALOG_SCHEMA_VERSION: u32 = 1;
