use serde::{Deserialize, Serialize};

use hub_ingest::DEFAULT_SOURCE_SUFFIX;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub requirements: Vec<RequirementEntry>,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    #[serde(default)]
    pub discovery: Option<Discovery>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Skip course rows whose code starts with `0`.
    #[serde(default = "default_true")]
    pub skip_zero_prefixed: bool,
    /// Drop source columns that are not catalog requirements.
    #[serde(default = "default_true")]
    pub reject_unknown_columns: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            skip_zero_prefixed: true,
            reject_unknown_columns: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntry {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_required")]
    pub required: u32,
    #[serde(default)]
    pub satisfied_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Path relative to the manifest directory, `/`-separated.
    pub path: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    pub dir: String,
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_true() -> bool {
    true
}

fn default_required() -> u32 {
    1
}

fn default_suffix() -> String {
    DEFAULT_SOURCE_SUFFIX.to_string()
}
