use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use hub_ingest::{CsvSource, ReadOptions, derive_tag, discover_sources};
use hub_model::Requirement;

use crate::embedded::{BU_HUB_CATALOG, CATALOG_SCHEMA, CATALOG_SCHEMA_VERSION};
use crate::error::{CatalogError, Result};
use crate::manifest::{Discovery, Manifest, Policy, SourceEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRequirement {
    pub requirement: Requirement,
    pub category: Option<String>,
}

/// A graduation target: `required` courses satisfying any of `satisfied_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressTarget {
    pub name: String,
    pub category: Option<String>,
    pub required: u32,
    pub satisfied_by: Vec<Requirement>,
}

impl ProgressTarget {
    /// True when a course with these requirements advances this target.
    pub fn is_advanced_by(&self, requirements: &[Requirement]) -> bool {
        self.satisfied_by.iter().any(|r| requirements.contains(r))
    }
}

/// A validated catalog manifest.
#[derive(Debug, Clone)]
pub struct HubCatalog {
    pub policy: Policy,
    pub requirements: Vec<CatalogRequirement>,
    pub targets: Vec<ProgressTarget>,
    pub sources: Vec<SourceEntry>,
    pub discovery: Option<Discovery>,
    /// Directory relative source paths are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl HubCatalog {
    /// Loads and validates a manifest file; sources resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let manifest: Manifest = toml::from_str(&contents).map_err(|e| CatalogError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf);
        Self::from_manifest(manifest, base_dir)
    }

    /// Parses a manifest held in memory.
    pub fn from_toml_str(contents: &str, base_dir: Option<&Path>) -> Result<Self> {
        let manifest: Manifest = toml::from_str(contents).map_err(|e| CatalogError::Toml {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
        Self::from_manifest(manifest, base_dir.map(Path::to_path_buf))
    }

    /// The embedded Boston University Hub catalog. It lists no sources.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(BU_HUB_CATALOG, None)
    }

    pub fn from_manifest(manifest: Manifest, base_dir: Option<PathBuf>) -> Result<Self> {
        validate_header(&manifest)?;
        let requirements = build_requirements(&manifest)?;
        let known: BTreeSet<&str> = requirements
            .iter()
            .map(|r| r.requirement.as_str())
            .collect();
        let targets = build_targets(&manifest, &known)?;

        for source in &manifest.sources {
            validate_path(&source.path)?;
            if let Some(sha) = &source.sha256 {
                validate_sha(sha, &source.path)?;
            }
        }
        if let Some(discovery) = &manifest.discovery {
            validate_path(&discovery.dir)?;
        }

        debug!(
            requirements = requirements.len(),
            targets = targets.len(),
            sources = manifest.sources.len(),
            "loaded hub catalog"
        );

        Ok(Self {
            policy: manifest.policy,
            requirements,
            targets,
            sources: manifest.sources,
            discovery: manifest.discovery,
            base_dir,
        })
    }

    pub fn requirement_names(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(|r| r.requirement.as_str())
    }

    pub fn contains_requirement(&self, name: &str) -> bool {
        self.requirements
            .iter()
            .any(|r| r.requirement.as_str() == name)
    }

    pub fn category_of(&self, name: &str) -> Option<&str> {
        self.requirements
            .iter()
            .find(|r| r.requirement.as_str() == name)
            .and_then(|r| r.category.as_deref())
    }

    pub fn target(&self, name: &str) -> Option<&ProgressTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Row policy for every source read under this catalog.
    ///
    /// Unknown columns are only rejected when the catalog lists requirements.
    pub fn read_options(&self) -> ReadOptions {
        let options = ReadOptions::default().with_skip_zero_prefixed(self.policy.skip_zero_prefixed);
        if self.policy.reject_unknown_columns && !self.requirements.is_empty() {
            options.with_known_requirements(self.requirement_names())
        } else {
            options
        }
    }

    /// Resolves the manifest sources, then the discovered ones, in build order.
    ///
    /// A missing discovery directory is logged and contributes no sources.
    pub fn resolve_sources(&self) -> Vec<CsvSource> {
        let mut sources: Vec<CsvSource> = self
            .sources
            .iter()
            .map(|entry| {
                let path = self.resolve_path(&entry.path);
                let tag = entry.tag.clone().unwrap_or_else(|| tag_for_path(&path));
                let source = CsvSource::new(path, tag);
                match &entry.sha256 {
                    Some(sha) => source.with_sha256(sha.clone()),
                    None => source,
                }
            })
            .collect();

        if let Some(discovery) = &self.discovery {
            let dir = self.resolve_path(&discovery.dir);
            match discover_sources(&dir, &discovery.suffix) {
                Ok(found) => {
                    let listed: BTreeSet<PathBuf> =
                        sources.iter().map(|s| s.path().to_path_buf()).collect();
                    sources.extend(found.into_iter().filter(|s| !listed.contains(s.path())));
                }
                Err(error) => {
                    warn!(dir = %dir.display(), %error, "source discovery skipped");
                }
            }
        }
        sources
    }

    fn resolve_path(&self, relative: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(relative),
            None => PathBuf::from(relative),
        }
    }
}

/// Tag for a source path without an explicit tag: the derived tag when the
/// file follows the `<tag>_all_courses` convention, the lower-cased stem otherwise.
pub fn tag_for_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|v| v.to_str())
        .unwrap_or("source");
    derive_tag(stem, hub_ingest::DEFAULT_SOURCE_SUFFIX).unwrap_or_else(|| stem.to_ascii_lowercase())
}

fn validate_header(manifest: &Manifest) -> Result<()> {
    if manifest.manifest.schema != CATALOG_SCHEMA {
        return Err(CatalogError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }
    Ok(())
}

fn build_requirements(manifest: &Manifest) -> Result<Vec<CatalogRequirement>> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(manifest.requirements.len());
    for entry in &manifest.requirements {
        let requirement =
            Requirement::new(entry.name.as_str()).map_err(|e| CatalogError::InvalidManifest {
                message: e.to_string(),
            })?;
        if !seen.insert(requirement.as_str().to_string()) {
            return Err(CatalogError::DuplicateRequirement {
                name: requirement.into_string(),
            });
        }
        out.push(CatalogRequirement {
            requirement,
            category: entry.category.clone(),
        });
    }
    Ok(out)
}

fn build_targets(manifest: &Manifest, known: &BTreeSet<&str>) -> Result<Vec<ProgressTarget>> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::with_capacity(manifest.targets.len());
    for entry in &manifest.targets {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidManifest {
                message: "progress target with empty name".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(CatalogError::DuplicateTarget {
                name: name.to_string(),
            });
        }
        if entry.required == 0 {
            return Err(CatalogError::InvalidManifest {
                message: format!("progress target '{name}' must require at least one course"),
            });
        }
        let names: Vec<&str> = if entry.satisfied_by.is_empty() {
            vec![name]
        } else {
            entry.satisfied_by.iter().map(|s| s.trim()).collect()
        };
        let mut satisfied_by = Vec::with_capacity(names.len());
        for requirement in names {
            if !known.contains(requirement) {
                return Err(CatalogError::UnknownRequirement {
                    target: name.to_string(),
                    requirement: requirement.to_string(),
                });
            }
            let requirement =
                Requirement::new(requirement).map_err(|e| CatalogError::InvalidManifest {
                    message: e.to_string(),
                })?;
            if !satisfied_by.contains(&requirement) {
                satisfied_by.push(requirement);
            }
        }
        out.push(ProgressTarget {
            name: name.to_string(),
            category: entry.category.clone(),
            required: entry.required,
            satisfied_by,
        });
    }
    Ok(out)
}

fn validate_sha(sha: &str, path: &str) -> Result<()> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CatalogError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf> {
    if path.contains('\\') {
        return Err(CatalogError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(CatalogError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    for c in p.components() {
        if matches!(c, Component::ParentDir) {
            return Err(CatalogError::InvalidPath {
                path: PathBuf::from(path),
                message: "manifest path must not traverse out of the catalog directory"
                    .to_string(),
            });
        }
    }

    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = HubCatalog::embedded().expect("embedded catalog");
        assert_eq!(catalog.requirements.len(), 21);
        assert_eq!(catalog.targets.len(), 20);
        assert!(catalog.sources.is_empty());
        assert!(catalog.contains_requirement("Quantitative Reasoning I"));
        assert_eq!(
            catalog.category_of("Critical Thinking"),
            Some("Intellectual Toolkit")
        );
    }

    #[test]
    fn combined_target_accepts_either_requirement() {
        let catalog = HubCatalog::embedded().expect("embedded catalog");
        let target = catalog
            .target("Scientific Inquiry II or Social Inquiry II")
            .expect("combined target");
        let social = vec![Requirement::new("Social Inquiry II").unwrap()];
        let science = vec![Requirement::new("Scientific Inquiry II").unwrap()];
        let other = vec![Requirement::new("Social Inquiry I").unwrap()];
        assert!(target.is_advanced_by(&social));
        assert!(target.is_advanced_by(&science));
        assert!(!target.is_advanced_by(&other));
    }

    #[test]
    fn unit_counts_follow_hub_rules() {
        let catalog = HubCatalog::embedded().expect("embedded catalog");
        let required = |name: &str| catalog.target(name).map(|t| t.required);
        assert_eq!(required("Writing-Intensive Course"), Some(2));
        assert_eq!(required("Critical Thinking"), Some(2));
        assert_eq!(required("Ethical Reasoning"), Some(1));
    }

    #[test]
    fn tag_for_path_prefers_convention() {
        assert_eq!(tag_for_path(Path::new("data/cas_all_courses.csv")), "cas");
        assert_eq!(tag_for_path(Path::new("data/KHC_hub_courses.csv")), "khc_hub_courses");
    }

    #[test]
    fn rejects_unsafe_paths() {
        assert!(validate_path("../secret.csv").is_err());
        assert!(validate_path("/etc/passwd").is_err());
        assert!(validate_path("data\\cas.csv").is_err());
        assert!(validate_path("data/cas_all_courses.csv").is_ok());
    }
}
