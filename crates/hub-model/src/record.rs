use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::requirement::Requirement;

/// One course row read from a source table.
///
/// `requirements` keeps the source's column order and never holds the same
/// requirement twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course code as written in the source, trimmed (e.g. `"CAS CS 131"`).
    pub identifier: String,
    /// Free-text course title.
    pub display_name: String,
    /// Requirements this course satisfies, in source column order.
    pub requirements: Vec<Requirement>,
    /// Tag of the source this row came from (e.g. `"cas"`).
    pub source_tag: String,
}

impl CourseRecord {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        source_tag: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into().trim().to_string(),
            display_name: display_name.into().trim().to_string(),
            requirements: Vec::new(),
            source_tag: source_tag.into(),
        }
    }

    /// Adds a requirement unless it is already present.
    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.push_requirement(requirement);
        self
    }

    pub fn push_requirement(&mut self, requirement: Requirement) {
        if !self.requirements.contains(&requirement) {
            self.requirements.push(requirement);
        }
    }

    /// Canonical index key for this record.
    pub fn canonical_code(&self) -> String {
        normalize(&self.identifier)
    }

    pub fn satisfies(&self, requirement: &str) -> bool {
        self.requirements.iter().any(|r| r.as_str() == requirement)
    }
}
