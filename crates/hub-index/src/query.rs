//! Read-only queries over a built [`AggregationIndex`].
//!
//! "Not found" is an ordinary answer here (`None` or an empty list), never an
//! error.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use hub_model::{Requirement, department_of, normalize};

use crate::index::AggregationIndex;

/// Result of looking up one course in a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseLookup {
    /// The input exactly as given.
    pub input: String,
    pub resolved_code: Option<String>,
    pub requirements: Vec<Requirement>,
    pub found: bool,
    pub source_tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkLookup {
    /// One entry per input, in input order, duplicates kept.
    pub results: Vec<CourseLookup>,
    /// Every requirement satisfied by at least one found course.
    pub unique_requirements: BTreeSet<Requirement>,
}

/// A course satisfying several of the requested requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementMatch {
    pub code: String,
    pub name: String,
    pub matched: Vec<Requirement>,
}

impl AggregationIndex {
    /// Resolves a course code or course name to its canonical code.
    ///
    /// Codes win over names. A name match returns the identifier as it was
    /// first written in its source.
    pub fn resolve_identifier(&self, raw: &str) -> Option<String> {
        let key = normalize(raw);
        if self.code_to_name.contains_key(&key) {
            return Some(key);
        }
        self.name_to_code.get(&key).cloned()
    }

    fn resolve_key(&self, raw: &str) -> Option<String> {
        self.resolve_identifier(raw).map(|code| normalize(&code))
    }

    /// Requirements of a course in first-seen order; empty when unknown.
    pub fn requirements_for(&self, raw: &str) -> Vec<Requirement> {
        self.resolve_key(raw)
            .and_then(|code| self.code_to_requirements.get(&code).cloned())
            .unwrap_or_default()
    }

    pub fn requirements_for_many<I, S>(&self, inputs: I) -> BulkLookup
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bulk = BulkLookup::default();
        for input in inputs {
            let input = input.as_ref();
            let resolved = self.resolve_identifier(input);
            let key = resolved.as_deref().map(normalize);
            let requirements = key
                .as_ref()
                .and_then(|k| self.code_to_requirements.get(k).cloned())
                .unwrap_or_default();
            let source_tag = key
                .as_ref()
                .and_then(|k| self.code_to_source_tag.get(k).cloned());
            bulk.unique_requirements
                .extend(requirements.iter().cloned());
            bulk.results.push(CourseLookup {
                input: input.to_string(),
                found: resolved.is_some(),
                resolved_code: resolved,
                requirements,
                source_tag,
            });
        }
        bulk
    }

    /// Canonical codes of every course satisfying `requirement`, sorted.
    pub fn courses_for(&self, requirement: &str) -> Vec<String> {
        self.requirement_to_codes
            .get(requirement)
            .map(|codes| codes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every course as canonical code -> display name. The map is a copy.
    pub fn all_courses(&self) -> BTreeMap<String, String> {
        self.code_to_name.clone()
    }

    pub fn course_name(&self, raw: &str) -> Option<&str> {
        self.resolve_key(raw)
            .and_then(|code| self.code_to_name.get(&code))
            .map(String::as_str)
    }

    /// Canonical codes whose department token equals `department`, sorted.
    pub fn courses_in_department(&self, department: &str) -> Vec<String> {
        let department = normalize(department);
        if department.is_empty() {
            return Vec::new();
        }
        self.code_to_name
            .keys()
            .filter(|code| department_of(code).as_deref() == Some(department.as_str()))
            .cloned()
            .collect()
    }

    /// Courses satisfying at least `min` of `requirements`, sorted by code.
    ///
    /// A `min` of zero is treated as one.
    pub fn courses_matching_at_least<S: AsRef<str>>(
        &self,
        requirements: &[S],
        min: usize,
    ) -> Vec<RequirementMatch> {
        let min = min.max(1);
        let mut wanted: Vec<&str> = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let requirement = requirement.as_ref().trim();
            if !requirement.is_empty() && !wanted.contains(&requirement) {
                wanted.push(requirement);
            }
        }

        let mut matches = Vec::new();
        for (code, satisfied) in &self.code_to_requirements {
            let matched: Vec<Requirement> = wanted
                .iter()
                .filter_map(|w| satisfied.iter().find(|r| r.as_str() == *w))
                .cloned()
                .collect();
            if matched.len() >= min {
                matches.push(RequirementMatch {
                    code: code.clone(),
                    name: self.code_to_name.get(code).cloned().unwrap_or_default(),
                    matched,
                });
            }
        }
        matches
    }
}
