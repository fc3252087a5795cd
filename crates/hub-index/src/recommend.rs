use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::Serialize;

use hub_catalog::HubCatalog;
use hub_model::{department_of, normalize};

use crate::index::AggregationIndex;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendOptions {
    pub limit: usize,
    /// Only suggest courses of this department (`"CS"` for `CAS CS 131`).
    pub department: Option<String>,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECOMMENDATION_LIMIT,
            department: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub code: String,
    pub name: String,
    /// Number of unfulfilled targets this course would advance.
    pub score: usize,
    pub advances: Vec<String>,
}

impl AggregationIndex {
    /// Suggests courses that advance the most unfulfilled targets.
    ///
    /// Courses already taken and courses advancing nothing are left out.
    /// Ordered by score, highest first, then by code.
    pub fn recommend<I, S>(
        &self,
        taken: I,
        catalog: &HubCatalog,
        options: &RecommendOptions,
    ) -> Vec<Recommendation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let progress = self.progress(taken, catalog);
        let taken: BTreeSet<&str> = progress.courses.iter().map(String::as_str).collect();
        let open: Vec<_> = progress
            .unfulfilled()
            .filter_map(|t| catalog.target(&t.name))
            .collect();
        if open.is_empty() || options.limit == 0 {
            return Vec::new();
        }
        let department = options
            .department
            .as_deref()
            .map(normalize)
            .filter(|d| !d.is_empty());

        let mut picks: Vec<Recommendation> = self
            .code_to_requirements
            .iter()
            .filter(|(code, _)| !taken.contains(code.as_str()))
            .filter(|(code, _)| match &department {
                Some(d) => department_of(code).as_ref() == Some(d),
                None => true,
            })
            .filter_map(|(code, requirements)| {
                let advances: Vec<String> = open
                    .iter()
                    .filter(|t| t.is_advanced_by(requirements))
                    .map(|t| t.name.clone())
                    .collect();
                if advances.is_empty() {
                    return None;
                }
                Some(Recommendation {
                    code: code.clone(),
                    name: self.code_to_name.get(code).cloned().unwrap_or_default(),
                    score: advances.len(),
                    advances,
                })
            })
            .collect();

        picks.sort_by(|a, b| (Reverse(a.score), &a.code).cmp(&(Reverse(b.score), &b.code)));
        picks.truncate(options.limit);
        picks
    }
}
