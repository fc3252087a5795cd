//! Hub progress for a list of taken courses.

use std::collections::BTreeSet;

use serde::Serialize;

use hub_catalog::HubCatalog;
use hub_model::normalize;

use crate::index::AggregationIndex;

/// Category used for targets the catalog leaves uncategorized.
pub const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetProgress {
    pub name: String,
    pub category: String,
    pub required: u32,
    pub current: u32,
    pub fulfilled: bool,
    /// Canonical codes counted towards this target.
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub fulfilled: usize,
    pub total: usize,
    pub current: u32,
    pub required: u32,
    /// `round(current / required * 100)`, at most 100.
    pub percent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HubProgress {
    /// Resolved canonical codes, first occurrence order, no duplicates.
    pub courses: Vec<String>,
    /// Inputs that did not resolve to any course.
    pub unresolved: Vec<String>,
    pub targets: Vec<TargetProgress>,
    pub categories: Vec<CategoryProgress>,
}

impl HubProgress {
    pub fn is_complete(&self) -> bool {
        self.targets.iter().all(|t| t.fulfilled)
    }

    pub fn unfulfilled(&self) -> impl Iterator<Item = &TargetProgress> {
        self.targets.iter().filter(|t| !t.fulfilled)
    }
}

impl AggregationIndex {
    /// Counts, per catalog target, how many of `courses` advance it.
    ///
    /// A course is counted once however often it appears in the input, under
    /// whichever code or name it was given.
    pub fn progress<I, S>(&self, courses: I, catalog: &HubCatalog) -> HubProgress
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut progress = HubProgress::default();
        let mut seen = BTreeSet::new();
        for input in courses {
            let input = input.as_ref();
            match self.resolve_identifier(input).map(|code| normalize(&code)) {
                Some(code) => {
                    if seen.insert(code.clone()) {
                        progress.courses.push(code);
                    }
                }
                None => progress.unresolved.push(input.to_string()),
            }
        }

        for target in &catalog.targets {
            let counted: Vec<String> = progress
                .courses
                .iter()
                .filter(|code| {
                    self.code_to_requirements
                        .get(code.as_str())
                        .is_some_and(|reqs| target.is_advanced_by(reqs))
                })
                .cloned()
                .collect();
            let current = u32::try_from(counted.len()).unwrap_or(u32::MAX);
            progress.targets.push(TargetProgress {
                name: target.name.clone(),
                category: target
                    .category
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                required: target.required,
                current,
                fulfilled: current >= target.required,
                courses: counted,
            });
        }

        progress.categories = roll_up(&progress.targets);
        progress
    }
}

/// Per-category totals in first-appearance order.
fn roll_up(targets: &[TargetProgress]) -> Vec<CategoryProgress> {
    let mut categories: Vec<CategoryProgress> = Vec::new();
    for target in targets {
        let idx = match categories.iter().position(|c| c.category == target.category) {
            Some(idx) => idx,
            None => {
                categories.push(CategoryProgress {
                    category: target.category.clone(),
                    fulfilled: 0,
                    total: 0,
                    current: 0,
                    required: 0,
                    percent: 0,
                });
                categories.len() - 1
            }
        };
        let category = &mut categories[idx];
        category.total += 1;
        if target.fulfilled {
            category.fulfilled += 1;
        }
        category.current = category.current.saturating_add(target.current);
        category.required = category.required.saturating_add(target.required);
    }
    for category in &mut categories {
        category.percent = percent(category.current, category.required);
    }
    categories
}

fn percent(current: u32, required: u32) -> u32 {
    if required == 0 {
        return 100;
    }
    let current = u64::from(current);
    let required = u64::from(required);
    let rounded = (current * 200 + required) / (required * 2);
    u32::try_from(rounded.min(100)).unwrap_or(100)
}
