use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A hub requirement, identified by its display name
/// (e.g. `"Quantitative Reasoning I"`).
///
/// Names are compared exactly; they come from the requirement catalog and the
/// header row of course sources, never from user input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirement(String);

impl Requirement {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRequirement(name));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for Requirement {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Requirement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Requirement {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn trims_name() {
        let req = Requirement::new("  Ethical Reasoning ").unwrap();
        assert_eq!(req.as_str(), "Ethical Reasoning");
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            Requirement::new("  "),
            Err(ModelError::InvalidRequirement("  ".to_string()))
        );
    }

    #[test]
    fn set_lookup_by_str() {
        let mut set = BTreeSet::new();
        set.insert(Requirement::new("Critical Thinking").unwrap());
        assert!(set.contains("Critical Thinking"));
        assert!(!set.contains("critical thinking"));
    }
}
