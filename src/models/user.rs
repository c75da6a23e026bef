//! User model.
//!
//! A user is an individual requiring exactly one group placement per
//! module. Users carry their raw ranked choice lists as submitted; lists
//! are repaired to exactly K distinct valid names by the normalizer
//! before network construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An individual to be placed into one group per module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// External numeric identifier from the input records.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Grade value checked against group eligibility sets.
    pub grade: i32,
    /// Raw ordered choice lists, module name → group names as submitted.
    /// May contain duplicates, invalid names, or fewer than K entries.
    pub choices: HashMap<String, Vec<String>>,
}

impl User {
    /// Creates a user with no choices.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, grade: i32) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            grade,
            choices: HashMap::new(),
        }
    }

    /// Sets the raw choice list for a module.
    pub fn with_choices(mut self, module: impl Into<String>, names: Vec<String>) -> Self {
        self.choices.insert(module.into(), names);
        self
    }

    /// Raw choices for a module; empty if the user submitted none.
    pub fn choices_for(&self, module: &str) -> &[String] {
        self.choices.get(module).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_builder() {
        let u = User::new(42, "Ada", "ada@example.com", 10)
            .with_choices("Art", vec!["Painting".into(), "Pottery".into()]);

        assert_eq!(u.id, 42);
        assert_eq!(u.grade, 10);
        assert_eq!(u.choices_for("Art"), ["Painting", "Pottery"]);
    }

    #[test]
    fn test_missing_module_yields_empty_choices() {
        let u = User::new(1, "Ada", "ada@example.com", 9);
        assert!(u.choices_for("Sport").is_empty());
    }
}
