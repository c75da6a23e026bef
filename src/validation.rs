//! Input validation for placement problems.
//!
//! Checks structural integrity of the group catalog and user population
//! before placement. Detects:
//! - Duplicate user IDs
//! - Duplicate group names or IDs within a module
//! - Modules with no groups
//! - Choice lists referencing unknown modules
//!
//! Invalid or duplicated *choice entries* are not validation errors;
//! the normalizer repairs those per user.

use std::collections::{BTreeMap, HashSet};

use crate::models::{Group, User};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two users share an ID, or two groups in one module share a name or ID.
    DuplicateId,
    /// A module has no groups at all.
    EmptyModule,
    /// A user's choices reference a module missing from the catalog.
    UnknownModule,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a placement run.
///
/// Checks:
/// 1. No duplicate user IDs
/// 2. No duplicate group names within a module
/// 3. No duplicate group IDs within a module
/// 4. Every module has at least one group
/// 5. Every module referenced by a user's choices exists in the catalog
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(groups: &BTreeMap<String, Vec<Group>>, users: &[User]) -> ValidationResult {
    let mut errors = Vec::new();

    for (module, list) in groups {
        if list.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyModule,
                format!("Module '{module}' has no groups"),
            ));
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for group in list {
            if !names.insert(group.name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate group name '{}' in module '{module}'", group.name),
                ));
            }
            if !ids.insert(group.id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate group ID {} in module '{module}'", group.id),
                ));
            }
        }
    }

    let mut user_ids = HashSet::new();
    for user in users {
        if !user_ids.insert(user.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate user ID: {}", user.id),
            ));
        }

        for module in user.choices.keys() {
            if !groups.contains_key(module) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownModule,
                    format!(
                        "User '{}' has choices for unknown module '{module}'",
                        user.name
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
