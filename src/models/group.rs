//! Group model.
//!
//! A group is a capacity-limited option within a module that users can be
//! placed into: a class section, a workshop, a club. Each group has a hard
//! occupancy limit and an optional grade restriction.

use serde::{Deserialize, Serialize};

/// A capacity-limited placement option within one module.
///
/// Group names are unique within their module. The grade set is a *soft*
/// eligibility restriction: placement of an excluded grade is still
/// possible but carries a large cost penalty instead of the rank cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Owning module name.
    pub module: String,
    /// Group name, unique within the module.
    pub name: String,
    /// External numeric identifier from the input records.
    pub id: i64,
    /// Hard occupancy limit.
    pub max_users: usize,
    /// Grades admitted without penalty. Empty = unrestricted.
    pub grades: Vec<i32>,
}

impl Group {
    /// Creates an unrestricted group.
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        id: i64,
        max_users: usize,
    ) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            id,
            max_users,
            grades: Vec::new(),
        }
    }

    /// Restricts the group to the given grades.
    pub fn with_grades(mut self, grades: Vec<i32>) -> Self {
        self.grades = grades;
        self
    }

    /// Whether a user of the given grade is admitted without penalty.
    ///
    /// An empty grade set admits everyone.
    pub fn admits(&self, grade: i32) -> bool {
        self.grades.is_empty() || self.grades.contains(&grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_builder() {
        let g = Group::new("Art", "Painting", 7, 20).with_grades(vec![9, 10]);
        assert_eq!(g.module, "Art");
        assert_eq!(g.name, "Painting");
        assert_eq!(g.id, 7);
        assert_eq!(g.max_users, 20);
        assert_eq!(g.grades, vec![9, 10]);
    }

    #[test]
    fn test_unrestricted_admits_all() {
        let g = Group::new("Art", "Painting", 1, 10);
        assert!(g.admits(1));
        assert!(g.admits(12));
    }

    #[test]
    fn test_restricted_admits_only_listed_grades() {
        let g = Group::new("Art", "Painting 9-10", 1, 10).with_grades(vec![9, 10]);
        assert!(g.admits(9));
        assert!(g.admits(10));
        assert!(!g.admits(8));
        assert!(!g.admits(11));
    }
}
