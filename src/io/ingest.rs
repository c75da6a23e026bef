//! Flat-text ingestion.
//!
//! Two input files:
//! - `groups.csv`: `module,name,id,max_users` — one group per row.
//! - `users.csv`: `timestamp,email,name,id,grade,choice,...` — the
//!   trailing choice columns are chunked K at a time, one chunk per
//!   module in sorted module order.
//!
//! Grade eligibility is derived from group names: any standalone number
//! or `lo-hi` range in a name (e.g. "Art 9-10", "Choir 12") restricts
//! the group to those grades. Names without numbers are unrestricted.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::assign::PlacementRequest;
use crate::config::PlacementConfig;
use crate::error::{PlacementError, Result};
use crate::models::{Group, User};

static GRADE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+)(?:-(\d+))?\b").expect("grade range pattern is valid"));

/// Extracts the grade set encoded in a group name.
///
/// `"Art 9-10"` → `[9, 10]`; `"Choir 12"` → `[12]`; `"Pottery"` → `[]`
/// (unrestricted). Multiple numbers and ranges all contribute.
pub fn grade_range(name: &str) -> Vec<i32> {
    let mut grades = Vec::new();
    for captures in GRADE_RANGE.captures_iter(name) {
        let start: i32 = match captures[1].parse() {
            Ok(n) => n,
            Err(_) => continue, // too many digits to be a grade
        };
        match captures.get(2).map(|m| m.as_str().parse::<i32>()) {
            Some(Ok(end)) => grades.extend(start..=end),
            Some(Err(_)) => continue,
            None => grades.push(start),
        }
    }
    grades
}

/// Parses the group catalog from `module,name,id,max_users` CSV.
///
/// Groups keep their per-module file order (it becomes the catalog order
/// used for deterministic choice filling); modules sort by name.
pub fn parse_groups<R: Read>(reader: R) -> Result<BTreeMap<String, Vec<Group>>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut catalog: BTreeMap<String, Vec<Group>> = BTreeMap::new();
    for record in csv.records() {
        let record = record?;
        if record.len() < 4 {
            return Err(PlacementError::invalid_record(format!(
                "group row has {} fields, expected 4",
                record.len()
            )));
        }
        let module = &record[0];
        let name = &record[1];
        let id = parse_field::<i64>(&record[2], "group id")?;
        let max_users = parse_field::<usize>(&record[3], "group max_users")?;

        let grades = grade_range(name);
        catalog.entry(module.to_string()).or_default().push(
            Group::new(module, name, id, max_users).with_grades(grades),
        );
    }

    tracing::debug!(modules = catalog.len(), "parsed group catalog");
    Ok(catalog)
}

/// Parses users from `timestamp,email,name,id,grade,choice,...` CSV.
///
/// `modules` must be in sorted order; each user's trailing choice
/// columns are consumed `choices_per_module` at a time, one chunk per
/// module. Short rows yield short raw lists; the normalizer repairs
/// them later.
pub fn parse_users<R: Read>(
    reader: R,
    modules: &[String],
    choices_per_module: usize,
) -> Result<Vec<User>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut users = Vec::new();
    for record in csv.records() {
        let record = record?;
        if record.len() < 5 {
            return Err(PlacementError::invalid_record(format!(
                "user row has {} fields, expected at least 5",
                record.len()
            )));
        }
        let email = &record[1];
        let name = &record[2];
        let id = parse_field::<i64>(&record[3], "user id")?;
        let grade = parse_field::<i32>(&record[4], "user grade")?;

        let choices: Vec<&str> = record.iter().skip(5).collect();
        let mut user = User::new(id, name, email, grade);
        for (index, module) in modules.iter().enumerate() {
            let start = (index * choices_per_module).min(choices.len());
            let end = (start + choices_per_module).min(choices.len());
            let raw: Vec<String> = choices[start..end]
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect();
            user.choices.insert(module.clone(), raw);
        }
        users.push(user);
    }

    tracing::debug!(users = users.len(), "parsed user submissions");
    Ok(users)
}

/// Loads a full [`PlacementRequest`] from `groups.csv` and `users.csv`
/// in the given directory.
pub fn load_request(dir: &Path, config: &PlacementConfig) -> Result<PlacementRequest> {
    let groups = parse_groups(File::open(dir.join("groups.csv"))?)?;
    let modules: Vec<String> = groups.keys().cloned().collect();
    let users = parse_users(
        File::open(dir.join("users.csv"))?,
        &modules,
        config.choices_per_module,
    )?;
    Ok(PlacementRequest { groups, users })
}

fn parse_field<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| PlacementError::invalid_record(format!("unparseable {what}: '{value}'")))
}
