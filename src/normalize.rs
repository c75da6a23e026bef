//! Choice-list repair.
//!
//! Users submit ranked choice lists that arrive in all states of
//! disrepair: duplicated entries, misspelled group names, too few
//! choices. Network construction needs exactly K distinct valid names
//! per user, so every list passes through [`normalize_choices`] first.
//!
//! Repair is deterministic: surviving entries keep their first-occurrence
//! order, and fill names are drawn from the module's catalog in catalog
//! order, so identical inputs always produce identical lists.

use std::collections::HashSet;

use crate::error::{PlacementError, Result};

/// Repairs a raw choice list into exactly `k` distinct valid group names.
///
/// # Algorithm
/// 1. Keep entries that name a group in `valid`, deduplicated, in
///    first-occurrence order.
/// 2. If fewer than `k` remain, append unused names from `valid` in
///    catalog order.
/// 3. Truncate to `k`.
///
/// # Errors
/// [`PlacementError::InsufficientGroups`] if `valid` holds fewer than `k`
/// distinct names; no amount of filling can reach length `k`.
pub fn normalize_choices(
    module: &str,
    raw: &[String],
    valid: &[String],
    k: usize,
) -> Result<Vec<String>> {
    let distinct: HashSet<&str> = valid.iter().map(String::as_str).collect();
    if distinct.len() < k {
        return Err(PlacementError::InsufficientGroups {
            module: module.to_string(),
            needed: k,
            available: distinct.len(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut repaired: Vec<String> = Vec::with_capacity(k);

    for name in raw {
        if repaired.len() == k {
            break;
        }
        if distinct.contains(name.as_str()) && seen.insert(name.as_str()) {
            repaired.push(name.clone());
        }
    }

    for name in valid {
        if repaired.len() == k {
            break;
        }
        if seen.insert(name.as_str()) {
            repaired.push(name.clone());
        }
    }

    Ok(repaired)
}
