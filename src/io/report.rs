//! Result serialization.
//!
//! Two output shapes, mirroring the two directions of the roster:
//! - `users.csv` — one row per user (sorted by name), one column per
//!   module (sorted) holding the assigned group name.
//! - `<module>/<group>.csv` — one membership listing per group, one
//!   `name,id` row per assigned user.

use std::fs;
use std::path::Path;

use crate::assign::PlacementRequest;
use crate::error::{PlacementError, Result};
use crate::models::Roster;

/// Renders the per-user placement table as CSV.
///
/// Header: `name,id,<module>,...`. Users are sorted by name; a user
/// missing a module's binding gets an empty cell (cannot happen after a
/// successful run).
pub fn users_csv(request: &PlacementRequest, roster: &Roster) -> Result<String> {
    let modules = request.module_names();

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["name", "id"];
    header.extend(modules.iter().copied());
    writer.write_record(&header)?;

    let mut order: Vec<usize> = (0..request.users.len()).collect();
    order.sort_by(|&a, &b| request.users[a].name.cmp(&request.users[b].name));

    for user_idx in order {
        let user = &request.users[user_idx];
        let mut row = vec![user.name.clone(), user.id.to_string()];
        for module in &modules {
            let cell = roster
                .group_of(user_idx, module)
                .map(|g| request.groups[*module][g].name.clone())
                .unwrap_or_default();
            row.push(cell);
        }
        writer.write_record(&row)?;
    }

    into_string(writer)
}

/// Renders one group's membership listing as CSV (`name,id` per user).
pub fn group_csv(request: &PlacementRequest, roster: &Roster, module: &str, group: usize) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "id"])?;
    for &user_idx in roster.members(module, group) {
        let user = &request.users[user_idx];
        writer.write_record([user.name.as_str(), &user.id.to_string()])?;
    }
    into_string(writer)
}

/// Writes `users.csv` plus one `<module>/<group>.csv` per group under
/// `dir`, creating directories as needed.
pub fn write_reports(dir: &Path, request: &PlacementRequest, roster: &Roster) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("users.csv"), users_csv(request, roster)?)?;

    for (module, groups) in &request.groups {
        let module_dir = dir.join(module);
        fs::create_dir_all(&module_dir)?;
        for (group_idx, group) in groups.iter().enumerate() {
            let content = group_csv(request, roster, module, group_idx)?;
            fs::write(module_dir.join(format!("{}.csv", group.name)), content)?;
        }
    }

    tracing::info!(dir = %dir.display(), "reports written");
    Ok(())
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| PlacementError::invalid_record(format!("CSV buffer flush failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| PlacementError::invalid_record(format!("CSV output is not UTF-8: {e}")))
}
