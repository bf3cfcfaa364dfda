use crate::services::utils::{get_workspace_crates, render_crate_table};
use anyhow::Result;

const GROUPS: &[(&str, &str)] = &[
    ("Applications", "apps"),
    ("Components", "crates/features"),
    ("Shared", "crates/shared"),
    ("Infrastructure", "infra"),
];

/// Lists every workspace crate, grouped by directory.
///
/// # Errors
/// Returns an error if a directory cannot be read or crate metadata cannot be parsed.
pub fn list_crates() -> Result<()> {
    for (title, dir) in GROUPS {
        let crates = get_workspace_crates(dir)?;
        if crates.is_empty() {
            println!("ℹ️ No crates found in '{dir}/'.");
            continue;
        }
        render_crate_table(title, &crates);
    }
    Ok(())
}
