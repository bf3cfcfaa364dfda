use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, one level above this crate.
///
/// # Errors
/// Returns an error if the manifest directory has no parent.
pub fn get_project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask is expected to live one level below the workspace root")
}

/// A member crate and the `[package]` fields shown by `cargo xtask crates`.
#[derive(Debug, Deserialize)]
pub struct CrateInfo {
    #[serde(skip)]
    pub folder: String,
    pub package: PackageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// Absent, or inherited from the workspace, shows as a placeholder.
    #[serde(default, deserialize_with = "plain_string")]
    pub description: Option<String>,
}

fn plain_string<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match toml::Value::deserialize(deserializer)? {
        toml::Value::String(text) => Some(text),
        _ => None,
    })
}

/// Crates directly under `sub_dir` (e.g. `crates/features`), sorted by folder.
/// A missing directory yields an empty list.
///
/// # Errors
/// Returns an error if the directory or a manifest cannot be read or parsed.
pub fn get_workspace_crates(sub_dir: &str) -> Result<Vec<CrateInfo>> {
    let dir = get_project_root()?.join(sub_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut crates = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("Reading {}", dir.display()))? {
        let path = entry?.path();
        let manifest = path.join("Cargo.toml");
        if !manifest.is_file() {
            continue;
        }
        let text = fs::read_to_string(&manifest)?;
        let mut info: CrateInfo =
            toml::from_str(&text).with_context(|| format!("Parsing {}", manifest.display()))?;
        info.folder = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        crates.push(info);
    }

    crates.sort_by(|a, b| a.folder.cmp(&b.folder));
    Ok(crates)
}

pub fn render_crate_table(title: &str, crates: &[CrateInfo]) {
    println!("\n{title}:\n");
    println!("{:<12} {:<16} {}", "Folder", "Crate", "Description");
    println!("{:-<80}", "");
    for info in crates {
        let description = info.package.description.as_deref().unwrap_or("-");
        println!("{:<12} {:<16} {description}", info.folder, info.package.name);
    }
}

/// Normalizes a crate name to the `moitt-` prefix. The facade crate `moitt` is kept as is.
#[must_use]
pub fn normalize_project_name(project: &str) -> String {
    if project == "moitt" || project.starts_with("moitt-") || project == "xtask" {
        project.to_owned()
    } else {
        format!("moitt-{project}")
    }
}
