use anyhow::{Context, Result};
use std::process::Command;

/// Cargo tools used by `cargo xtask test` and CI.
const REQUIRED_TOOLS: &[(&str, &str)] = &[("cargo-nextest", "cargo-nextest"), ("cargo-audit", "cargo-audit")];

/// Installs (or updates) the cargo tools used for development.
///
/// # Errors
/// Returns an error if `cargo install` fails for any tool.
pub fn setup_project() -> Result<()> {
    println!("🛠️  Starting moitt development setup...");

    for (bin, package) in REQUIRED_TOOLS {
        if which::which(bin).is_ok() {
            println!("✅ {bin} is already installed. Trying update...");
        } else {
            println!("📥 Installing {package}...");
        }
        run_command("cargo", &["install", package, "--locked"])?;
    }

    println!("\n✨ Setup complete! Run 'cargo xtask doctor' to check the cluster tools.");
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(cmd).args(args).status().with_context(|| format!("Failed to execute {cmd}"))?;

    if !status.success() {
        anyhow::bail!("Command '{cmd} {args:?}' failed with status {status}");
    }
    Ok(())
}
