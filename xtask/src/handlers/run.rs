use anyhow::{Context, bail};

/// Runs the `moitt` binary with `cargo run`, forwarding `args`.
///
/// # Errors
/// Returns an error if the binary fails to build or exits with a non-zero status.
pub fn run_cli(args: &[String]) -> anyhow::Result<()> {
    println!("🚀 Starting moitt...");

    let status = std::process::Command::new("cargo")
        .args(["run", "-p", "moitt-cli", "--bin", "moitt", "--"])
        .args(args)
        .status()
        .context("Failed to execute cargo run")?;

    if !status.success() {
        bail!("moitt exited with non-zero status: {}", status.code().unwrap_or(-1));
    }

    Ok(())
}
