use crate::services::utils::normalize_project_name;

/// Runs tests in the workspace or a specific crate, with `cargo nextest` when installed.
///
/// # Errors
/// Returns an error if the test execution fails or if the test runner is not found.
pub fn run_tests(project: Option<&str>) -> anyhow::Result<()> {
    let target = target_crate(project);
    println!("🧪 Running {} tests...", target.as_deref().unwrap_or("workspace"));
    let has_nextest = which::which("cargo-nextest").is_ok();

    let mut args: Vec<String> = if has_nextest {
        vec!["nextest", "run"].into_iter().map(String::from).collect()
    } else {
        vec!["test"].into_iter().map(String::from).collect()
    };

    push_target(&mut args, target);

    if has_nextest {
        args.extend(
            [
                "--failure-output",
                "immediate-final",
                "--success-output",
                "never",
                "--status-level",
                "skip",
            ]
            .into_iter()
            .map(String::from),
        );
    } else {
        args.extend(["--tests", "--lib", "--bins", "--", "-q"].into_iter().map(String::from));
    }

    println!("🧪 Running tests via '{}'...", if has_nextest { "nextest" } else { "cargo test" });
    let status = std::process::Command::new("cargo").args(args).status()?;

    if !status.success() {
        anyhow::bail!("Tests failed!");
    }
    Ok(())
}

/// Runs doc tests in the workspace or a specific crate.
///
/// # Errors
/// Returns an error if the doctest execution fails.
pub fn run_doctests(project: Option<&str>) -> anyhow::Result<()> {
    let target = target_crate(project);
    println!("📚 Running {} doc tests...", target.as_deref().unwrap_or("workspace"));

    let mut args: Vec<String> = vec!["test".into(), "--doc".into()];
    push_target(&mut args, target);

    println!("📚 Running doctests via 'cargo test --doc'...");
    let status = std::process::Command::new("cargo").args(args).status()?;

    if !status.success() {
        anyhow::bail!("Doc tests failed!");
    }

    Ok(())
}

/// `None` means the whole workspace (no project, or `all`).
fn target_crate(project: Option<&str>) -> Option<String> {
    project.filter(|p| *p != "all").map(normalize_project_name)
}

fn push_target(args: &mut Vec<String>, target: Option<String>) {
    match target {
        Some(name) => args.extend(["-p".to_owned(), name]),
        None => args.push("--workspace".into()),
    }
    args.push("--all-features".into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_targets_the_workspace() {
        assert_eq!(target_crate(None), None);
        assert_eq!(target_crate(Some("all")), None);
        assert_eq!(target_crate(Some("ocp")).as_deref(), Some("moitt-ocp"));
    }

    #[test]
    fn target_args_end_with_all_features() {
        let mut args = Vec::new();
        push_target(&mut args, Some("moitt-exec".to_owned()));
        assert_eq!(args, ["-p", "moitt-exec", "--all-features"]);

        let mut args = Vec::new();
        push_target(&mut args, None);
        assert_eq!(args, ["--workspace", "--all-features"]);
    }
}
