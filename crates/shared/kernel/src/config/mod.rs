use crate::error::{KernelError, KernelErrorExt};
use config::{Config, Environment, File};
use moitt_domain::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILE};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads the tool configuration with a layered strategy.
///
/// 1. **Defaults**: whatever `T`'s `#[serde(default)]` provides.
/// 2. **File**: the given TOML file (must exist), or `moitt.toml` in the working
///    directory when present.
/// 3. **Environment overrides**: variables prefixed with `MOITT__`, nested with double
///    underscores (e.g. `MOITT__OCP__REGION` maps to `ocp.region`).
///
/// # Errors
/// Returns [`KernelError::Config`] if an explicit file is missing, a source cannot be
/// parsed, or the merged values do not match `T`.
///
/// # Example
/// ```rust,no_run
/// use moitt_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Timeouts {
///     operator_secs: u64,
/// }
///
/// let cfg: Timeouts = load_config(Some("ci/moitt.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    if required || effective_path.exists() {
        info!("Loading config from {}", effective_path.display());
    } else {
        debug!("No {} found, using defaults and environment", effective_path.display());
    }

    let config = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moitt_domain::config::ToolConfig;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn explicit_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("moitt.toml");
        fs::write(
            &file,
            "[ocp]\nregion = \"eu-central-1\"\ncluster_name = \"mesh\"\n\n[timeouts]\npods_secs = 42\n",
        )
        .unwrap();

        let cfg: ToolConfig = load_config(Some(&file)).unwrap();
        assert_eq!(cfg.ocp.region, "eu-central-1");
        assert_eq!(cfg.ocp.cluster_name, "mesh");
        assert_eq!(cfg.timeouts.pods_secs, 42);
        assert_eq!(cfg.timeouts.operator_secs, 300);
    }

    #[test]
    #[serial]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config::<ToolConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, KernelError::Config { .. }), "unexpected: {err}");
    }

    #[test]
    #[serial]
    fn defaults_apply_without_file() {
        let cfg: ToolConfig = load_config(None::<&Path>).unwrap();
        assert_eq!(cfg.tools.oc, "oc");
    }
}
