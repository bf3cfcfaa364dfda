//! # Registry puller
//!
//! The Maistra QE images live in an authenticated registry. The registry-puller
//! controller copies the pull secret into every namespace and links it to the
//! service accounts there, so test workloads can pull without per-namespace setup.
//!
//! [`Puller::build`] validates the pull secret and renders the manifests;
//! [`Puller::execute`] applies them with `oc` under the current login.

mod error;
mod manifest;

pub use crate::error::{PullerError, PullerErrorExt};

use moitt_domain::config::ToolConfig;
use moitt_exec::{Invocation, SharedRunner};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const MANIFEST_FILE: &str = "registry-puller.json";

#[derive(Debug)]
pub struct Puller {
    secret_file: PathBuf,
    config: ToolConfig,
    runner: SharedRunner,
    manifest: Option<PathBuf>,
}

impl Puller {
    pub fn new(secret_file: impl Into<PathBuf>, config: ToolConfig, runner: SharedRunner) -> Self {
        Self { secret_file: secret_file.into(), config, runner, manifest: None }
    }

    /// Path of the rendered manifest, once [`Puller::build`] succeeded.
    #[must_use]
    pub fn manifest(&self) -> Option<&Path> {
        self.manifest.as_deref()
    }

    /// Renders the registry-puller manifest into the work directory.
    ///
    /// The file carries the pull secret and is readable by its owner only.
    #[instrument(skip(self), fields(secret = %self.secret_file.display()))]
    pub fn build(&mut self) -> Result<&Path, PullerError> {
        let secret = fs::read_to_string(&self.secret_file)
            .context(format!("Failed to read pull secret {}", self.secret_file.display()))?;
        let manifest = manifest::render(&self.config.puller, &secret)?;

        let work_dir = &self.config.puller.work_dir;
        fs::create_dir_all(work_dir).context(format!("Failed to create {}", work_dir.display()))?;

        let path = work_dir.join(MANIFEST_FILE);
        write_private(&path, &serde_json::to_vec_pretty(&manifest)?)
            .context(format!("Failed to write {}", path.display()))?;

        info!(manifest = %path.display(), image = %self.config.puller.image, "Registry-puller manifest built");
        Ok(self.manifest.insert(path).as_path())
    }

    /// Applies the built manifest.
    pub fn execute(&self) -> Result<(), PullerError> {
        let Some(manifest) = &self.manifest else {
            return Err(PullerError::NotBuilt { context: Some("call build() first".into()) });
        };

        self.runner
            .execute(&Invocation::new(&self.config.tools.oc).args(["apply", "-f"]).path_arg(manifest))
            .context("Deploying registry-puller")?;

        info!(namespace = %self.config.puller.namespace, "Registry-puller deployed");
        Ok(())
    }
}

fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        // `mode` only applies on creation; a manifest left by an older run keeps its bits otherwise.
        if path.exists() {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
    }
    options.open(path)?.write_all(contents)
}
