//! # OpenShift cluster
//!
//! [`Ocp`] wraps the two tools that own a test cluster's lifecycle:
//!
//! * `openshift-install` creates and destroys the AWS cluster from an assets
//!   directory. The installer for the requested version is downloaded from the
//!   OpenShift mirror unless a binary is configured explicitly.
//! * `oc` logs users in and out and configures the `htpasswd` identity provider
//!   that backs the QE accounts.
//!
//! Nothing here retries: a failing tool fails the run.

mod error;
mod install_config;

pub use crate::error::{OcpError, OcpErrorExt};

use moitt_domain::config::ToolConfig;
use moitt_domain::constants::ENV_AWS_PROFILE;
use moitt_domain::users::TestUser;
use moitt_exec::{Invocation, SharedRunner};
use moitt_kernel::assets::AssetPaths;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const INSTALLER_BINARY: &str = "openshift-install";
const HTPASSWD_FILE: &str = "users.htpasswd";
const OPENSHIFT_CONFIG_NAMESPACE: &str = "openshift-config";

#[derive(Debug, Clone)]
pub struct Ocp {
    profile: String,
    assets: AssetPaths,
    version: String,
    pull_secret: PathBuf,
    config: ToolConfig,
    runner: SharedRunner,
}

impl Ocp {
    pub fn new(
        profile: impl Into<String>,
        assets: impl Into<PathBuf>,
        version: impl Into<String>,
        pull_secret: impl Into<PathBuf>,
        config: ToolConfig,
        runner: SharedRunner,
    ) -> Self {
        Self {
            profile: profile.into(),
            assets: AssetPaths::new(assets),
            version: version.into(),
            pull_secret: pull_secret.into(),
            config,
            runner,
        }
    }

    #[must_use]
    pub const fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    /// `<assets>/auth/kubeconfig`.
    #[must_use]
    pub fn kubeconfig(&self) -> PathBuf {
        self.assets.kubeconfig()
    }

    /// Reads the current `kubeadmin` password from the assets directory.
    pub fn kubeadmin_password(&self) -> Result<String, OcpError> {
        Ok(self.assets.read_kubeadmin_password()?)
    }

    /// Creates the cluster described by `<assets>/install-config.yaml`, rendering that
    /// file first when it does not exist.
    #[instrument(skip(self), fields(version = %self.version, assets = %self.assets.root().display()))]
    pub fn install(&self) -> Result<(), OcpError> {
        let installer = self.installer()?;

        fs::create_dir_all(self.assets.root()).context("Failed to create assets directory")?;
        self.ensure_install_config()?;

        info!("Creating OpenShift cluster, this takes a while");
        self.runner
            .execute(
                &Invocation::new(installer.to_string_lossy())
                    .args(["create", "cluster", "--dir"])
                    .path_arg(self.assets.root())
                    .args(["--log-level", self.config.ocp.log_level.as_str()])
                    .env(ENV_AWS_PROFILE, &self.profile),
            )
            .context("openshift-install create cluster")?;

        info!(kubeconfig = %self.kubeconfig().display(), "Cluster is up");
        Ok(())
    }

    /// Destroys the cluster recorded in the assets directory.
    #[instrument(skip(self), fields(assets = %self.assets.root().display()))]
    pub fn uninstall(&self) -> Result<(), OcpError> {
        let installer = self.installer()?;

        info!("Destroying OpenShift cluster");
        self.runner
            .execute(
                &Invocation::new(installer.to_string_lossy())
                    .args(["destroy", "cluster", "--dir"])
                    .path_arg(self.assets.root())
                    .args(["--log-level", self.config.ocp.log_level.as_str()])
                    .env(ENV_AWS_PROFILE, &self.profile),
            )
            .context("openshift-install destroy cluster")?;
        Ok(())
    }

    pub fn login(&self, user: &str, password: &str) -> Result<(), OcpError> {
        info!(user, "Logging in");
        self.oc_execute(
            self.oc()
                .args(["login", "-u", user, "-p"])
                .secret_arg(password)
                .arg("--insecure-skip-tls-verify=true"),
        )
        .context(format!("Login as {user}"))
    }

    pub fn logout(&self) -> Result<(), OcpError> {
        debug!("Logging out");
        self.oc_execute(self.oc().arg("logout")).context("Logout")
    }

    /// Provisions `users` through an `htpasswd` identity provider.
    ///
    /// Expects a cluster-admin session. The secret is replaced wholesale, so users
    /// missing from `users` lose access.
    #[instrument(skip_all, fields(users = ?users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>()))]
    pub fn create_users(&self, users: &[TestUser]) -> Result<(), OcpError> {
        if users.is_empty() {
            return Err("No users to create".into());
        }

        let htpasswd = self.assets.root().join(HTPASSWD_FILE);
        fs::create_dir_all(self.assets.root()).context("Failed to create assets directory")?;

        for (index, user) in users.iter().enumerate() {
            let mut cmd = Invocation::new(&self.config.tools.htpasswd);
            if index == 0 {
                cmd = cmd.arg("-c");
            }
            let cmd = cmd.args(["-B", "-b"]).path_arg(&htpasswd).arg(&user.name).secret_arg(&user.password);
            self.runner.execute(&cmd).context(format!("htpasswd entry for {}", user.name))?;
        }

        let secret = self.config.ocp.htpasswd_secret.as_str();
        self.oc_execute(self.oc().args([
            "delete",
            "secret",
            secret,
            "-n",
            OPENSHIFT_CONFIG_NAMESPACE,
            "--ignore-not-found",
        ]))?;
        self.oc_execute(
            self.oc()
                .args(["create", "secret", "generic", secret])
                .arg(from_file_arg("htpasswd", &htpasswd))
                .args(["-n", OPENSHIFT_CONFIG_NAMESPACE]),
        )?;

        let oauth = json!({
            "apiVersion": "config.openshift.io/v1",
            "kind": "OAuth",
            "metadata": { "name": "cluster" },
            "spec": {
                "identityProviders": [{
                    "name": self.config.ocp.identity_provider,
                    "mappingMethod": "claim",
                    "type": "HTPasswd",
                    "htpasswd": { "fileData": { "name": secret } }
                }]
            }
        });
        self.oc_execute(self.oc().args(["apply", "-f", "-"]).stdin(serde_json::to_string(&oauth)?))
            .context("Configuring htpasswd identity provider")?;

        info!(count = users.len(), "Test users provisioned");
        Ok(())
    }

    fn oc(&self) -> Invocation {
        Invocation::new(&self.config.tools.oc)
    }

    fn oc_execute(&self, invocation: Invocation) -> Result<(), OcpError> {
        self.runner.execute(&invocation)?;
        Ok(())
    }

    fn ensure_install_config(&self) -> Result<(), OcpError> {
        let path = self.assets.install_config();
        if path.exists() {
            debug!(path = %path.display(), "Using existing install config");
            return Ok(());
        }

        let rendered = install_config::render(&self.config.ocp, &self.pull_secret)?;
        fs::write(&path, rendered).context(format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Rendered install config");
        Ok(())
    }

    /// Explicitly configured installer, else the cached download for this version.
    fn installer(&self) -> Result<PathBuf, OcpError> {
        if let Some(path) = &self.config.tools.openshift_install {
            return Ok(path.clone());
        }

        let dir = self.config.ocp.cache_dir.join(&self.version);
        let binary = dir.join(INSTALLER_BINARY);
        if binary.is_file() {
            return Ok(binary);
        }

        self.download_installer(&dir)?;
        Ok(binary)
    }

    fn download_installer(&self, dir: &Path) -> Result<(), OcpError> {
        fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;

        let archive = format!("{INSTALLER_BINARY}-linux-{}.tar.gz", self.version);
        let url = format!("{}/{}/{archive}", self.config.ocp.installer_mirror.trim_end_matches('/'), self.version);
        let tarball = dir.join(&archive);

        info!(%url, "Downloading installer");
        self.runner
            .execute(
                &Invocation::new(&self.config.tools.curl)
                    .args(["-fsSL", "-o"])
                    .path_arg(&tarball)
                    .arg(url),
            )
            .context("Downloading openshift-install")?;
        self.runner
            .execute(
                &Invocation::new(&self.config.tools.tar)
                    .arg("-xzf")
                    .path_arg(&tarball)
                    .arg("-C")
                    .path_arg(dir)
                    .arg(INSTALLER_BINARY),
            )
            .context("Unpacking openshift-install")?;
        Ok(())
    }
}

fn from_file_arg(key: &str, path: &Path) -> String {
    format!("--from-file={key}={}", path.display())
}
