//! Everything one `moitt` run works with, resolved up front.

use crate::models::args::Cli;
use anyhow::Result;
use moitt::domain::component::{Component, Operation};
use moitt::domain::config::ToolConfig;
use moitt::domain::constants::KUBEADMIN;
use moitt::domain::users::TestUser;
use moitt::exec::SharedRunner;
use moitt::features::ocp::Ocp;
use moitt::kernel::env::Environment;
use std::path::PathBuf;
use tracing::debug;

/// The two variables every run needs, checked in this order.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub profile: String,
    pub pull_secret: PathBuf,
}

impl Credentials {
    pub fn from_env(env: &Environment) -> Result<Self> {
        let profile = env.profile()?.to_owned();
        let pull_secret = env.pull_secret()?;
        Ok(Self { profile, pull_secret })
    }
}

#[derive(Debug)]
pub struct Session {
    pub operation: Operation,
    pub component: Option<Component>,
    pub version: String,
    pub tag: String,
    pub quay: bool,
    pub pull_secret: PathBuf,
    pub env: Environment,
    pub config: ToolConfig,
    pub runner: SharedRunner,
    /// Directory holding `member-roll.yaml` and `bookinfo.yaml`.
    pub workdir: PathBuf,
    pub ocp: Ocp,
}

impl Session {
    pub fn new(
        cli: &Cli,
        env: Environment,
        credentials: Credentials,
        config: ToolConfig,
        runner: SharedRunner,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        let ocp = Ocp::new(
            credentials.profile,
            &cli.directory,
            &cli.version,
            &credentials.pull_secret,
            config.clone(),
            runner.clone(),
        );
        debug!(kubeconfig = %ocp.kubeconfig().display(), "Cluster handle ready");

        Self {
            operation: cli.operation(),
            component: cli.component(),
            version: cli.version.clone(),
            tag: cli.tag.clone(),
            quay: cli.quay,
            pull_secret: credentials.pull_secret,
            env,
            config,
            runner,
            workdir: workdir.into(),
            ocp,
        }
    }

    /// Logs in as `kubeadmin` with the password currently on disk.
    pub fn login_kubeadmin(&self) -> Result<()> {
        let password = self.ocp.kubeadmin_password()?;
        self.ocp.login(KUBEADMIN, &password)?;
        Ok(())
    }

    pub fn login(&self, user: &TestUser) -> Result<()> {
        self.ocp.login(&user.name, &user.password)?;
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.ocp.logout()?;
        Ok(())
    }
}
