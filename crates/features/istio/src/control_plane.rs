use crate::error::{IstioError, IstioErrorExt};
use crate::oc::Oc;
use moitt_domain::config::ToolConfig;
use moitt_exec::SharedRunner;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const MEMBER_ROLL_NAME: &str = "default";

/// A `ServiceMeshControlPlane`, its member namespaces and the sample app used
/// to smoke test it.
///
/// Steps run as a regular (non admin) user: namespaces are handled as projects and
/// everything else is namespaced.
#[derive(Debug, Clone)]
pub struct ControlPlane {
    name: String,
    namespace: String,
    sample_namespace: String,
    members: Vec<String>,
    member_roll: PathBuf,
    sample: PathBuf,
    config: ToolConfig,
    oc: Oc,
}

impl ControlPlane {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        namespace: impl Into<String>,
        sample_namespace: impl Into<String>,
        members: impl IntoIterator<Item = S>,
        member_roll: impl Into<PathBuf>,
        sample: impl Into<PathBuf>,
        config: ToolConfig,
        runner: SharedRunner,
    ) -> Self {
        let oc = Oc::new(&config.tools.oc, runner);
        Self {
            name: name.into(),
            namespace: namespace.into(),
            sample_namespace: sample_namespace.into(),
            members: members.into_iter().map(Into::into).collect(),
            member_roll: member_roll.into(),
            sample: sample.into(),
            config,
            oc,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Applies `cr_file`, or the default basic install when none is given.
    #[instrument(skip(self), fields(name = %self.name, namespace = %self.namespace))]
    pub fn install(&self, cr_file: Option<&Path>) -> Result<(), IstioError> {
        self.oc.ensure_project(&self.namespace)?;
        let applied = match cr_file {
            Some(cr) => self.oc.apply_file(&self.namespace, cr),
            None => self.oc.apply(&self.namespace, &self.config.control_plane.default_cr),
        };
        applied.context("Applying control plane")?;
        info!("Control plane applied");
        Ok(())
    }

    /// Requests a project for each namespace that does not exist yet.
    pub fn create_ns<S: AsRef<str>>(&self, namespaces: &[S]) -> Result<(), IstioError> {
        for namespace in namespaces.iter().map(AsRef::as_ref) {
            self.oc.ensure_project(namespace).context(format!("Creating project {namespace}"))?;
        }
        Ok(())
    }

    /// Applies the member roll file, or a generated `default` roll listing every member.
    pub fn apply_smmr(&self) -> Result<(), IstioError> {
        if self.member_roll.is_file() {
            debug!(file = %self.member_roll.display(), "Applying member roll file");
            return self.oc.apply_file(&self.namespace, &self.member_roll).context("Applying member roll");
        }

        let roll = json!({
            "apiVersion": "maistra.io/v1",
            "kind": "ServiceMeshMemberRoll",
            "metadata": { "name": MEMBER_ROLL_NAME, "namespace": self.namespace },
            "spec": { "members": self.members }
        });
        self.oc.apply_stdin(&self.namespace, serde_json::to_string(&roll)?).context("Applying member roll")?;
        info!(members = ?self.members, "Member roll applied");
        Ok(())
    }

    /// Deploys the sample app and checks its product page through the mesh.
    #[instrument(skip(self), fields(namespace = %self.sample_namespace))]
    pub fn smoke_check(&self) -> Result<(), IstioError> {
        if !self.sample.is_file() {
            return Err(IstioError::from(format!("Sample manifest {} not found", self.sample.display())));
        }
        self.oc.apply_file(&self.sample_namespace, &self.sample).context("Deploying sample app")?;

        let smoke = &self.config.control_plane;
        self.oc
            .wait(
                "Available",
                &["deployment", "--all"],
                &self.sample_namespace,
                Duration::from_secs(self.config.timeouts.pods_secs),
            )
            .context("Sample deployments did not become available")?;

        let page = self
            .oc
            .execute(
                &self
                    .oc
                    .cmd()
                    .args(["exec", smoke.smoke_workload.as_str(), "-c", smoke.smoke_container.as_str()])
                    .args(["-n", self.sample_namespace.as_str(), "--", "curl", "-s", smoke.smoke_url.as_str()])
                    .capture(),
            )
            .context("Fetching product page")?;

        if !page.stdout.contains(&smoke.smoke_marker) {
            warn!(bytes = page.stdout.len(), "Unexpected product page");
            return Err(IstioError::SmokeCheck { expected: smoke.smoke_marker.clone(), context: None });
        }
        info!("Smoke check passed");
        Ok(())
    }

    /// Waits for the control plane to report `Ready`.
    pub fn check(&self) -> Result<(), IstioError> {
        let target = format!("smcp/{}", self.name);
        self.oc
            .wait(
                "Ready",
                &[target.as_str()],
                &self.namespace,
                Duration::from_secs(self.config.timeouts.control_plane_secs),
            )
            .context("Control plane did not become ready")?;
        info!(name = %self.name, "Control plane ready");
        Ok(())
    }

    /// Removes the sample, member roll and control plane, then the member namespaces.
    #[instrument(skip(self), fields(name = %self.name, namespace = %self.namespace))]
    pub fn uninstall(&self, cr_file: Option<&Path>) -> Result<(), IstioError> {
        if self.sample.is_file() {
            self.oc.delete(&self.sample_namespace, &self.sample.to_string_lossy())?;
        }

        self.oc.execute(&self.oc.cmd().args([
            "delete",
            "smmr",
            MEMBER_ROLL_NAME,
            "-n",
            self.namespace.as_str(),
            "--ignore-not-found",
        ]))?;

        let cr = cr_file.map_or_else(
            || self.config.control_plane.default_cr.clone(),
            |path| path.to_string_lossy().into_owned(),
        );
        self.oc.delete(&self.namespace, &cr).context("Deleting control plane")?;

        for member in &self.members {
            self.oc.delete_project(member).context(format!("Deleting project {member}"))?;
        }
        info!("Control plane removed");
        Ok(())
    }
}
