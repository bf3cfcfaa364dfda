//! The handful of `oc` verbs shared by the operator and control plane steps.

use crate::error::IstioError;
use moitt_exec::{Invocation, Output, SharedRunner};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub(crate) struct Oc {
    program: String,
    runner: SharedRunner,
}

impl Oc {
    pub(crate) fn new(program: impl Into<String>, runner: SharedRunner) -> Self {
        Self { program: program.into(), runner }
    }

    pub(crate) fn cmd(&self) -> Invocation {
        Invocation::new(&self.program)
    }

    pub(crate) fn execute(&self, invocation: &Invocation) -> Result<Output, IstioError> {
        Ok(self.runner.execute(invocation)?)
    }

    pub(crate) fn namespace_exists(&self, namespace: &str) -> Result<bool, IstioError> {
        Ok(self.runner.probe(&self.cmd().args(["get", "namespace", namespace]).capture())?)
    }

    /// Creates `namespace` unless it already exists.
    pub(crate) fn ensure_namespace(&self, namespace: &str) -> Result<(), IstioError> {
        if self.namespace_exists(namespace)? {
            debug!(namespace, "Namespace already exists");
            return Ok(());
        }
        self.execute(&self.cmd().args(["create", "namespace", namespace]))?;
        Ok(())
    }

    pub(crate) fn project_exists(&self, project: &str) -> Result<bool, IstioError> {
        Ok(self.runner.probe(&self.cmd().args(["get", "project", project]).capture())?)
    }

    /// Self-provisions `project` unless the current user can already see it.
    ///
    /// Regular users cannot read or create `Namespace` objects, only request projects.
    pub(crate) fn ensure_project(&self, project: &str) -> Result<(), IstioError> {
        if self.project_exists(project)? {
            debug!(project, "Project already exists");
            return Ok(());
        }
        self.execute(&self.cmd().args(["new-project", project]).capture())?;
        Ok(())
    }

    pub(crate) fn delete_project(&self, project: &str) -> Result<(), IstioError> {
        self.execute(&self.cmd().args(["delete", "project", project, "--ignore-not-found"]))?;
        Ok(())
    }

    /// `oc apply -n <ns> -f <source>`; `source` is a URL or a local path.
    pub(crate) fn apply(&self, namespace: &str, source: &str) -> Result<(), IstioError> {
        self.execute(&self.cmd().args(["apply", "-n", namespace, "-f", source]))?;
        Ok(())
    }

    pub(crate) fn apply_file(&self, namespace: &str, file: &Path) -> Result<(), IstioError> {
        self.execute(&self.cmd().args(["apply", "-n", namespace, "-f"]).path_arg(file))?;
        Ok(())
    }

    pub(crate) fn apply_stdin(&self, namespace: &str, document: String) -> Result<(), IstioError> {
        self.execute(&self.cmd().args(["apply", "-n", namespace, "-f", "-"]).stdin(document))?;
        Ok(())
    }

    pub(crate) fn delete(&self, namespace: &str, source: &str) -> Result<(), IstioError> {
        self.execute(&self.cmd().args(["delete", "-n", namespace, "-f", source, "--ignore-not-found"]))?;
        Ok(())
    }

    /// `oc wait --for=condition=<condition> <target> -n <ns> --timeout=<secs>s`.
    pub(crate) fn wait(
        &self,
        condition: &str,
        target: &[&str],
        namespace: &str,
        timeout: Duration,
    ) -> Result<(), IstioError> {
        self.execute(
            &self
                .cmd()
                .arg("wait")
                .arg(format!("--for=condition={condition}"))
                .args(target.iter().copied())
                .args(["-n", namespace])
                .arg(format!("--timeout={}s", timeout.as_secs())),
        )?;
        Ok(())
    }
}
