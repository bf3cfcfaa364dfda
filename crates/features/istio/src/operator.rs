use crate::cr;
use crate::error::{IstioError, IstioErrorExt};
use crate::oc::Oc;
use moitt_domain::config::{OperatorManifests, ToolConfig};
use moitt_exec::SharedRunner;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

const OPERATOR_GROUP: &str = "istio-operator-group";

/// Installs the operators a Maistra control plane depends on, and the
/// istio-operator itself.
///
/// Every `deploy_*` step expects a cluster-admin session.
#[derive(Debug, Clone)]
pub struct Operator {
    branch: String,
    tag: String,
    ocp_version: Option<String>,
    config: ToolConfig,
    oc: Oc,
}

impl Operator {
    pub fn new(branch: impl Into<String>, tag: impl Into<String>, config: ToolConfig, runner: SharedRunner) -> Self {
        let oc = Oc::new(&config.tools.oc, runner);
        Self { branch: branch.into(), tag: tag.into(), ocp_version: None, config, oc }
    }

    /// Cluster version, consulted by [`Operator::patch41`].
    #[must_use]
    pub fn ocp_version(mut self, version: impl Into<String>) -> Self {
        self.ocp_version = Some(version.into());
        self
    }

    /// Rewrites the control plane CR so it pulls the images under test.
    pub fn mutate(&self, cr_file: Option<&Path>) -> Result<(), IstioError> {
        let Some(path) = cr_file else {
            debug!("No CR file given, the default control plane is used");
            return Ok(());
        };

        let raw = fs::read_to_string(path).context(format!("Failed to read CR {}", path.display()))?;
        let mut document: serde_yaml::Value =
            serde_yaml::from_str(&raw).context(format!("Failed to parse CR {}", path.display()))?;
        cr::pin_images(&mut document, &self.config.operators.istio.hub, &self.tag)?;
        fs::write(path, serde_yaml::to_string(&document)?)
            .context(format!("Failed to write CR {}", path.display()))?;

        info!(cr = %path.display(), tag = %self.tag, "Control plane CR pinned to tag");
        Ok(())
    }

    pub fn deploy_es(&self) -> Result<(), IstioError> {
        self.deploy_manifests("Elasticsearch", &self.config.operators.elasticsearch)
    }

    pub fn deploy_jaeger(&self) -> Result<(), IstioError> {
        self.deploy_manifests("Jaeger", &self.config.operators.jaeger)
    }

    pub fn deploy_kiali(&self) -> Result<(), IstioError> {
        self.deploy_manifests("Kiali", &self.config.operators.kiali)
    }

    /// Installs istio-operator from the Maistra branch manifests.
    #[instrument(skip(self), fields(branch = %self.branch))]
    pub fn deploy_istio(&self) -> Result<(), IstioError> {
        let istio = &self.config.operators.istio;
        self.oc.ensure_namespace(&istio.namespace)?;
        self.oc.apply(&istio.namespace, &self.istio_manifest()).context("Deploying istio-operator")?;
        info!("istio-operator deployed");
        Ok(())
    }

    /// Same as [`Operator::deploy_istio`], then swaps the operator image for the
    /// quay build of the configured tag.
    #[instrument(skip(self), fields(branch = %self.branch, tag = %self.tag))]
    pub fn deploy_quay_istio(&self) -> Result<(), IstioError> {
        self.deploy_istio()?;

        let istio = &self.config.operators.istio;
        let image = format!("{}={}:{}", istio.deployment, istio.quay_image, self.tag);
        self.oc
            .execute(
                &self
                    .oc
                    .cmd()
                    .args(["set", "image"])
                    .arg(format!("deployment/{}", istio.deployment))
                    .arg(image)
                    .args(["-n", istio.namespace.as_str()]),
            )
            .context("Switching istio-operator to the quay image")?;
        info!(image = %istio.quay_image, "istio-operator switched to quay image");
        Ok(())
    }

    /// OpenShift 4.1 needs an explicit `OperatorGroup` in the operator namespace.
    pub fn patch41(&self) -> Result<(), IstioError> {
        let Some(version) = self.ocp_version.as_deref().filter(|v| is_ocp_41(v)) else {
            debug!(version = ?self.ocp_version, "No 4.1 patch needed");
            return Ok(());
        };

        let namespace = &self.config.operators.istio.namespace;
        let group = json!({
            "apiVersion": "operators.coreos.com/v1",
            "kind": "OperatorGroup",
            "metadata": { "name": OPERATOR_GROUP, "namespace": namespace },
            "spec": {}
        });
        self.oc.apply_stdin(namespace, serde_json::to_string(&group)?).context("Applying 4.1 OperatorGroup")?;
        info!(version, "Applied 4.1 OperatorGroup");
        Ok(())
    }

    /// Waits for every operator deployment to become available.
    pub fn check(&self) -> Result<(), IstioError> {
        let timeout = Duration::from_secs(self.config.timeouts.operator_secs);
        let operators = &self.config.operators;
        let deployments = [
            (&operators.elasticsearch.namespace, &operators.elasticsearch.deployment),
            (&operators.jaeger.namespace, &operators.jaeger.deployment),
            (&operators.kiali.namespace, &operators.kiali.deployment),
            (&operators.istio.namespace, &operators.istio.deployment),
        ];

        for (namespace, deployment) in deployments {
            let target = format!("deployment/{deployment}");
            self.oc
                .wait("Available", &[target.as_str()], namespace, timeout)
                .context(format!("{deployment} did not become available"))?;
        }
        info!("Operators are available");
        Ok(())
    }

    /// Grants the `anyuid` SCC to a service account.
    pub fn add_anyuid(&self, service_account: &str, namespace: &str) -> Result<(), IstioError> {
        self.oc.execute(&self.oc.cmd().args([
            "adm",
            "policy",
            "add-scc-to-user",
            "anyuid",
            "-z",
            service_account,
            "-n",
            namespace,
        ]))?;
        Ok(())
    }

    pub fn uninstall_quay_istio(&self) -> Result<(), IstioError> {
        let istio = &self.config.operators.istio;
        self.oc.execute(&self.oc.cmd().args([
            "delete",
            "deployment",
            istio.deployment.as_str(),
            "-n",
            istio.namespace.as_str(),
            "--ignore-not-found",
        ]))?;
        Ok(())
    }

    /// Removes every operator, last installed first.
    #[instrument(skip(self))]
    pub fn uninstall(&self) -> Result<(), IstioError> {
        let istio = &self.config.operators.istio;
        self.oc.delete(&istio.namespace, &self.istio_manifest())?;

        let operators = &self.config.operators;
        for operator in [&operators.kiali, &operators.jaeger, &operators.elasticsearch] {
            for manifest in operator.manifests.iter().rev() {
                self.oc.delete(&operator.namespace, manifest)?;
            }
        }
        info!("Operators removed");
        Ok(())
    }

    fn istio_manifest(&self) -> String {
        let istio = &self.config.operators.istio;
        format!("{}/{}/{}", istio.manifest_base.trim_end_matches('/'), self.branch, istio.manifest_path)
    }

    #[instrument(skip(self, operator), fields(namespace = %operator.namespace))]
    fn deploy_manifests(&self, name: &str, operator: &OperatorManifests) -> Result<(), IstioError> {
        self.oc.ensure_namespace(&operator.namespace)?;
        for manifest in &operator.manifests {
            self.oc.apply(&operator.namespace, manifest).context(format!("Deploying {name} operator"))?;
        }
        info!("{name} operator deployed");
        Ok(())
    }
}

/// `4.1` and its patch releases, but not `4.10` and later.
fn is_ocp_41(version: &str) -> bool {
    version == "4.1" || version.starts_with("4.1.")
}
