use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the collaborators need besides the CLI flags.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfigInner {
    pub tools: ToolPaths,
    pub ocp: OcpConfig,
    pub puller: PullerConfig,
    pub operators: OperatorsConfig,
    pub control_plane: ControlPlaneConfig,
    pub timeouts: TimeoutConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into collaborators.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ToolConfig {
    #[serde(flatten, default)]
    inner: Arc<ToolConfigInner>,
}

impl Deref for ToolConfig {
    type Target = ToolConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ToolConfig {
    fn deref_mut(&mut self) -> &mut ToolConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// External binaries. Plain names are resolved through `PATH`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub oc: String,
    /// Explicit installer binary; downloaded for the requested version when unset.
    pub openshift_install: Option<PathBuf>,
    pub htpasswd: String,
    pub curl: String,
    pub tar: String,
}

/// OpenShift installation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcpConfig {
    /// Base URL of the installer tarballs, one sub-directory per version.
    pub installer_mirror: String,
    /// Where downloaded installers are unpacked, one sub-directory per version.
    pub cache_dir: PathBuf,
    pub base_domain: String,
    pub cluster_name: String,
    pub region: String,
    pub ssh_key: Option<PathBuf>,
    pub log_level: String,
    pub htpasswd_secret: String,
    pub identity_provider: String,
}

/// Registry-puller deployment settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PullerConfig {
    pub image: String,
    pub namespace: String,
    pub work_dir: PathBuf,
}

/// One operator installed from plain manifests.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorManifests {
    pub namespace: String,
    pub deployment: String,
    pub manifests: Vec<String>,
}

/// The Maistra istio-operator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IstioOperatorConfig {
    pub namespace: String,
    pub deployment: String,
    /// Raw content root of the operator repository; the branch is appended.
    pub manifest_base: String,
    pub manifest_path: String,
    pub quay_image: String,
    /// Image hub written into control plane CRs.
    pub hub: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OperatorsConfig {
    pub elasticsearch: OperatorManifests,
    pub jaeger: OperatorManifests,
    pub kiali: OperatorManifests,
    pub istio: IstioOperatorConfig,
}

/// Control plane and smoke test settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlPlaneConfig {
    /// CR applied when `CR_FILE` is unset.
    pub default_cr: String,
    pub smoke_workload: String,
    pub smoke_container: String,
    pub smoke_url: String,
    pub smoke_marker: String,
}

/// `oc wait` timeouts, in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub operator_secs: u64,
    pub control_plane_secs: u64,
    pub pods_secs: u64,
}

// --- Default ---

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            oc: "oc".to_owned(),
            openshift_install: None,
            htpasswd: "htpasswd".to_owned(),
            curl: "curl".to_owned(),
            tar: "tar".to_owned(),
        }
    }
}

impl Default for OcpConfig {
    fn default() -> Self {
        Self {
            installer_mirror: "https://mirror.openshift.com/pub/openshift-v4/clients/ocp".to_owned(),
            cache_dir: PathBuf::from(".moitt/bin"),
            base_domain: "devcluster.openshift.com".to_owned(),
            cluster_name: "maistra-qe".to_owned(),
            region: "us-east-1".to_owned(),
            ssh_key: None,
            log_level: "info".to_owned(),
            htpasswd_secret: "htpass-secret".to_owned(),
            identity_provider: "htpasswd_provider".to_owned(),
        }
    }
}

impl Default for PullerConfig {
    fn default() -> Self {
        Self {
            image: "quay.io/maistra/registry-puller:1.0".to_owned(),
            namespace: "registry-puller".to_owned(),
            work_dir: PathBuf::from(".moitt/puller"),
        }
    }
}

impl Default for OperatorsConfig {
    fn default() -> Self {
        let es = "https://raw.githubusercontent.com/openshift/elasticsearch-operator/release-4.2/manifests";
        let jaeger = "https://raw.githubusercontent.com/jaegertracing/jaeger-operator/v1.13.1/deploy";
        let kiali = "https://raw.githubusercontent.com/kiali/kiali-operator/v1.0.0/deploy";

        Self {
            elasticsearch: OperatorManifests {
                namespace: "openshift-operators".to_owned(),
                deployment: "elasticsearch-operator".to_owned(),
                manifests: [
                    "01-service-account.yaml",
                    "02-role.yaml",
                    "03-role-bindings.yaml",
                    "04-crd.yaml",
                    "05-deployment.yaml",
                ]
                .iter()
                .map(|f| format!("{es}/{f}"))
                .collect(),
            },
            jaeger: OperatorManifests {
                namespace: "observability".to_owned(),
                deployment: "jaeger-operator".to_owned(),
                manifests: [
                    "crds/jaegertracing_v1_jaeger_crd.yaml",
                    "service_account.yaml",
                    "role.yaml",
                    "role_binding.yaml",
                    "operator.yaml",
                ]
                .iter()
                .map(|f| format!("{jaeger}/{f}"))
                .collect(),
            },
            kiali: OperatorManifests {
                namespace: "kiali-operator".to_owned(),
                deployment: "kiali-operator".to_owned(),
                manifests: [
                    "crd.yaml",
                    "service_account.yaml",
                    "role.yaml",
                    "role_binding.yaml",
                    "operator.yaml",
                ]
                .iter()
                .map(|f| format!("{kiali}/{f}"))
                .collect(),
            },
            istio: IstioOperatorConfig::default(),
        }
    }
}

impl Default for IstioOperatorConfig {
    fn default() -> Self {
        Self {
            namespace: "istio-operator".to_owned(),
            deployment: "istio-operator".to_owned(),
            manifest_base: "https://raw.githubusercontent.com/Maistra/istio-operator".to_owned(),
            manifest_path: "deploy/servicemesh-operator.yaml".to_owned(),
            quay_image: "quay.io/maistra/istio-ubi8-operator".to_owned(),
            hub: "quay.io/maistra".to_owned(),
        }
    }
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            default_cr: "https://raw.githubusercontent.com/Maistra/istio-operator/maistra-1.0/deploy/examples/maistra_v1_servicemeshcontrolplane_cr_basic.yaml".to_owned(),
            smoke_workload: "deploy/ratings-v1".to_owned(),
            smoke_container: "ratings".to_owned(),
            smoke_url: "http://productpage:9080/productpage".to_owned(),
            smoke_marker: "<title>Simple Bookstore App</title>".to_owned(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { operator_secs: 300, control_plane_secs: 600, pods_secs: 300 }
    }
}
