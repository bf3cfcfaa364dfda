//! Manifest list for the registry-puller controller.

use crate::error::{PullerError, PullerErrorExt};
use base64::{Engine as _, engine::general_purpose};
use moitt_domain::config::PullerConfig;
use serde_json::{Value, json};

const APP: &str = "registry-puller";
const SECRET_NAME: &str = "registry-puller-pull-secret";

/// Validates `pull_secret` as a docker config (`{"auths": {...}}`) and renders the
/// resources that run the puller with it.
pub(crate) fn render(config: &PullerConfig, pull_secret: &str) -> Result<Value, PullerError> {
    let parsed: Value = serde_json::from_str(pull_secret).context("Pull secret is not valid JSON")?;
    if !parsed.get("auths").is_some_and(Value::is_object) {
        return Err("Pull secret has no `auths` map".into());
    }

    let ns = config.namespace.as_str();
    let encoded = general_purpose::STANDARD.encode(pull_secret.trim());
    let labels = json!({ "app": APP });

    Ok(json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": [
            {
                "apiVersion": "v1",
                "kind": "Namespace",
                "metadata": { "name": ns, "labels": labels }
            },
            {
                "apiVersion": "v1",
                "kind": "Secret",
                "type": "kubernetes.io/dockerconfigjson",
                "metadata": { "name": SECRET_NAME, "namespace": ns, "labels": labels },
                "data": { ".dockerconfigjson": encoded }
            },
            {
                "apiVersion": "v1",
                "kind": "ServiceAccount",
                "metadata": { "name": APP, "namespace": ns, "labels": labels }
            },
            {
                "apiVersion": "rbac.authorization.k8s.io/v1",
                "kind": "ClusterRole",
                "metadata": { "name": APP, "labels": labels },
                "rules": [
                    { "apiGroups": [""], "resources": ["namespaces"], "verbs": ["get", "list", "watch"] },
                    {
                        "apiGroups": [""],
                        "resources": ["secrets", "serviceaccounts"],
                        "verbs": ["get", "list", "watch", "create", "update", "patch"]
                    }
                ]
            },
            {
                "apiVersion": "rbac.authorization.k8s.io/v1",
                "kind": "ClusterRoleBinding",
                "metadata": { "name": APP, "labels": labels },
                "roleRef": { "apiGroup": "rbac.authorization.k8s.io", "kind": "ClusterRole", "name": APP },
                "subjects": [{ "kind": "ServiceAccount", "name": APP, "namespace": ns }]
            },
            {
                "apiVersion": "apps/v1",
                "kind": "Deployment",
                "metadata": { "name": APP, "namespace": ns, "labels": labels },
                "spec": {
                    "replicas": 1,
                    "selector": { "matchLabels": labels },
                    "template": {
                        "metadata": { "labels": labels },
                        "spec": {
                            "serviceAccountName": APP,
                            "containers": [{
                                "name": APP,
                                "image": config.image,
                                "env": [
                                    { "name": "PULL_SECRET_NAME", "value": SECRET_NAME },
                                    { "name": "PULL_SECRET_NAMESPACE", "value": ns }
                                ]
                            }]
                        }
                    }
                }
            }
        ]
    }))
}
