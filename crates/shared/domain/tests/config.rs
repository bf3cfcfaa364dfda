use moitt_domain::config::{OcpConfig, TimeoutConfig, ToolConfig, ToolPaths};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let tools = ToolPaths::default();
    assert_eq!(tools.oc, "oc");
    assert!(tools.openshift_install.is_none());

    let ocp = OcpConfig::default();
    assert_eq!(ocp.installer_mirror, "https://mirror.openshift.com/pub/openshift-v4/clients/ocp");
    assert_eq!(ocp.identity_provider, "htpasswd_provider");

    let cfg = ToolConfig::default();
    assert_eq!(cfg.operators.istio.namespace, "istio-operator");
    assert_eq!(cfg.operators.jaeger.manifests.len(), 5);
    assert!(cfg.operators.elasticsearch.manifests.iter().all(|m| m.starts_with("https://")));

    let timeouts = TimeoutConfig::default();
    assert!(timeouts.control_plane_secs >= timeouts.operator_secs);
}

#[test]
fn tool_config_deserializes_partial_documents() {
    let raw = json!({
        "tools": { "oc": "/usr/local/bin/oc" },
        "ocp": { "region": "eu-west-1", "ssh_key": "/home/qe/.ssh/id_rsa.pub" },
        "timeouts": { "operator_secs": 30 }
    });

    let cfg: ToolConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.tools.oc, "/usr/local/bin/oc");
    assert_eq!(cfg.tools.htpasswd, "htpasswd");
    assert_eq!(cfg.ocp.region, "eu-west-1");
    assert_eq!(cfg.ocp.cluster_name, "maistra-qe");
    assert_eq!(cfg.ocp.ssh_key.as_deref(), Some(std::path::Path::new("/home/qe/.ssh/id_rsa.pub")));
    assert_eq!(cfg.timeouts.operator_secs, 30);
    assert_eq!(cfg.timeouts.pods_secs, 300);
}

#[test]
fn tool_config_clones_share_until_mutated() {
    let base = ToolConfig::default();
    let mut tweaked = base.clone();
    tweaked.ocp.region = "ap-south-1".to_owned();

    assert_eq!(base.ocp.region, "us-east-1");
    assert_eq!(tweaked.ocp.region, "ap-south-1");
}
