use moitt_domain::config::ToolConfig;
use moitt_exec::{Output, RecordingRunner, SharedRunner};
use moitt_istio::{IstioError, Operator};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn operator(tag: &str) -> (Operator, Arc<RecordingRunner>) {
    let recorder = Arc::new(RecordingRunner::new());
    let runner: SharedRunner = recorder.clone();
    (Operator::new("maistra-1.0", tag, ToolConfig::default(), runner), recorder)
}

#[test]
fn deploy_es_creates_namespace_and_applies_each_manifest() {
    let (operator, runner) = operator("latest-1.0-qe");
    runner.respond(&["oc", "get", "namespace"], Output::failure(1, "NotFound"));

    operator.deploy_es().unwrap();

    let config = ToolConfig::default();
    let es = &config.operators.elasticsearch;
    let mut expected =
        vec!["oc get namespace openshift-operators".to_owned(), "oc create namespace openshift-operators".to_owned()];
    expected.extend(es.manifests.iter().map(|m| format!("oc apply -n openshift-operators -f {m}")));
    assert_eq!(runner.command_lines(), expected);
}

#[test]
fn existing_namespace_is_not_recreated() {
    let (operator, runner) = operator("t");
    operator.deploy_kiali().unwrap();

    let lines = runner.command_lines();
    assert_eq!(lines[0], "oc get namespace kiali-operator");
    assert!(lines.iter().all(|l| !l.starts_with("oc create namespace")));
    assert!(lines[1..].iter().all(|l| l.starts_with("oc apply -n kiali-operator -f ")));
}

#[test]
fn deploy_istio_uses_branch_manifest() {
    let (operator, runner) = operator("t");
    operator.deploy_istio().unwrap();

    assert_eq!(
        runner.command_lines(),
        [
            "oc get namespace istio-operator",
            "oc apply -n istio-operator -f https://raw.githubusercontent.com/Maistra/istio-operator/maistra-1.0/deploy/servicemesh-operator.yaml",
        ]
    );
}

#[test]
fn deploy_quay_istio_switches_image_to_tag() {
    let (operator, runner) = operator("1.0.2");
    operator.deploy_quay_istio().unwrap();

    let lines = runner.command_lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[2],
        "oc set image deployment/istio-operator istio-operator=quay.io/maistra/istio-ubi8-operator:1.0.2 -n istio-operator"
    );
}

#[test]
fn patch41_only_applies_on_4_1_clusters() {
    let (operator, runner) = operator("t");
    operator.clone().ocp_version("4.2.0").patch41().unwrap();
    operator.clone().ocp_version("4.10.3").patch41().unwrap();
    operator.clone().ocp_version("4.12").patch41().unwrap();
    operator.patch41().unwrap();
    assert!(runner.calls().is_empty(), "only 4.1.x needs the OperatorGroup");

    operator.clone().ocp_version("4.1").patch41().unwrap();
    runner.clear();
    operator.ocp_version("4.1.13").patch41().unwrap();
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to_string(), "oc apply -n istio-operator -f -");

    let group: serde_json::Value = serde_json::from_str(calls[0].stdin_data().unwrap()).unwrap();
    assert_eq!(group["kind"], "OperatorGroup");
    assert_eq!(group["metadata"]["namespace"], "istio-operator");
}

#[test]
fn check_waits_for_every_operator() {
    let (operator, runner) = operator("t");
    operator.check().unwrap();

    assert_eq!(
        runner.command_lines(),
        [
            "oc wait --for=condition=Available deployment/elasticsearch-operator -n openshift-operators --timeout=300s",
            "oc wait --for=condition=Available deployment/jaeger-operator -n observability --timeout=300s",
            "oc wait --for=condition=Available deployment/kiali-operator -n kiali-operator --timeout=300s",
            "oc wait --for=condition=Available deployment/istio-operator -n istio-operator --timeout=300s",
        ]
    );
}

#[test]
fn check_failure_names_the_deployment() {
    let (operator, runner) = operator("t");
    runner.respond(&["oc", "wait", "--for=condition=Available", "deployment/jaeger-operator"], Output::failure(1, "timed out"));

    let err = operator.check().unwrap_err();
    assert!(matches!(err, IstioError::Exec { .. }));
    assert!(err.to_string().contains("jaeger-operator did not become available"));
    assert_eq!(runner.calls().len(), 2);
}

#[test]
fn add_anyuid_targets_the_service_account() {
    let (operator, runner) = operator("t");
    operator.add_anyuid("bookinfo-productpage", "bookinfo").unwrap();
    assert_eq!(
        runner.command_lines(),
        ["oc adm policy add-scc-to-user anyuid -z bookinfo-productpage -n bookinfo"]
    );
}

#[test]
fn uninstall_deletes_in_reverse_install_order() {
    let (operator, runner) = operator("t");
    operator.uninstall_quay_istio().unwrap();
    operator.uninstall().unwrap();

    let lines = runner.command_lines();
    assert_eq!(lines[0], "oc delete deployment istio-operator -n istio-operator --ignore-not-found");
    assert!(lines[1].starts_with("oc delete -n istio-operator -f "));
    assert!(lines[1].ends_with("servicemesh-operator.yaml --ignore-not-found"));

    let config = ToolConfig::default();
    let first_es = &config.operators.elasticsearch.manifests[0];
    assert_eq!(lines.last().unwrap(), &format!("oc delete -n openshift-operators -f {first_es} --ignore-not-found"));
    assert!(lines[2].starts_with("oc delete -n kiali-operator -f "));
    assert!(lines[1..].iter().all(|l| l.ends_with("--ignore-not-found")));
}

#[test]
fn mutate_pins_hub_and_tag_in_place() {
    let dir = tempdir().unwrap();
    let cr = dir.path().join("cr.yaml");
    fs::write(&cr, "apiVersion: maistra.io/v1\nkind: ServiceMeshControlPlane\nmetadata:\n  name: basic-install\n").unwrap();

    let (operator, runner) = operator("latest-1.0-qe");
    operator.mutate(Some(cr.as_path())).unwrap();

    let doc: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&cr).unwrap()).unwrap();
    assert_eq!(doc["spec"]["istio"]["global"]["tag"], "latest-1.0-qe");
    assert_eq!(doc["spec"]["istio"]["global"]["hub"], "quay.io/maistra");
    assert_eq!(doc["metadata"]["name"], "basic-install");
    assert!(runner.calls().is_empty());
}

#[test]
fn mutate_without_file_is_a_no_op() {
    let (operator, runner) = operator("t");
    operator.mutate(None).unwrap();
    assert!(runner.calls().is_empty());
}

#[test]
fn mutate_reports_missing_file() {
    let dir = tempdir().unwrap();
    let (operator, _runner) = operator("t");
    let err = operator.mutate(Some(dir.path().join("missing.yaml").as_path())).unwrap_err();
    assert!(matches!(err, IstioError::Io { .. }));
}
