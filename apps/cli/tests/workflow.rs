use clap::Parser;
use moitt::domain::config::ToolConfig;
use moitt::exec::{Output, RecordingRunner, SharedRunner};
use moitt::kernel::env::Environment;
use moitt_cli::models::args::Cli;
use moitt_cli::session::{Credentials, Session};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{TempDir, tempdir};

const PAGE: &str = "<title>Simple Bookstore App</title>";

struct Harness {
    dir: TempDir,
    runner: Arc<RecordingRunner>,
}

impl Harness {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pull-secret.json"), r#"{"auths":{"quay.io":{"auth":"eA=="}}}"#).unwrap();
        fs::create_dir_all(dir.path().join("assets/auth")).unwrap();
        fs::write(dir.path().join("assets/auth/kubeadmin-password"), "admin-pw\n").unwrap();
        Self { dir, runner: Arc::new(RecordingRunner::new()) }
    }

    fn path(&self, relative: &str) -> String {
        self.dir.path().join(relative).display().to_string()
    }

    fn session(&self, args: &[&str], extra_env: &[(&str, &str)]) -> Session {
        let assets = self.path("assets");
        let mut argv = vec!["moitt", "-d", assets.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let pull_secret = self.path("pull-secret.json");
        let mut pairs = vec![("AWS_PROFILE", "qe"), ("PULL_SEC", pull_secret.as_str())];
        pairs.extend_from_slice(extra_env);
        let env = Environment::from_pairs(pairs);
        let credentials = Credentials::from_env(&env).unwrap();

        let mut config = ToolConfig::default();
        config.tools.openshift_install = Some("openshift-install".into());
        config.puller.work_dir = self.dir.path().join("work");

        let runner: SharedRunner = self.runner.clone();
        Session::new(&cli, env, credentials, config, runner, self.dir.path())
    }

    fn session_lines(&self) -> Vec<String> {
        self.runner
            .command_lines()
            .into_iter()
            .filter(|l| l.starts_with("oc login") || l == "oc logout")
            .collect()
    }
}

fn login(user: &str) -> String {
    format!("oc login -u {user} -p ****** --insecure-skip-tls-verify=true")
}

const DEV_PASSWORDS: [(&str, &str); 3] = [("IKE_PWD", "i"), ("ASLAK_PWD", "a"), ("BARTOSZ_PWD", "b")];

#[test]
fn ocp_install_creates_cluster_users_then_verifies_logins() {
    let h = Harness::new();
    moitt_cli::run(&h.session(&["-i", "-c", "ocp"], &DEV_PASSWORDS)).unwrap();

    let lines = h.runner.command_lines();
    assert_eq!(lines[0], format!("openshift-install create cluster --dir {} --log-level info", h.path("assets")));
    assert_eq!(lines[1], login("kubeadmin"));

    let htpasswd: Vec<&String> = lines.iter().filter(|l| l.starts_with("htpasswd")).collect();
    assert_eq!(htpasswd.len(), 5);
    assert!(htpasswd[0].contains(" -c "));
    for (line, user) in htpasswd.iter().zip(["ike", "aslak", "bartosz", "qe1", "qe2"]) {
        assert!(line.ends_with(&format!(" {user} ******")), "{line}");
    }

    assert_eq!(
        h.session_lines(),
        [
            login("kubeadmin"),
            "oc logout".to_owned(),
            login("ike"),
            "oc logout".to_owned(),
            login("aslak"),
            "oc logout".to_owned(),
            login("bartosz"),
            "oc logout".to_owned(),
        ]
    );
}

#[test]
fn ocp_install_requires_developer_passwords_before_installing() {
    let h = Harness::new();
    let err = moitt_cli::run(&h.session(&["-i", "-c", "ocp"], &[("IKE_PWD", "i")])).unwrap_err();

    assert!(err.to_string().contains("ASLAK_PWD"));
    assert!(h.runner.calls().is_empty());
}

#[test]
fn ocp_uninstall_only_destroys_the_cluster() {
    let h = Harness::new();
    moitt_cli::run(&h.session(&["-u", "-c", "ocp"], &[])).unwrap();

    assert_eq!(
        h.runner.command_lines(),
        [format!("openshift-install destroy cluster --dir {} --log-level info", h.path("assets"))]
    );
}

#[test]
fn registry_puller_install_builds_and_applies_between_login_and_logout() {
    let h = Harness::new();
    moitt_cli::run(&h.session(&["-i", "-c", "registry-puller"], &[])).unwrap();

    assert_eq!(
        h.runner.command_lines(),
        [login("kubeadmin"), format!("oc apply -f {}", h.path("work/registry-puller.json")), "oc logout".to_owned()]
    );
}

#[test]
fn registry_puller_uninstall_only_logs_in_and_out() {
    let h = Harness::new();
    moitt_cli::run(&h.session(&["-u", "-c", "registry-puller"], &[])).unwrap();

    assert_eq!(h.runner.command_lines(), [login("kubeadmin"), "oc logout".to_owned()]);
    assert!(!h.dir.path().join("work/registry-puller.json").exists());
}

#[test]
fn kubeadmin_password_is_reread_for_every_login() {
    let h = Harness::new();
    let session = h.session(&["-u", "-c", "registry-puller"], &[]);
    fs::write(h.dir.path().join("assets/auth/kubeadmin-password"), "rotated\n").unwrap();

    moitt_cli::run(&session).unwrap();

    let password: Vec<String> = h.runner.calls()[0].arg_values().map(str::to_owned).collect();
    assert!(password.contains(&"rotated".to_owned()));
}

#[test]
fn missing_password_file_aborts_before_any_command() {
    let h = Harness::new();
    fs::remove_file(h.dir.path().join("assets/auth/kubeadmin-password")).unwrap();

    let err = moitt_cli::run(&h.session(&["-i", "-c", "registry-puller"], &[])).unwrap_err();
    assert!(format!("{err:#}").contains("kubeadmin-password"));
    assert!(h.runner.calls().is_empty());
}

fn write_sample(dir: &Path) {
    fs::write(dir.join("bookinfo.yaml"), "kind: List\n").unwrap();
}

#[test]
fn istio_install_runs_admin_then_qe1_then_admin() {
    let h = Harness::new();
    write_sample(h.dir.path());
    h.runner.respond(&["oc", "exec"], Output::success(PAGE));

    moitt_cli::run(&h.session(&["-i", "-c", "istio"], &[])).unwrap();

    assert_eq!(
        h.session_lines(),
        [
            login("kubeadmin"),
            "oc logout".to_owned(),
            login("qe1"),
            "oc logout".to_owned(),
            login("kubeadmin"),
            "oc logout".to_owned(),
        ]
    );

    let lines = h.runner.command_lines();
    let position = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();
    assert!(position("elasticsearch-operator") < position("jaeger-operator"));
    assert!(position("jaeger-operator") < position("kiali-operator"));
    assert!(position("servicemesh-operator.yaml") < position("login -u qe1"));
    assert!(position("login -u qe1") < position("oc exec deploy/ratings-v1"));
    assert!(position("smcp/basic-install") > position("oc exec deploy/ratings-v1"));
    assert!(lines.iter().all(|l| !l.starts_with("oc set image")));

    let anyuid: Vec<&String> = lines.iter().filter(|l| l.contains("add-scc-to-user anyuid")).collect();
    assert_eq!(anyuid.len(), 4);
    assert!(anyuid[0].ends_with("-z bookinfo-productpage -n bookinfo"));
    assert!(anyuid[3].ends_with("-z default -n bookinfo"));
    assert!(position("-z default -n bookinfo") > position("smcp/basic-install"));
}

#[test]
fn istio_install_with_quay_swaps_operator_image() {
    let h = Harness::new();
    write_sample(h.dir.path());
    h.runner.respond(&["oc", "exec"], Output::success(PAGE));

    moitt_cli::run(&h.session(&["-i", "-c", "istio", "-q", "-t", "1.0.3"], &[("QE1_PWD", "secret-qe1")])).unwrap();

    let lines = h.runner.command_lines();
    assert!(lines.iter().any(|l| l.contains("istio-operator=quay.io/maistra/istio-ubi8-operator:1.0.3")));

    let qe1_login = h.runner.calls().into_iter().find(|c| c.starts_with(&["oc", "login", "-u", "qe1"])).unwrap();
    assert!(qe1_login.arg_values().any(|a| a == "secret-qe1"));
}

#[test]
fn istio_install_stops_at_failed_smoke_check() {
    let h = Harness::new();
    write_sample(h.dir.path());
    h.runner.respond(&["oc", "exec"], Output::success("no healthy upstream"));

    let err = moitt_cli::run(&h.session(&["-i", "-c", "istio"], &[])).unwrap_err();
    assert!(err.to_string().contains("Smoke check failed"));

    let lines = h.runner.command_lines();
    assert!(lines.last().unwrap().starts_with("oc exec"));
    assert!(lines.iter().all(|l| !l.contains("smcp/")));
}

#[test]
fn istio_install_pins_the_cr_to_the_tag() {
    let h = Harness::new();
    write_sample(h.dir.path());
    h.runner.respond(&["oc", "exec"], Output::success(PAGE));
    let cr = h.path("cr.yaml");
    fs::write(&cr, "kind: ServiceMeshControlPlane\n").unwrap();

    moitt_cli::run(&h.session(&["-i", "-c", "istio", "-t", "1.0.4"], &[("CR_FILE", cr.as_str())])).unwrap();

    assert!(fs::read_to_string(&cr).unwrap().contains("1.0.4"));
    assert!(h.runner.command_lines().contains(&format!("oc apply -n service-mesh-1 -f {cr}")));
}

#[test]
fn istio_uninstall_runs_qe1_then_admin() {
    let h = Harness::new();
    moitt_cli::run(&h.session(&["-u", "-c", "istio", "-q"], &[])).unwrap();

    assert_eq!(h.session_lines(), [login("qe1"), "oc logout".to_owned(), login("kubeadmin"), "oc logout".to_owned()]);

    let lines = h.runner.command_lines();
    let quay = lines.iter().position(|l| l.starts_with("oc delete deployment istio-operator")).unwrap();
    let smmr = lines.iter().position(|l| l.starts_with("oc delete smmr default")).unwrap();
    assert!(smmr < quay);
    assert!(lines[quay + 1].contains("servicemesh-operator.yaml"));
}

#[test]
fn no_component_runs_nothing() {
    let h = Harness::new();
    moitt_cli::run(&h.session(&["-i"], &[])).unwrap();
    assert!(h.runner.calls().is_empty());
}
