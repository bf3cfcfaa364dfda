use moitt_domain::config::ToolConfig;
use moitt_domain::users::TestUser;
use moitt_exec::{Output, RecordingRunner, SharedRunner};
use moitt_ocp::{Ocp, OcpError};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{TempDir, tempdir};

struct Fixture {
    dir: TempDir,
    runner: Arc<RecordingRunner>,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pull-secret.json"), "{\"auths\":{}}").unwrap();
        Self { dir, runner: Arc::new(RecordingRunner::new()) }
    }

    fn assets(&self) -> std::path::PathBuf {
        self.dir.path().join("assets")
    }

    fn ocp_with(&self, config: ToolConfig) -> Ocp {
        let runner: SharedRunner = self.runner.clone();
        Ocp::new(
            "qe-profile",
            self.assets(),
            "4.2.0",
            self.dir.path().join("pull-secret.json"),
            config,
            runner,
        )
    }

    /// Installer pre-placed in the cache so nothing is downloaded.
    fn ocp(&self) -> Ocp {
        let mut config = ToolConfig::default();
        config.ocp.cache_dir = self.dir.path().join("cache");
        let cached = config.ocp.cache_dir.join("4.2.0");
        fs::create_dir_all(&cached).unwrap();
        fs::write(cached.join("openshift-install"), "").unwrap();
        self.ocp_with(config)
    }

    fn path(&self, relative: &str) -> String {
        self.dir.path().join(relative).display().to_string()
    }
}

fn write_password(assets: &Path, password: &str) {
    fs::create_dir_all(assets.join("auth")).unwrap();
    fs::write(assets.join("auth/kubeadmin-password"), password).unwrap();
}

#[test]
fn install_renders_config_and_creates_cluster_with_profile() {
    let fx = Fixture::new();
    fx.ocp().install().unwrap();

    let calls = fx.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].to_string(),
        format!(
            "{} create cluster --dir {} --log-level info",
            fx.path("cache/4.2.0/openshift-install"),
            fx.path("assets")
        )
    );
    assert!(calls[0].envs().contains(&("AWS_PROFILE".to_owned(), "qe-profile".to_owned())));

    let rendered = fs::read_to_string(fx.assets().join("install-config.yaml")).unwrap();
    assert!(rendered.contains("pullSecret"));
    assert!(rendered.contains("maistra-qe"));
}

#[test]
fn install_keeps_existing_install_config() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.assets()).unwrap();
    fs::write(fx.assets().join("install-config.yaml"), "custom: true\n").unwrap();

    fx.ocp().install().unwrap();
    assert_eq!(fs::read_to_string(fx.assets().join("install-config.yaml")).unwrap(), "custom: true\n");
}

#[test]
fn missing_installer_is_downloaded_for_the_version() {
    let fx = Fixture::new();
    let mut config = ToolConfig::default();
    config.ocp.cache_dir = fx.dir.path().join("cache");
    config.ocp.installer_mirror = "https://mirror.example/ocp/".to_owned();

    fx.ocp_with(config).install().unwrap();

    let lines = fx.runner.command_lines();
    let tarball = fx.path("cache/4.2.0/openshift-install-linux-4.2.0.tar.gz");
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        format!("curl -fsSL -o {tarball} https://mirror.example/ocp/4.2.0/openshift-install-linux-4.2.0.tar.gz")
    );
    assert_eq!(lines[1], format!("tar -xzf {tarball} -C {} openshift-install", fx.path("cache/4.2.0")));
    assert!(lines[2].contains("create cluster"));
}

#[test]
fn configured_installer_skips_download() {
    let fx = Fixture::new();
    let mut config = ToolConfig::default();
    config.tools.openshift_install = Some("/opt/bin/openshift-install".into());

    fx.ocp_with(config).uninstall().unwrap();

    assert_eq!(
        fx.runner.command_lines(),
        [format!("/opt/bin/openshift-install destroy cluster --dir {} --log-level info", fx.path("assets"))]
    );
}

#[test]
fn failed_install_surfaces_the_command_error() {
    let fx = Fixture::new();
    let ocp = fx.ocp();
    let installer = fx.path("cache/4.2.0/openshift-install");
    fx.runner.respond(&[installer.as_str()], Output::failure(1, "quota exceeded"));

    let err = ocp.install().unwrap_err();
    assert!(matches!(err, OcpError::Exec { .. }));
    assert!(err.to_string().contains("quota exceeded"));
}

#[test]
fn login_redacts_the_password() {
    let fx = Fixture::new();
    let ocp = fx.ocp();
    ocp.login("kubeadmin", "s3cret-pw").unwrap();
    ocp.logout().unwrap();

    assert_eq!(
        fx.runner.command_lines(),
        ["oc login -u kubeadmin -p ****** --insecure-skip-tls-verify=true", "oc logout"]
    );
    let raw: Vec<String> = fx.runner.calls()[0].arg_values().map(str::to_owned).collect();
    assert!(raw.contains(&"s3cret-pw".to_owned()));
}

#[test]
fn rejected_login_names_the_user() {
    let fx = Fixture::new();
    let ocp = fx.ocp();
    fx.runner.respond(&["oc", "login"], Output::failure(1, "Login failed (401 Unauthorized)"));

    let err = ocp.login("ike", "wrong").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Login as ike"));
    assert!(!message.contains("wrong"));
}

#[test]
fn kubeadmin_password_is_read_from_assets() {
    let fx = Fixture::new();
    write_password(&fx.assets(), "abcde-12345\n");
    assert_eq!(fx.ocp().kubeadmin_password().unwrap(), "abcde-12345");
    assert_eq!(fx.ocp().kubeconfig(), fx.assets().join("auth/kubeconfig"));
}

#[test]
fn create_users_configures_htpasswd_provider() {
    let fx = Fixture::new();
    let users = [TestUser::new("ike", "a"), TestUser::new("qe1", "b")];
    fx.ocp().create_users(&users).unwrap();

    let htpasswd = fx.path("assets/users.htpasswd");
    let lines = fx.runner.command_lines();
    assert_eq!(
        lines,
        [
            format!("htpasswd -c -B -b {htpasswd} ike ******"),
            format!("htpasswd -B -b {htpasswd} qe1 ******"),
            "oc delete secret htpass-secret -n openshift-config --ignore-not-found".to_owned(),
            format!("oc create secret generic htpass-secret --from-file=htpasswd={htpasswd} -n openshift-config"),
            "oc apply -f -".to_owned(),
        ]
    );

    let calls = fx.runner.calls();
    let oauth: serde_json::Value = serde_json::from_str(calls[4].stdin_data().unwrap()).unwrap();
    assert_eq!(oauth["kind"], "OAuth");
    let provider = &oauth["spec"]["identityProviders"][0];
    assert_eq!(provider["name"], "htpasswd_provider");
    assert_eq!(provider["type"], "HTPasswd");
    assert_eq!(provider["mappingMethod"], "claim");
    assert_eq!(provider["htpasswd"]["fileData"]["name"], "htpass-secret");
}

#[test]
fn create_users_requires_at_least_one_user() {
    let fx = Fixture::new();
    let err = fx.ocp().create_users(&[]).unwrap_err();
    assert!(matches!(err, OcpError::Internal { .. }));
    assert!(fx.runner.calls().is_empty());
}
