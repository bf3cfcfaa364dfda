//! Fixed names and defaults of the Maistra QE test environment.

// Environment variables
pub const ENV_AWS_PROFILE: &str = "AWS_PROFILE";
pub const ENV_PULL_SECRET: &str = "PULL_SEC";
pub const ENV_CR_FILE: &str = "CR_FILE";
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";
pub const ENV_IKE_PASSWORD: &str = "IKE_PWD";
pub const ENV_ASLAK_PASSWORD: &str = "ASLAK_PWD";
pub const ENV_BARTOSZ_PASSWORD: &str = "BARTOSZ_PWD";
pub const ENV_QE1_PASSWORD: &str = "QE1_PWD";
pub const ENV_QE2_PASSWORD: &str = "QE2_PWD";

/// Prefix of configuration overrides, e.g. `MOITT__OCP__REGION`.
pub const CONFIG_ENV_PREFIX: &str = "MOITT";
/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "moitt.toml";

// CLI defaults
pub const DEFAULT_ASSETS_DIR: &str = "./assets";
pub const DEFAULT_OCP_VERSION: &str = "4.2.0";
pub const DEFAULT_TAG: &str = "latest-1.0-qe";

// Installer assets, relative to the assets directory
pub const KUBECONFIG_FILE: &str = "auth/kubeconfig";
pub const KUBEADMIN_PASSWORD_FILE: &str = "auth/kubeadmin-password";
pub const INSTALL_CONFIG_FILE: &str = "install-config.yaml";

// Users
pub const KUBEADMIN: &str = "kubeadmin";
pub const IKE: &str = "ike";
pub const ASLAK: &str = "aslak";
pub const BARTOSZ: &str = "bartosz";
pub const QE1: &str = "qe1";
pub const QE2: &str = "qe2";
pub const QE1_DEFAULT_PASSWORD: &str = "qe1pw";
pub const QE2_DEFAULT_PASSWORD: &str = "qe2pw";

// Service mesh
pub const MAISTRA_BRANCH: &str = "maistra-1.0";
pub const CONTROL_PLANE_NAME: &str = "basic-install";
pub const CONTROL_PLANE_NAMESPACE: &str = "service-mesh-1";
pub const SAMPLE_NAMESPACE: &str = "bookinfo";
pub const MEMBER_NAMESPACES: [&str; 4] = ["bookinfo", "foo", "bar", "legacy"];
pub const MEMBER_ROLL_FILE: &str = "member-roll.yaml";
pub const SAMPLE_FILE: &str = "bookinfo.yaml";

/// Bookinfo service accounts that need the `anyuid` SCC.
pub const ANYUID_SERVICE_ACCOUNTS: [&str; 4] =
    ["bookinfo-productpage", "bookinfo-reviews", "bookinfo-ratings-v2", "default"];
