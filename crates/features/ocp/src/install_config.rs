//! `install-config.yaml` rendering for AWS installs.

use crate::error::{OcpError, OcpErrorExt};
use moitt_domain::config::OcpConfig;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallConfig<'a> {
    api_version: &'static str,
    base_domain: &'a str,
    metadata: Metadata<'a>,
    platform: Platform<'a>,
    pull_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Platform<'a> {
    aws: Aws<'a>,
}

#[derive(Debug, Serialize)]
struct Aws<'a> {
    region: &'a str,
}

/// Renders an install config from the tool settings and the pull secret file.
pub(crate) fn render(config: &OcpConfig, pull_secret: &Path) -> Result<String, OcpError> {
    let pull_secret = fs::read_to_string(pull_secret)
        .context(format!("Failed to read pull secret {}", pull_secret.display()))?
        .trim()
        .to_owned();

    let ssh_key = config
        .ssh_key
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .map(|key| key.trim().to_owned())
                .context(format!("Failed to read SSH public key {}", path.display()))
        })
        .transpose()?;

    let install_config = InstallConfig {
        api_version: "v1",
        base_domain: &config.base_domain,
        metadata: Metadata { name: &config.cluster_name },
        platform: Platform { aws: Aws { region: &config.region } },
        pull_secret,
        ssh_key,
    };

    serde_yaml::to_string(&install_config).context("Failed to render install-config.yaml")
}
