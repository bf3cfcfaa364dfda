use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Which part of the test environment a run targets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Component {
    /// The OpenShift cluster itself.
    Ocp,
    /// The registry-puller controller that spreads the pull secret.
    RegistryPuller,
    /// Maistra operators plus a control plane and the bookinfo sample.
    Istio,
}

/// Whether a run stands the component up or tears it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Install,
    Uninstall,
}

impl Operation {
    #[must_use]
    pub const fn is_install(self) -> bool {
        matches!(self, Self::Install)
    }
}
