//! Facade crate for the `moitt` components and shared modules.
//! Re-exports domain/kernel/exec primitives and wires the process runner.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `moitt` with the desired component features (`registry-puller`/`istio`).
//! - Call [`runner`] once per run and hand the result to every collaborator.

pub use moitt_domain as domain;
pub use moitt_exec as exec;
pub use moitt_kernel as kernel;

use moitt_domain::component::Component;
use moitt_domain::constants::ENV_KUBECONFIG;
use moitt_exec::{SharedRunner, SystemRunner};
use moitt_kernel::assets::AssetPaths;
use std::sync::Arc;

/// Component collaborators, gated by Cargo feature.
pub mod features {
    use super::Component;

    pub use moitt_ocp as ocp;
    #[cfg(feature = "istio")]
    pub use moitt_istio as istio;
    #[cfg(feature = "registry-puller")]
    pub use moitt_puller as puller;

    /// Components compiled into this build.
    pub const ENABLED: &[Component] = &[
        Component::Ocp,
        #[cfg(feature = "registry-puller")]
        Component::RegistryPuller,
        #[cfg(feature = "istio")]
        Component::Istio,
    ];

    #[must_use]
    pub fn is_enabled(component: Component) -> bool {
        ENABLED.contains(&component)
    }
}

/// Process runner for one run: every spawned tool sees `KUBECONFIG` pointing at
/// the cluster in `assets`.
#[must_use]
pub fn runner(assets: &AssetPaths) -> SharedRunner {
    let kubeconfig = assets.kubeconfig();
    Arc::new(SystemRunner::new().with_env(ENV_KUBECONFIG, kubeconfig.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocp_is_always_enabled() {
        assert!(features::is_enabled(Component::Ocp));
        assert_eq!(features::ENABLED.first(), Some(&Component::Ocp));
    }

    #[test]
    fn runner_is_built_for_the_assets_directory() {
        let runner = runner(&AssetPaths::new("/tmp/cluster-a"));
        assert!(format!("{runner:?}").contains("/tmp/cluster-a/auth/kubeconfig"));
    }
}
