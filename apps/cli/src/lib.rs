pub mod handlers;
pub mod models;
pub mod session;

use crate::session::Session;
use anyhow::{Result, bail};
use moitt::domain::component::Component;
use moitt::features;
use tracing::{info, warn};

/// Runs the selected component's install or uninstall sequence.
///
/// Steps run strictly in order and the first failure aborts the run; nothing
/// already done is rolled back.
pub fn run(session: &Session) -> Result<()> {
    let Some(component) = session.component else {
        warn!("No component selected, nothing to do");
        return Ok(());
    };
    if !features::is_enabled(component) {
        bail!("Component `{component}` is not compiled into this build");
    }

    info!(%component, operation = %session.operation, "Starting");
    match component {
        Component::Ocp => handlers::ocp::run(session)?,
        Component::RegistryPuller => handlers::registry_puller::run(session)?,
        Component::Istio => handlers::istio::run(session)?,
    }
    info!(%component, operation = %session.operation, "Finished");
    Ok(())
}
