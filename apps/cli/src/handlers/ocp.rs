use crate::session::Session;
use anyhow::Result;
use moitt::domain::component::Operation;
use tracing::info;

pub fn run(session: &Session) -> Result<()> {
    match session.operation {
        Operation::Install => install(session),
        Operation::Uninstall => {
            session.ocp.uninstall()?;
            Ok(())
        },
    }
}

fn install(session: &Session) -> Result<()> {
    // Resolved before the installer runs so a missing password fails in seconds, not hours.
    let users = session.env.cluster_users()?;
    let logins = session.env.login_users()?;

    session.ocp.install()?;

    session.login_kubeadmin()?;
    session.ocp.create_users(&users)?;
    session.logout()?;

    for user in &logins {
        session.login(user)?;
        session.logout()?;
    }
    info!(users = logins.len(), "Test user logins verified");
    Ok(())
}
