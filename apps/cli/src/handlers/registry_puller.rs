use crate::session::Session;
use anyhow::Result;
use moitt::features::puller::Puller;

pub fn run(session: &Session) -> Result<()> {
    let mut puller = Puller::new(&session.pull_secret, session.config.clone(), session.runner.clone());

    session.login_kubeadmin()?;
    if session.operation.is_install() {
        puller.build()?;
        puller.execute()?;
    }
    session.logout()
}
