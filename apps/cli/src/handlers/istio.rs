use crate::session::Session;
use anyhow::Result;
use moitt::domain::component::Operation;
use moitt::domain::constants::{
    ANYUID_SERVICE_ACCOUNTS, CONTROL_PLANE_NAME, CONTROL_PLANE_NAMESPACE, MAISTRA_BRANCH, MEMBER_NAMESPACES,
    MEMBER_ROLL_FILE, SAMPLE_FILE, SAMPLE_NAMESPACE,
};
use moitt::features::istio::{ControlPlane, Operator};
use std::path::Path;

pub fn run(session: &Session) -> Result<()> {
    let cr_file = session.env.cr_file();
    let operator = Operator::new(MAISTRA_BRANCH, &session.tag, session.config.clone(), session.runner.clone())
        .ocp_version(&session.version);
    operator.mutate(cr_file.as_deref())?;

    let control_plane = ControlPlane::new(
        CONTROL_PLANE_NAME,
        CONTROL_PLANE_NAMESPACE,
        SAMPLE_NAMESPACE,
        MEMBER_NAMESPACES,
        session.workdir.join(MEMBER_ROLL_FILE),
        session.workdir.join(SAMPLE_FILE),
        session.config.clone(),
        session.runner.clone(),
    );

    match session.operation {
        Operation::Install => install(session, &operator, &control_plane, cr_file.as_deref()),
        Operation::Uninstall => uninstall(session, &operator, &control_plane, cr_file.as_deref()),
    }
}

fn install(session: &Session, operator: &Operator, cp: &ControlPlane, cr_file: Option<&Path>) -> Result<()> {
    session.login_kubeadmin()?;
    operator.deploy_es()?;
    operator.deploy_jaeger()?;
    operator.deploy_kiali()?;
    if session.quay {
        operator.deploy_quay_istio()?;
    } else {
        operator.deploy_istio()?;
    }
    operator.patch41()?;
    operator.check()?;
    session.logout()?;

    session.login(&session.env.qe1())?;
    cp.install(cr_file)?;
    cp.create_ns(cp.members())?;
    cp.apply_smmr()?;
    cp.smoke_check()?;
    cp.check()?;
    session.logout()?;

    session.login_kubeadmin()?;
    for service_account in ANYUID_SERVICE_ACCOUNTS {
        operator.add_anyuid(service_account, SAMPLE_NAMESPACE)?;
    }
    session.logout()
}

fn uninstall(session: &Session, operator: &Operator, cp: &ControlPlane, cr_file: Option<&Path>) -> Result<()> {
    session.login(&session.env.qe1())?;
    cp.uninstall(cr_file)?;
    session.logout()?;

    session.login_kubeadmin()?;
    if session.quay {
        operator.uninstall_quay_istio()?;
    }
    operator.uninstall()?;
    session.logout()
}
