//! # Service mesh
//!
//! Maistra QE needs three supporting operators (Elasticsearch, Jaeger, Kiali),
//! the istio-operator built from a Maistra branch and a control plane with the
//! bookinfo sample enrolled in it.
//!
//! * [`Operator`] owns the cluster-scoped part and runs as `kubeadmin`.
//! * [`ControlPlane`] owns the namespaced part and runs as a QE user.
//!
//! Both only issue `oc` commands through the shared runner; ordering and logins
//! are up to the caller.

mod control_plane;
mod cr;
mod error;
mod oc;
mod operator;

pub use crate::control_plane::ControlPlane;
pub use crate::error::{IstioError, IstioErrorExt};
pub use crate::operator::Operator;
