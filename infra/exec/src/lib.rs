//! # Exec
//!
//! Every cluster operation in `moitt` ends up as an external program: `oc`,
//! `openshift-install`, `htpasswd`, `curl`. This crate is the single seam through
//! which those programs are spawned.
//!
//! * [`Invocation`] describes one command line (arguments, extra environment,
//!   optional stdin) and renders itself with secret arguments redacted.
//! * [`CommandRunner`] runs an invocation. [`SystemRunner`] spawns real processes
//!   and applies a base environment (e.g. `KUBECONFIG`) to every child.
//! * `RecordingRunner` (feature `testing`) records invocations instead of running
//!   them, so callers can assert on the exact command sequence.
//!
//! ## Example
//!
//! ```rust,no_run
//! use moitt_exec::{CommandRunner, Invocation, SystemRunner};
//!
//! let runner = SystemRunner::new().with_env("KUBECONFIG", "./assets/auth/kubeconfig");
//! runner.execute(&Invocation::new("oc").arg("whoami")).unwrap();
//! ```

mod error;
mod invocation;
mod runner;
#[cfg(any(test, feature = "testing"))]
mod testing;

pub use crate::error::{ExecError, ExecErrorExt};
pub use crate::invocation::{Invocation, Output};
pub use crate::runner::{CommandRunner, SharedRunner, SystemRunner, locate};
#[cfg(any(test, feature = "testing"))]
pub use crate::testing::RecordingRunner;
