//! Kernel utilities shared by the `moitt` binary and its collaborators.
//! Keep this crate lightweight: config loading, environment parsing and the
//! installer asset layout live here, process spawning does not.
//!
//! ## Environment
//! ```rust
//! use moitt_kernel::env::Environment;
//!
//! let env = Environment::from_pairs([("AWS_PROFILE", "qe"), ("PULL_SEC", "")]);
//! assert_eq!(env.profile().unwrap(), "qe");
//! assert!(env.pull_secret().is_err(), "empty values count as missing");
//! ```
//!
//! ## Config loading
//! ```rust,no_run
//! use moitt_kernel::config::load_config;
//! use moitt_domain::config::ToolConfig;
//!
//! let cfg: ToolConfig = load_config(None::<&str>).unwrap();
//! ```

pub mod assets;
pub mod config;
pub mod env;
mod error;

pub use crate::error::{KernelError, KernelErrorExt};
pub use moitt_domain as domain;
