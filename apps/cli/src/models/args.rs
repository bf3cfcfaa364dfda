//! # CLI Argument Definitions
//!
//! Flags of the `moitt` binary. Exactly one of `--install`/`--uninstall` is
//! required; everything else has a default.

use clap::{ArgGroup, Parser, ValueEnum};
use moitt::domain::component::{Component, Operation};
use moitt::domain::constants::{DEFAULT_ASSETS_DIR, DEFAULT_OCP_VERSION, DEFAULT_TAG};
use moitt_logger::LevelFilter;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "moitt")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Install or uninstall a Maistra test environment on OpenShift")]
#[command(group(ArgGroup::new("operation").required(true).args(["install", "uninstall"])))]
pub struct Cli {
    /// Install the selected component
    #[arg(short, long)]
    pub install: bool,

    /// Uninstall the selected component
    #[arg(short, long)]
    pub uninstall: bool,

    /// Component to act on; without one only the cluster handle is prepared
    #[arg(short, long, value_enum)]
    pub component: Option<ComponentArg>,

    /// Installer assets directory (holds auth/kubeconfig)
    #[arg(short, long, default_value = DEFAULT_ASSETS_DIR)]
    pub directory: PathBuf,

    /// OpenShift version to install
    #[arg(short, long, default_value = DEFAULT_OCP_VERSION)]
    pub version: String,

    /// Maistra image tag
    #[arg(short, long, default_value = DEFAULT_TAG)]
    pub tag: String,

    /// Use the istio-operator image from quay.io
    #[arg(short, long)]
    pub quay: bool,

    /// Tool configuration file (defaults to ./moitt.toml when present)
    #[arg(long, env = "MOITT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (`RUST_LOG` takes precedence)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Also write rolling log files into this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub const fn operation(&self) -> Operation {
        if self.install { Operation::Install } else { Operation::Uninstall }
    }

    #[must_use]
    pub fn component(&self) -> Option<Component> {
        self.component.map(Component::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentArg {
    Ocp,
    RegistryPuller,
    Istio,
}

impl From<ComponentArg> for Component {
    fn from(arg: ComponentArg) -> Self {
        match arg {
            ComponentArg::Ocp => Self::Ocp,
            ComponentArg::RegistryPuller => Self::RegistryPuller,
            ComponentArg::Istio => Self::Istio,
        }
    }
}
