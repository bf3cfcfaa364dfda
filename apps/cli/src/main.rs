use anyhow::Context;
use clap::Parser;
use moitt::domain::config::ToolConfig;
use moitt::exec::locate;
use moitt::kernel::assets::AssetPaths;
use moitt::kernel::config::load_config;
use moitt::kernel::env::Environment;
use moitt_cli::models::args::Cli;
use moitt_cli::session::{Credentials, Session};
use moitt_logger::Logger;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Missing credentials abort before anything is written, log files included.
    let env = Environment::from_process();
    let credentials = Credentials::from_env(&env)?;

    let builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(cli.log_level);
    let _logger = match &cli.log_dir {
        Some(dir) => builder.path(dir).init()?,
        None => builder.init()?,
    };

    let config: ToolConfig = load_config(cli.config.as_deref()).context("Configuration is malformed")?;
    if locate(&config.tools.oc).is_none() {
        warn!(oc = %config.tools.oc, "oc was not found in PATH");
    }

    let runner = moitt::runner(&AssetPaths::new(&cli.directory));
    let workdir = std::env::current_dir().context("Cannot resolve the working directory")?;

    let session = Session::new(&cli, env, credentials, config, runner, workdir);
    moitt_cli::run(&session)
}
