use crate::error::{ExecError, ExecErrorExt};
use crate::invocation::{Invocation, Output};
use std::fmt::Debug;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{debug, info};

/// Runner shared by every collaborator of a single `moitt` run.
pub type SharedRunner = Arc<dyn CommandRunner>;

/// Runs external commands.
pub trait CommandRunner: Debug + Send + Sync {
    /// Runs the command and returns its output, whatever the exit status.
    ///
    /// # Errors
    /// Returns [`ExecError::Spawn`] if the process could not be started.
    fn run(&self, invocation: &Invocation) -> Result<Output, ExecError>;

    /// Runs the command and fails unless it exits with status zero.
    ///
    /// # Errors
    /// Returns [`ExecError::Failed`] for a non-zero exit, or any error from [`CommandRunner::run`].
    fn execute(&self, invocation: &Invocation) -> Result<Output, ExecError> {
        let output = self.run(invocation)?;
        if output.is_success() {
            return Ok(output);
        }
        Err(ExecError::Failed {
            command: invocation.to_string(),
            code: output.code,
            stderr: output.stderr,
            context: None,
        })
    }

    /// Runs the command and reports whether it exited with status zero.
    ///
    /// # Errors
    /// Returns an error only if the process could not be started.
    fn probe(&self, invocation: &Invocation) -> Result<bool, ExecError> {
        Ok(self.run(invocation)?.is_success())
    }
}

/// Spawns real processes with `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    base_env: Vec<(String, String)>,
}

impl SystemRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable applied to every spawned child.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_env.push((key.into(), value.into()));
        self
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.arg_values())
            .envs(self.base_env.iter().map(|(k, v)| (k, v)))
            .envs(invocation.envs().iter().map(|(k, v)| (k, v)));

        command.stdin(if invocation.stdin_data().is_some() { Stdio::piped() } else { Stdio::null() });
        if invocation.is_captured() {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        command
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Output, ExecError> {
        info!(command = %invocation, "Running");

        let spawn_context = || {
            format!(
                "Failed to execute `{}`. Is it installed and in your PATH?",
                invocation.program()
            )
        };

        let mut child = self.command(invocation).spawn().context(spawn_context())?;

        if let Some(input) = invocation.stdin_data()
            && let Some(mut stdin) = child.stdin.take()
        {
            stdin.write_all(input.as_bytes()).context("Failed to write command stdin")?;
        }

        let output = child.wait_with_output().context(spawn_context())?;

        let output = Output {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.stderr.is_empty() {
            debug!(command = %invocation, stderr = %output.stderr.trim_end(), "Command stderr");
        }

        Ok(output)
    }
}

/// Resolves a program name against `PATH`; paths containing a separator are
/// checked directly.
#[must_use]
pub fn locate(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
