use std::borrow::Cow;

/// Errors raised while running external commands.
#[moitt_derive::moitt_error]
pub enum ExecError {
    /// The program could not be spawned (not installed, not executable, broken pipe).
    #[error("Failed to spawn command{}: {source}", format_context(.context))]
    Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The program ran and exited unsuccessfully.
    #[error(
        "Command `{command}` {}{}{}",
        describe_exit(.code),
        format_context(.context),
        describe_stderr(.stderr)
    )]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
        context: Option<Cow<'static, str>>,
    },

    /// Internal logic errors.
    #[error("Internal exec error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "was terminated by a signal".to_owned(), |c| format!("exited with status {c}"))
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() { String::new() } else { format!(": {trimmed}") }
}
