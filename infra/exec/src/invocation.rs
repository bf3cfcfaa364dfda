use std::fmt;
use std::path::Path;

const REDACTED: &str = "******";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Arg {
    value: String,
    secret: bool,
}

/// A single external command line.
///
/// Built with a small by-value builder so call sites read like the shell command
/// they stand for:
///
/// ```rust
/// use moitt_exec::Invocation;
///
/// let login = Invocation::new("oc").args(["login", "-u", "kubeadmin", "-p"]).secret_arg("hunter2");
/// assert_eq!(login.to_string(), "oc login -u kubeadmin -p ******");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<Arg>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
    capture: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), envs: Vec::new(), stdin: None, capture: false }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg { value: arg.into(), secret: false });
        self
    }

    /// Appends a path argument. Non UTF-8 components are replaced lossily.
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|a| Arg { value: a.into(), secret: false }));
        self
    }

    /// Appends an argument that must never appear in logs or error messages.
    #[must_use]
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg { value: arg.into(), secret: true });
        self
    }

    /// Sets an environment variable for this command only.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Feeds `input` to the command's stdin.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Captures stdout/stderr instead of streaming them to the terminal.
    #[must_use]
    pub const fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Raw argument values, secrets included.
    pub fn arg_values(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.value.as_str())
    }

    #[must_use]
    pub fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    #[must_use]
    pub fn stdin_data(&self) -> Option<&str> {
        self.stdin.as_deref()
    }

    #[must_use]
    pub const fn is_captured(&self) -> bool {
        self.capture
    }

    /// Returns `true` when `program` followed by the arguments starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        let mut words = std::iter::once(self.program.as_str()).chain(self.arg_values());
        prefix.iter().all(|expected| words.next() == Some(*expected))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.secret {
                write!(f, " {REDACTED}")?;
            } else if arg.value.is_empty() || arg.value.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.value)?;
            } else {
                write!(f, " {}", arg.value)?;
            }
        }
        Ok(())
    }
}

/// What a finished command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self { code: Some(0), stdout: stdout.into(), stderr: String::new() }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self { code: Some(code), stdout: String::new(), stderr: stderr.into() }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}
