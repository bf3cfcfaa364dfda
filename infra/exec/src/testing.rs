use crate::error::ExecError;
use crate::invocation::{Invocation, Output};
use crate::runner::CommandRunner;
use parking_lot::Mutex;

/// A [`CommandRunner`] that never spawns anything.
///
/// Every invocation is recorded. Responses are scripted by command prefix; the
/// longest matching prefix wins and unmatched commands succeed with empty output.
///
/// ```rust,ignore
/// use moitt_exec::{CommandRunner, Invocation, Output, RecordingRunner};
///
/// let runner = RecordingRunner::new();
/// runner.respond(&["oc", "get", "namespace"], Output::failure(1, "NotFound"));
///
/// assert!(!runner.probe(&Invocation::new("oc").args(["get", "namespace", "foo"])).unwrap());
/// assert_eq!(runner.command_lines(), ["oc get namespace foo"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    responses: Mutex<Vec<(Vec<String>, Output)>>,
}

impl RecordingRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the output returned for commands starting with `prefix`.
    pub fn respond(&self, prefix: &[&str], output: Output) -> &Self {
        self.responses.lock().push((prefix.iter().map(|&s| s.to_owned()).collect(), output));
        self
    }

    /// Every invocation seen so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    /// Rendered (redacted) command lines, in order.
    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(ToString::to_string).collect()
    }

    /// Forgets recorded invocations; scripted responses are kept.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<Output, ExecError> {
        self.calls.lock().push(invocation.clone());

        let responses = self.responses.lock();
        let output = responses
            .iter()
            .filter(|(prefix, _)| {
                let words: Vec<&str> = prefix.iter().map(String::as_str).collect();
                invocation.starts_with(&words)
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or_else(|| Output::success(""), |(_, output)| output.clone());

        Ok(output)
    }
}
