use std::borrow::Cow;

#[moitt_derive::moitt_error]
pub enum PullerError {
    #[error("Command error{}: {source}", format_context(.context))]
    Exec { source: moitt_exec::ExecError, context: Option<Cow<'static, str>> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid pull secret{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// `execute` was called before a manifest was built.
    #[error("Registry-puller manifest has not been built{}", format_context(.context))]
    NotBuilt { context: Option<Cow<'static, str>> },

    #[error("Registry-puller error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
