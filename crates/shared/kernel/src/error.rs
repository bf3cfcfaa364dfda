use std::borrow::Cow;

/// Errors raised while assembling the run configuration.
#[moitt_derive::moitt_error]
pub enum KernelError {
    /// A required environment variable is unset or empty.
    #[error("Missing {name} environment variable{}", format_context(.context))]
    MissingEnv { name: &'static str, context: Option<Cow<'static, str>> },

    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
