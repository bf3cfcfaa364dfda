use std::borrow::Cow;

#[moitt_derive::moitt_error]
pub enum IstioError {
    #[error("Command error{}: {source}", format_context(.context))]
    Exec { source: moitt_exec::ExecError, context: Option<Cow<'static, str>> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("YAML error{}: {source}", format_context(.context))]
    Yaml { source: serde_yaml::Error, context: Option<Cow<'static, str>> },

    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The sample application answered, but not with the expected page.
    #[error("Smoke check failed{}: expected `{expected}` in the product page", format_context(.context))]
    SmokeCheck { expected: String, context: Option<Cow<'static, str>> },

    #[error("Service mesh error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
