use std::borrow::Cow;

#[moitt_derive::moitt_error]
pub enum OcpError {
    #[error("Command error{}: {source}", format_context(.context))]
    Exec { source: moitt_exec::ExecError, context: Option<Cow<'static, str>> },

    #[error("Environment error{}: {source}", format_context(.context))]
    Kernel { source: moitt_kernel::KernelError, context: Option<Cow<'static, str>> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("YAML error{}: {source}", format_context(.context))]
    Yaml { source: serde_yaml::Error, context: Option<Cow<'static, str>> },

    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("OpenShift error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
