use moitt_derive::moitt_error;
use std::borrow::Cow;

#[moitt_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing {name}{}", format_context(.context))]
    Missing { name: &'static str, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    std::fs::read_to_string("does-not-exist").context("reading fixture")
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.to_string().contains("(reading fixture)"));

    let internal: DemoError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");

    let missing = DemoError::Missing { name: "AWS_PROFILE", context: None }.with_context("startup");
    assert_eq!(missing.to_string(), "Missing AWS_PROFILE (startup)");
}
