#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the `moitt` workspace.
//!
//! The only macro today is [`macro@moitt_error`], which turns a plain enum into a
//! `thiserror` error with context support. Every library crate in the workspace
//! declares its error type with it, so errors carry the same shape end to end:
//! a `source` (when wrapping something upstream) and an optional human context.

mod expand;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate error enums.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant wrapping a `source`.
/// * `From<Source>` for every variant with a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * An inherent `with_context(..)` method that sets the context on any variant.
/// * A module-level `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. Variants wrapping a source must also declare
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use moitt_derive::moitt_error;
/// use std::borrow::Cow;
///
/// #[moitt_error]
/// pub enum ToolError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, ToolError> {
///     std::fs::read_to_string("auth/kubeconfig").context("Reading kubeconfig")
/// }
/// ```
#[proc_macro_attribute]
pub fn moitt_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    expand::expand(&input).unwrap_or_else(syn::Error::into_compile_error).into()
}
