use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, Ident, Type, Variant};

struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    cfg_attrs: Vec<&'a Attribute>,
}

struct ErrorEnum<'a> {
    input: &'a DeriveInput,
    ext: Ident,
    variants: Vec<ErrorVariant<'a>>,
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let error = ErrorEnum::parse(input)?;

    let derives = error.missing_derives();
    let ext_trait = error.ext_trait();
    let from_impls = error.from_impls();
    let internal_impls = error.internal_impls();
    let inherent = error.inherent_impl();

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #(#from_impls)*
        #internal_impls
        #inherent

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    })
}

impl<'a> ErrorEnum<'a> {
    fn parse(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &input.data else {
            return Err(syn::Error::new_spanned(&input.ident, "moitt_error can only be applied to enums"));
        };

        let variants = data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { input, ext: format_ident!("{}Ext", input.ident), variants })
    }

    fn name(&self) -> &Ident {
        &self.input.ident
    }

    fn missing_derives(&self) -> TokenStream {
        let present = derived_trait_names(&self.input.attrs);
        let mut derives = Vec::new();
        if !present.contains("Debug") {
            derives.push(quote! { Debug });
        }
        if !present.contains("Error") {
            derives.push(quote! { ::thiserror::Error });
        }
        if derives.is_empty() { quote! {} } else { quote! { #[derive(#(#derives),*)] } }
    }

    fn context_arms(&self) -> impl Iterator<Item = TokenStream> + '_ {
        let name = self.name();
        self.variants.iter().filter(|v| v.has_context).map(move |v| {
            let cfg_attrs = &v.cfg_attrs;
            let ident = v.ident;
            quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
        })
    }

    fn ext_trait(&self) -> TokenStream {
        let name = self.name();
        let ext = &self.ext;

        quote! {
            pub trait #ext<T> {
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name>;
            }

            #[automatically_derived]
            impl<T> #ext<T> for std::result::Result<T, #name> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                    self.map_err(|e| e.with_context(context))
                }
            }
        }
    }

    fn inherent_impl(&self) -> TokenStream {
        let name = self.name();
        let arms = self.context_arms();

        quote! {
            #[automatically_derived]
            impl #name {
                /// Attaches a human readable context to this error.
                #[must_use]
                #[allow(unreachable_patterns)]
                pub fn with_context(mut self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                    match &mut self {
                        #( #arms )*
                        _ => {}
                    }
                    self
                }
            }
        }
    }

    fn from_impls(&self) -> Vec<TokenStream> {
        let name = self.name();
        let ext = &self.ext;

        self.variants
            .iter()
            .filter(|v| v.ident != "Internal")
            .filter_map(|v| {
                let field = v.source?;
                let source_ty = &field.ty;
                let source_ident = field.ident.as_ref()?;
                let ident = v.ident;
                let cfg_attrs = &v.cfg_attrs;

                Some(quote! {
                    #(#cfg_attrs)*
                    #[automatically_derived]
                    impl From<#source_ty> for #name {
                        #[inline]
                        fn from(#source_ident: #source_ty) -> Self { Self::#ident { #source_ident, context: None } }
                    }

                    #(#cfg_attrs)*
                    impl<T> #ext<T> for std::result::Result<T, #source_ty> {
                        #[inline]
                        fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                            self.map_err(|#source_ident| #name::#ident { #source_ident, context: Some(context.into()) })
                        }
                    }
                })
            })
            .collect()
    }

    fn internal_impls(&self) -> TokenStream {
        let name = self.name();
        let Some(internal) = self.variants.iter().find(|v| v.ident == "Internal") else {
            return quote! {};
        };
        let cfg_attrs = &internal.cfg_attrs;

        quote! {
            #(#cfg_attrs)*
            impl From<&'static str> for #name {
                #[inline]
                fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
            }
            #(#cfg_attrs)*
            impl From<String> for #name {
                #[inline]
                fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
            }
        }
    }
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "moitt_error requires named fields for source/context handling",
            ));
        };

        let has_context = context_field(fields)?.is_some();
        let source = source_field(fields);

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "moitt_error requires `context: Option<Cow<'static, str>>` for variants with a source",
            ));
        }

        Ok(Self {
            ident: &variant.ident,
            source,
            has_context,
            cfg_attrs: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
        })
    }
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) = fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == "context"))
    else {
        return Ok(None);
    };

    if !is_context_type(&field.ty) {
        return Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"));
    }
    Ok(Some(field))
}

fn source_field(fields: &FieldsNamed) -> Option<&Field> {
    fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == "source")
            || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
    })
}

fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

/// Matches `Option<Cow<'static, str>>` by the last path segment of each layer.
fn is_context_type(ty: &Type) -> bool {
    let Some(cow) = single_generic(ty, "Option").and_then(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }) else {
        return false;
    };

    let Type::Path(path) = cow else { return false };
    let Some(segment) = path.path.segments.last() else { return false };
    if segment.ident != "Cow" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else { return false };

    let mut args = args.args.iter();
    let lifetime_ok =
        matches!(args.next(), Some(syn::GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        args.next(),
        Some(syn::GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );

    lifetime_ok && str_ok
}

fn single_generic<'t>(ty: &'t Type, wrapper: &str) -> Option<&'t syn::GenericArgument> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else { return None };
    args.args.first()
}
