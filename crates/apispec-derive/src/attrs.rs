//! Attribute parsing for the apispec macros.
//!
//! Container options (`#[api(...)]` on a type, arguments of
//! `#[api_methods(...)]`) are parsed with darling. The helper attributes that
//! attach tags to methods, parameters and return values are parsed by hand,
//! since they are removed from the impl block before it is re-emitted.

use darling::{FromDeriveInput, FromMeta};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::ParseStream;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, LitBool, LitInt, LitStr, Meta, Token};

pub const API_METHOD: &str = "api_method";
pub const API_DESCRIPTION: &str = "api_description";
pub const API_INT_RANGE: &str = "api_int_range";
pub const API_REQUIRED: &str = "api_required";
pub const API_RETURN: &str = "api_return";

const HELPER_ATTRS: [&str; 5] = [
    API_METHOD,
    API_DESCRIPTION,
    API_INT_RANGE,
    API_REQUIRED,
    API_RETURN,
];

/// Container attributes for `#[derive(ApiType)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(api))]
pub struct ApiTypeAttrs {
    pub ident: Ident,
    pub generics: syn::Generics,

    /// Description attached to the type.
    #[darling(default)]
    pub description: Option<String>,

    /// Override for the runtime crate path.
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// Arguments of `#[api_methods(...)]`.
#[derive(Debug, Default, FromMeta)]
pub struct ApiMethodsArgs {
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// A tag as written in source, before it is turned into a runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSpec {
    Description(String),
    ApiMethod,
    IntRange { min: i64, max: i64 },
    Required(bool),
}

impl TagSpec {
    /// Expression constructing the runtime tag.
    pub fn to_runtime(&self, runtime: &syn::Path) -> TokenStream {
        match self {
            TagSpec::Description(text) => {
                let text = LitStr::new(text, Span::call_site());
                quote! { #runtime::DescriptionTag::new(#text) }
            }
            TagSpec::ApiMethod => quote! { #runtime::ApiMethodTag },
            TagSpec::IntRange { min, max } => {
                quote! { #runtime::IntRangeTag::new(#min, #max) }
            }
            TagSpec::Required(required) => quote! { #runtime::RequiredTag::new(#required) },
        }
    }
}

/// Tags collected from a method's attributes.
#[derive(Debug, Default)]
pub struct MethodTags {
    pub tags: Vec<TagSpec>,
    pub return_tags: Vec<TagSpec>,
    /// Span of the first `api_return` attribute, if any.
    pub return_span: Option<Span>,
}

impl MethodTags {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.return_span.is_none()
    }
}

fn is_helper(attr: &Attribute) -> bool {
    HELPER_ATTRS.iter().any(|name| attr.path().is_ident(name))
}

/// Remove the helper attributes from `attrs`, keeping everything else in
/// place.
fn take_helpers(attrs: &mut Vec<Attribute>) -> Vec<Attribute> {
    let (helpers, rest) = std::mem::take(attrs).into_iter().partition(is_helper);
    *attrs = rest;
    helpers
}

/// Strip and parse the helper attributes on a method.
pub fn take_method_tags(attrs: &mut Vec<Attribute>) -> syn::Result<MethodTags> {
    let mut result = MethodTags::default();

    for attr in take_helpers(attrs) {
        let path = attr.path();
        if path.is_ident(API_METHOD) {
            attr.meta.require_path_only()?;
            result.tags.push(TagSpec::ApiMethod);
        } else if path.is_ident(API_DESCRIPTION) {
            result.tags.push(parse_description(&attr)?);
        } else if path.is_ident(API_RETURN) {
            result.return_span.get_or_insert(attr.span());
            result.return_tags.extend(parse_return(&attr)?);
        } else {
            return Err(syn::Error::new_spanned(
                &attr,
                format!(
                    "`{}` applies to parameters; use `api_return(...)` for the return value",
                    path_name(&attr)
                ),
            ));
        }
    }

    Ok(result)
}

/// Strip and parse the helper attributes on a parameter.
pub fn take_param_tags(attrs: &mut Vec<Attribute>) -> syn::Result<Vec<TagSpec>> {
    let mut tags = Vec::new();

    for attr in take_helpers(attrs) {
        let path = attr.path();
        if path.is_ident(API_DESCRIPTION) {
            tags.push(parse_description(&attr)?);
        } else if path.is_ident(API_INT_RANGE) {
            tags.push(parse_int_range(&attr)?);
        } else if path.is_ident(API_REQUIRED) {
            tags.push(parse_required(&attr)?);
        } else {
            return Err(syn::Error::new_spanned(
                &attr,
                format!("`{}` applies to methods, not parameters", path_name(&attr)),
            ));
        }
    }

    Ok(tags)
}

fn path_name(attr: &Attribute) -> String {
    attr.path()
        .get_ident()
        .map(Ident::to_string)
        .unwrap_or_default()
}

/// `#[api_description("text")]` or `#[api_description = "text"]`.
fn parse_description(attr: &Attribute) -> syn::Result<TagSpec> {
    let text = match &attr.meta {
        Meta::List(_) => attr.parse_args::<LitStr>()?,
        Meta::NameValue(name_value) => match &name_value.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(text),
                ..
            }) => text.clone(),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected a string literal description",
                ));
            }
        },
        Meta::Path(path) => {
            return Err(syn::Error::new_spanned(
                path,
                "expected `api_description(\"...\")`",
            ));
        }
    };
    Ok(TagSpec::Description(text.value()))
}

/// `#[api_required]` or `#[api_required(false)]`.
fn parse_required(attr: &Attribute) -> syn::Result<TagSpec> {
    match &attr.meta {
        Meta::Path(_) => Ok(TagSpec::Required(true)),
        Meta::List(_) => Ok(TagSpec::Required(attr.parse_args::<LitBool>()?.value)),
        Meta::NameValue(name_value) => Err(syn::Error::new_spanned(
            name_value,
            "expected `api_required` or `api_required(<bool>)`",
        )),
    }
}

/// `#[api_int_range(min = A, max = B)]`.
fn parse_int_range(attr: &Attribute) -> syn::Result<TagSpec> {
    let mut bounds = RangeBounds::default();
    attr.parse_nested_meta(|meta| bounds.parse_entry(&meta))?;
    bounds.finish(attr.span())
}

/// `#[api_return(description = "...", int_range(min = A, max = B), required)]`.
fn parse_return(attr: &Attribute) -> syn::Result<Vec<TagSpec>> {
    let mut tags = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("description") {
            let text: LitStr = meta.value()?.parse()?;
            tags.push(TagSpec::Description(text.value()));
            Ok(())
        } else if meta.path.is_ident("int_range") {
            let mut bounds = RangeBounds::default();
            let span = meta.path.span();
            meta.parse_nested_meta(|inner| bounds.parse_entry(&inner))?;
            tags.push(bounds.finish(span)?);
            Ok(())
        } else if meta.path.is_ident("required") {
            let required = if meta.input.peek(Token![=]) {
                meta.value()?.parse::<LitBool>()?.value
            } else {
                true
            };
            tags.push(TagSpec::Required(required));
            Ok(())
        } else {
            Err(meta.error("expected `description`, `int_range` or `required`"))
        }
    })?;

    Ok(tags)
}

#[derive(Default)]
struct RangeBounds {
    min: Option<i64>,
    max: Option<i64>,
}

impl RangeBounds {
    fn parse_entry(&mut self, meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("min") {
            self.min = Some(parse_bound(meta.value()?)?);
            Ok(())
        } else if meta.path.is_ident("max") {
            self.max = Some(parse_bound(meta.value()?)?);
            Ok(())
        } else {
            Err(meta.error("expected `min` or `max`"))
        }
    }

    fn finish(self, span: Span) -> syn::Result<TagSpec> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min <= max => Ok(TagSpec::IntRange { min, max }),
            (Some(min), Some(max)) => Err(syn::Error::new(
                span,
                format!("range minimum {min} is greater than maximum {max}"),
            )),
            (None, _) => Err(syn::Error::new(span, "missing `min`")),
            (_, None) => Err(syn::Error::new(span, "missing `max`")),
        }
    }
}

/// An optionally negated integer literal that fits in `i64`.
fn parse_bound(input: ParseStream<'_>) -> syn::Result<i64> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }

    let literal: LitInt = input.parse()?;
    let magnitude: i128 = literal.base10_parse()?;
    let value = if negative { -magnitude } else { magnitude };

    i64::try_from(value)
        .map_err(|_| syn::Error::new(literal.span(), "integer bound does not fit in i64"))
}
