//! Macros that attach apispec annotations to a type.
//!
//! This crate provides two proc-macros, re-exported by `apispec`:
//!
//! - `#[derive(ApiType)]` - type-level tags, from `#[api(...)]`
//! - `#[api_methods]` - method, parameter and return-value tags, from helper
//!   attributes inside an inherent impl block

use darling::FromDeriveInput;
use darling::FromMeta;
use darling::ast::NestedMeta;
use proc_macro::TokenStream;
use syn::parse_macro_input;

mod api_methods;
mod api_type;
mod attrs;
mod runtime_path;

use runtime_path::resolve_apispec_path;

/// Derive the type-level half of the metadata table.
///
/// # Container Attributes
///
/// - `#[api(description = "...")]` - Description of the type
/// - `#[api(crate = "path")]` - Path to the `apispec` crate, when it cannot be
///   found in the caller's manifest
///
/// # Example
///
/// ```ignore
/// #[derive(ApiType)]
/// #[api(description = "Order management")]
/// pub struct Orders;
/// ```
#[proc_macro_derive(ApiType, attributes(api))]
pub fn derive_api_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match expand_derive_api_type(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_derive_api_type(input: &syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = attrs::ApiTypeAttrs::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(input, e.to_string()))?;
    let runtime = resolve_apispec_path(attrs.krate.clone())?;

    Ok(api_type::generate_api_type(&attrs, &runtime))
}

/// Build the method half of the metadata table from an inherent impl block.
///
/// Every `pub fn` is recorded, in declaration order. Non-public methods are
/// left out and may not carry annotations.
///
/// # Method Attributes
///
/// - `#[api_method]` - Marks the method as part of the API surface
/// - `#[api_description("...")]` - Description of the method
/// - `#[api_return(description = "...", int_range(min = A, max = B), required)]` -
///   Tags on the return value; not allowed on methods returning `()`
///
/// # Parameter Attributes
///
/// - `#[api_description("...")]` - Description of the parameter
/// - `#[api_int_range(min = A, max = B)]` - Inclusive integer bounds
/// - `#[api_required]` or `#[api_required(false)]` - Requiredness
///
/// # Arguments
///
/// - `#[api_methods(crate = "path")]` - Path to the `apispec` crate
///
/// # Example
///
/// ```ignore
/// #[api_methods]
/// impl Orders {
///     #[api_method]
///     #[api_description("Cancels an order")]
///     pub fn cancel(&mut self, #[api_required] id: u64) {}
/// }
/// ```
#[proc_macro_attribute]
pub fn api_methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::ItemImpl);

    match expand_api_methods(attr.into(), item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_api_methods(
    attr: proc_macro2::TokenStream,
    item: syn::ItemImpl,
) -> syn::Result<proc_macro2::TokenStream> {
    let span = proc_macro2::Span::call_site();
    let nested =
        NestedMeta::parse_meta_list(attr).map_err(|e| syn::Error::new(span, e.to_string()))?;
    let args = attrs::ApiMethodsArgs::from_list(&nested)
        .map_err(|e| syn::Error::new(span, e.to_string()))?;
    let runtime = resolve_apispec_path(args.krate)?;

    api_methods::expand(item, &runtime)
}
