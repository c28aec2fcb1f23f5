use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::Span;

/// Path generated code uses to reach the `apispec` runtime crate.
///
/// An explicit `crate = "..."` argument wins over lookup in the caller's
/// manifest.
pub(crate) fn resolve_apispec_path(explicit: Option<syn::Path>) -> syn::Result<syn::Path> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    match crate_name("apispec") {
        // Inside the apispec package itself (unit tests, doctests, integration
        // tests) the crate is reachable through `extern crate self as apispec`.
        Ok(FoundCrate::Itself) => Ok(syn::parse_quote!(::apispec)),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name.replace('-', "_"), Span::call_site());
            Ok(syn::parse_quote!(::#ident))
        }
        Err(_) => Err(syn::Error::new(
            Span::call_site(),
            "could not resolve `apispec`; add it as a dependency or pass `crate = \"path\"`",
        )),
    }
}
