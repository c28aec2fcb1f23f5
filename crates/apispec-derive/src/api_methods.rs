//! Expansion of `#[api_methods]`.
//!
//! The impl block is re-emitted with every apispec helper attribute removed,
//! followed by an `ApiMethods` impl listing each `pub fn` in declaration
//! order.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Pat, ReturnType, Type, Visibility};

use crate::attrs::{TagSpec, take_method_tags, take_param_tags};

/// One method as it will appear in the metadata table.
#[derive(Debug)]
pub struct MethodSpec {
    pub name: String,
    pub tags: Vec<TagSpec>,
    pub params: Vec<ParamSpec>,
    /// `None` for methods returning `()`.
    pub returns: Option<Vec<TagSpec>>,
}

#[derive(Debug)]
pub struct ParamSpec {
    pub name: String,
    pub tags: Vec<TagSpec>,
}

pub fn expand(mut item: ItemImpl, runtime: &syn::Path) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "`api_methods` applies to inherent impl blocks, not trait impls",
        ));
    }

    let mut methods = Vec::new();
    for impl_item in &mut item.items {
        if let ImplItem::Fn(method) = impl_item {
            if let Some(spec) = collect_method(method)? {
                methods.push(spec);
            }
        }
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();
    let entries = methods.iter().map(|method| method.to_runtime(runtime));

    Ok(quote! {
        #item

        impl #impl_generics #runtime::ApiMethods for #self_ty #where_clause {
            fn api_methods() -> ::std::vec::Vec<#runtime::MethodMetadata> {
                ::std::vec![
                    #(#entries),*
                ]
            }
        }
    })
}

/// Strip the helper attributes from one method and describe it.
///
/// Returns `None` for non-public methods, which are not part of the table.
fn collect_method(method: &mut ImplItemFn) -> syn::Result<Option<MethodSpec>> {
    let method_tags = take_method_tags(&mut method.attrs)?;

    let mut params = Vec::new();
    for input in &mut method.sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                if !take_param_tags(&mut receiver.attrs)?.is_empty() {
                    return Err(syn::Error::new_spanned(
                        receiver,
                        "the receiver is not a parameter and cannot carry api annotations",
                    ));
                }
            }
            FnArg::Typed(typed) => {
                let tags = take_param_tags(&mut typed.attrs)?;
                params.push(ParamSpec {
                    name: param_name(&typed.pat),
                    tags,
                });
            }
        }
    }

    if !matches!(method.vis, Visibility::Public(_)) {
        if !method_tags.is_empty() || params.iter().any(|param| !param.tags.is_empty()) {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                "api annotations require a `pub` method",
            ));
        }
        return Ok(None);
    }

    let returns = if returns_unit(&method.sig.output) {
        if let Some(span) = method_tags.return_span {
            return Err(syn::Error::new(
                span,
                "`api_return` has no effect on a method returning `()`",
            ));
        }
        None
    } else {
        Some(method_tags.return_tags)
    };

    Ok(Some(MethodSpec {
        name: method.sig.ident.unraw().to_string(),
        tags: method_tags.tags,
        params,
        returns,
    }))
}

/// Binding name of a parameter. Other patterns are named by their source
/// text with whitespace removed.
fn param_name(pat: &Pat) -> String {
    match pat {
        Pat::Ident(binding) => binding.ident.unraw().to_string(),
        other => quote!(#other).to_string().split_whitespace().collect(),
    }
}

fn returns_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => is_unit(ty),
    }
}

fn is_unit(ty: &Type) -> bool {
    match ty {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        Type::Paren(paren) => is_unit(&paren.elem),
        Type::Group(group) => is_unit(&group.elem),
        _ => false,
    }
}

impl MethodSpec {
    fn to_runtime(&self, runtime: &syn::Path) -> TokenStream {
        let name = syn::LitStr::new(&self.name, Span::call_site());
        let tags = self.tags.iter().map(|tag| tag.to_runtime(runtime));
        let params = self.params.iter().map(|param| param.to_runtime(runtime));
        let returns = self.returns.as_ref().map(|tags| {
            let tags = tags.iter().map(|tag| tag.to_runtime(runtime));
            quote! {
                .with_return(
                    #runtime::ReturnMetadata::new()
                        #(.with_annotation(#tags))*
                )
            }
        });

        quote! {
            #runtime::MethodMetadata::new(#name)
                #(.with_annotation(#tags))*
                #(.with_param(#params))*
                #returns
        }
    }
}

impl ParamSpec {
    fn to_runtime(&self, runtime: &syn::Path) -> TokenStream {
        let name = syn::LitStr::new(&self.name, Span::call_site());
        let tags = self.tags.iter().map(|tag| tag.to_runtime(runtime));
        quote! {
            #runtime::ParamMetadata::new(#name)
                #(.with_annotation(#tags))*
        }
    }
}
