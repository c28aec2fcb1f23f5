//! `ApiType` implementation for `#[derive(ApiType)]`.

use proc_macro2::{Span, TokenStream};
use quote::quote;

use crate::attrs::{ApiTypeAttrs, TagSpec};

pub fn generate_api_type(attrs: &ApiTypeAttrs, runtime: &syn::Path) -> TokenStream {
    let ident = &attrs.ident;
    let (impl_generics, ty_generics, where_clause) = attrs.generics.split_for_impl();
    let name = syn::LitStr::new(&ident.to_string(), Span::call_site());

    let tags = attrs
        .description
        .iter()
        .map(|text| TagSpec::Description(text.clone()).to_runtime(runtime));

    quote! {
        impl #impl_generics #runtime::ApiType for #ident #ty_generics #where_clause {
            fn api_name() -> &'static str {
                #name
            }

            fn api_annotations() -> #runtime::Annotations {
                #runtime::Annotations::new()
                    #(.with(#tags))*
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darling::FromDeriveInput;
    use syn::parse_quote;

    #[test]
    fn generic_type_keeps_bounds() {
        let input: syn::DeriveInput = parse_quote! {
            #[api(description = "Paged results")]
            pub struct Page<T: Clone> where T: Send {
                items: Vec<T>,
            }
        };
        let attrs = ApiTypeAttrs::from_derive_input(&input).unwrap();

        let generated = generate_api_type(&attrs, &parse_quote!(::apispec));
        let item: syn::ItemImpl = syn::parse2(generated).unwrap();

        let self_ty = &item.self_ty;
        assert_eq!(quote!(#self_ty).to_string(), quote!(Page<T>).to_string());
        assert_eq!(item.generics.params.len(), 1);
        assert!(item.generics.where_clause.is_some());
        assert_eq!(item.items.len(), 2);
    }

    #[test]
    fn undescribed_type_has_no_tags() {
        let input: syn::DeriveInput = parse_quote! {
            enum Plain { A }
        };
        let attrs = ApiTypeAttrs::from_derive_input(&input).unwrap();

        let generated = generate_api_type(&attrs, &parse_quote!(::apispec)).to_string();
        assert!(generated.contains("\"Plain\""));
        assert!(!generated.contains("DescriptionTag"));
    }
}
