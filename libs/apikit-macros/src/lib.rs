//! Proc-macro support for apikit path-parameter binding.
//!
//! `#[derive(BindPath)]` reads the `#[path_param("name")]` field attribute
//! and generates the `BindPath` impl listing the declared fields in source
//! order. The field's declared type picks the slot kind: `String`, `i64`
//! and `u64` map to the three supported conversions; any other type is
//! recorded as unsupported so the mismatch surfaces as the adapter's
//! bind-time error rather than silently coercing.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

#[proc_macro_derive(BindPath, attributes(path_param))]
pub fn derive_bind_path(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "BindPath can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "BindPath requires named fields",
        ));
    };

    let mut entries = Vec::new();
    for field in &fields.named {
        let Some(attr) = field
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("path_param"))
        else {
            continue;
        };
        let name: LitStr = attr.parse_args()?;
        let Some(ident) = &field.ident else { continue };
        let slot = slot_for(&field.ty, ident);
        entries.push(quote! {
            ::apikit::path::PathField { name: #name, slot: #slot }
        });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::apikit::path::BindPath for #ident #ty_generics #where_clause {
            fn path_fields(&mut self) -> ::std::vec::Vec<::apikit::path::PathField<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

fn slot_for(ty: &syn::Type, ident: &syn::Ident) -> TokenStream2 {
    if let syn::Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            match segment.ident.to_string().as_str() {
                "String" => {
                    return quote! { ::apikit::path::PathSlot::Text(&mut self.#ident) }
                }
                "i64" => return quote! { ::apikit::path::PathSlot::I64(&mut self.#ident) },
                "u64" => return quote! { ::apikit::path::PathSlot::U64(&mut self.#ident) },
                _ => {}
            }
        }
    }
    let kind = quote!(#ty).to_string().replace(' ', "");
    quote! { ::apikit::path::PathSlot::Unsupported { kind: #kind } }
}
