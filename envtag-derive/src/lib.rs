//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `Lookup` derive macro
///
/// Implements `envtag::Lookup` by generating the binding schema of the
/// struct: one `Walker::visit` call per field, in declaration order, carrying
/// the field's annotation text.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env("NAME,validator=args")]`: environment variable name and validators
/// - `#[env("-")]`: do not bind this field (nested structs are still recursed)
/// - `#[env(skip)]`: leave the field out entirely
///
/// Fields without an attribute are visited with an empty annotation, which
/// recurses into nested structs and ignores everything else. Every visited
/// field's type must implement `envtag::Field`.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(Lookup, attributes(env))]
pub fn derive_lookup(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Lookup only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Lookup only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut visits = Vec::new();
    let mut descriptors = Vec::new();

    for field in fields {
        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };
        if attrs.skip {
            continue;
        }

        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let name = field_name.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
        let annotation = attrs.annotation.unwrap_or_default();

        visits.push(quote! {
            walker.visit(#name, #annotation, &mut self.#field_name);
        });
        descriptors.push(quote! {
            ::envtag::FieldDescriptor::of::<#field_type>(#name, #annotation)
        });
    }

    let expanded = quote! {
        impl #impl_generics ::envtag::Lookup for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn walk(&mut self, walker: &mut ::envtag::Walker<'_>) {
                #(#visits)*
            }

            fn describe() -> ::std::vec::Vec<::envtag::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    };

    TokenStream::from(expanded)
}
