//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts field annotations during macro expansion. The
//! annotation text itself is kept verbatim; its grammar is checked at runtime
//! by `envtag::annotation` so that validator names can be resolved against
//! the registry in use.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Annotation text from `#[env("...")]`.
    ///
    /// `None` when the field has no annotation; such a field is still visited
    /// so that nested structs are recursed.
    pub annotation: Option<String>,

    /// `#[env(skip)]`: leave the field out of the generated schema.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            // #[env("NAME,validator=args")]
            if let Ok(tag) = attr.parse_args::<LitStr>() {
                if attrs.annotation.is_some() {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "duplicate env annotation on the same field",
                    ));
                }
                attrs.annotation = Some(tag.value());
                continue;
            }

            // #[env(skip)]
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute, expected a string annotation or `skip`"))
            })?;
        }

        if attrs.skip && attrs.annotation.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "`skip` cannot be combined with an env annotation",
            ));
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_annotation() {
        let field: Field = parse_quote! {
            #[env("HOST,required")]
            pub host: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation, Some("HOST,required".to_string()));
        assert!(!attrs.skip);
    }

    #[test]
    fn test_parse_annotation_with_spaced_args() {
        let field: Field = parse_quote! {
            #[env("ENV,expectedValues=development production")]
            pub env: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(
            attrs.annotation.as_deref(),
            Some("ENV,expectedValues=development production")
        );
    }

    #[test]
    fn test_parse_no_attribute() {
        let field: Field = parse_quote! {
            pub web: WebConfig
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation, None);
        assert!(!attrs.skip);
    }

    #[test]
    fn test_parse_skip() {
        let field: Field = parse_quote! {
            #[env(skip)]
            pub handles: Vec<String>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.skip);
    }

    #[test]
    fn test_ignores_other_attributes() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            #[env("X")]
            pub x: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation.as_deref(), Some("X"));
    }

    #[test]
    fn test_reject_skip_with_annotation() {
        let field: Field = parse_quote! {
            #[env("HOST")]
            #[env(skip)]
            pub host: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_reject_duplicate_annotation() {
        let field: Field = parse_quote! {
            #[env("HOST")]
            #[env("OTHER_HOST")]
            pub host: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_reject_unknown_key() {
        let field: Field = parse_quote! {
            #[env(default = 8080)]
            pub port: u16
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }
}
