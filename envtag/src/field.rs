//! Typed field slots and string coercion

use crate::error::EnvError;
use crate::walker::Walker;
use crate::Lookup;
use std::fmt;

/// Declared kind of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// A nested structure deriving [`Lookup`].
    Composite,
    /// A type with no coercion rule, named for error messages.
    Other(&'static str),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Integer => f.write_str("integer"),
            Self::Boolean => f.write_str("boolean"),
            Self::Composite => f.write_str("composite"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A struct field the walker can populate.
///
/// Implemented for `String`, the primitive integers, `bool`, and every type
/// deriving [`Lookup`] (as [`FieldKind::Composite`]). Third-party types may
/// implement it; without overriding [`Field::coerce`] they report
/// [`EnvError::UnsupportedType`] whenever a value is present.
pub trait Field {
    const KIND: FieldKind;

    /// Convert `raw` (never empty) and store it.
    fn coerce(&mut self, env_name: &str, _raw: &str) -> Result<(), EnvError> {
        Err(EnvError::UnsupportedType {
            name: env_name.to_string(),
            type_name: Self::KIND.to_string(),
        })
    }

    /// Visit nested fields. Only composite fields have any.
    fn walk(&mut self, _walker: &mut Walker<'_>) {}

    /// Describe nested fields. Only composite fields have any.
    fn children() -> Vec<FieldDescriptor> {
        Vec::new()
    }
}

/// Store `raw` into `field`, leaving the field untouched when `raw` is empty.
///
/// Presence is the job of the `required` validator, so an empty value is
/// never an error here.
pub fn bind<F: Field>(field: &mut F, env_name: &str, raw: &str) -> Result<(), EnvError> {
    if raw.is_empty() {
        return Ok(());
    }
    field.coerce(env_name, raw)
}

impl Field for String {
    const KIND: FieldKind = FieldKind::Text;

    fn coerce(&mut self, _env_name: &str, raw: &str) -> Result<(), EnvError> {
        *self = raw.trim().to_string();
        Ok(())
    }
}

macro_rules! impl_integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn coerce(&mut self, env_name: &str, raw: &str) -> Result<(), EnvError> {
                    *self = raw
                        .parse::<$ty>()
                        .map_err(|e| EnvError::parse_error::<$ty>(env_name, e))?;
                    Ok(())
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Field for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn coerce(&mut self, env_name: &str, raw: &str) -> Result<(), EnvError> {
        *self = parse_bool(raw).ok_or_else(|| {
            EnvError::parse_error::<bool>(env_name, format!("invalid boolean literal `{raw}`"))
        })?;
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl<T: Lookup> Field for T {
    const KIND: FieldKind = FieldKind::Composite;

    fn walk(&mut self, walker: &mut Walker<'_>) {
        Lookup::walk(self, walker);
    }

    fn children() -> Vec<FieldDescriptor> {
        T::describe()
    }
}

/// Static description of one field: its Rust name, kind and annotation.
///
/// Built on demand by [`Lookup::describe`] through [`FieldDescriptor::of`];
/// binding never constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub annotation: &'static str,
    /// Fields of a composite, in declaration order.
    pub children: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    pub fn of<F: Field>(name: &'static str, annotation: &'static str) -> Self {
        Self {
            name,
            kind: F::KIND,
            annotation,
            children: F::children(),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.kind == FieldKind::Composite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_text_trims() {
        let mut s = String::new();
        bind(&mut s, "HOST", "  0.0.0.0 \n").unwrap();
        assert_eq!(s, "0.0.0.0");
    }

    #[test]
    fn test_bind_empty_keeps_value() {
        let mut n = 7i64;
        bind(&mut n, "PORT", "").unwrap();
        assert_eq!(n, 7);

        let mut b = false;
        bind(&mut b, "ENABLED", "").unwrap();
        assert!(!b);
    }

    #[test]
    fn test_bind_integer() {
        let mut n = 0i64;
        bind(&mut n, "PORT", "8080").unwrap();
        assert_eq!(n, 8080);

        let mut m = 0i32;
        bind(&mut m, "OFFSET", "-15").unwrap();
        assert_eq!(m, -15);
    }

    #[test]
    fn test_bind_integer_failure_names_variable() {
        let mut n = 0i64;
        let err = bind(&mut n, "PORT", "abc").unwrap_err();
        assert!(matches!(&err, EnvError::Parse { name, .. } if name == "PORT"));
        assert_eq!(
            err.to_string(),
            "error parsing i64 for PORT: invalid digit found in string"
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn test_bind_unsigned_rejects_negative() {
        let mut n = 0u16;
        assert!(bind(&mut n, "PORT", "-1").is_err());
    }

    #[test]
    fn test_bind_bool_aliases() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            let mut b = false;
            bind(&mut b, "FLAG", raw).unwrap();
            assert!(b, "{raw} should be true");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            let mut b = true;
            bind(&mut b, "FLAG", raw).unwrap();
            assert!(!b, "{raw} should be false");
        }
    }

    #[test]
    fn test_bind_bool_failure() {
        let mut b = false;
        let err = bind(&mut b, "FLAG", "yes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error parsing bool for FLAG: invalid boolean literal `yes`"
        );
    }

    struct Ratio(#[allow(dead_code)] f64);

    impl Field for Ratio {
        const KIND: FieldKind = FieldKind::Other("f64");
    }

    #[test]
    fn test_bind_unsupported_type() {
        let mut r = Ratio(0.0);
        let err = bind(&mut r, "RATIO", "0.5").unwrap_err();
        assert_eq!(err.to_string(), "unsupported type `f64` for `RATIO`");
        assert!(bind(&mut r, "RATIO", "").is_ok());
    }

    #[test]
    fn test_descriptor_of_leaf() {
        let d = FieldDescriptor::of::<u16>("port", "PORT,required");
        assert_eq!(d.kind, FieldKind::Integer);
        assert!(d.children.is_empty());
        assert!(!d.is_composite());
    }
}
