//! Bind environment variables into typed structs through field annotations
//!
//! `envtag` populates a configuration struct from the process environment in
//! one startup call and checks each value against the validators named in the
//! field's annotation. Every failure is collected, so a misconfigured service
//! reports all of its problems at once instead of one per restart.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Lookup)]` with one `#[env("...")]` annotation per field
//! - **Validated**: `required` and `expectedValues` built in, custom validators via [`Registry`]
//! - **Aggregated errors**: one [`LookupError`] listing every failing field in order
//! - **Nested structs**: composite fields are recursed, each leaf keeps its own variable name
//!
//! # Annotation Grammar
//!
//! ```text
//! #[env("NAME[,validator[=args]]*")]
//! ```
//!
//! - `#[env("PORT")]`: read `PORT`
//! - `#[env("DB,required")]`: fail when `DB` is unset or empty
//! - `#[env("ENV,expectedValues=development production")]`: allow-list, space separated
//! - `#[env("-")]` or no attribute: leave the field alone (nested structs are still recursed).
//!   The field is still visited, so its type must implement [`Field`]
//! - `#[env(skip)]`: drop the field from the schema; its type needs no [`Field`] impl,
//!   so use it for fields such as `f64` or `Vec<String>`
//!
//! # Value Parsing
//!
//! - Strings: trimmed of surrounding whitespace
//! - Integers: base 10, any primitive width
//! - Booleans: `1 t T TRUE true True` and `0 f F FALSE false False`
//!
//! An unset or empty variable leaves the field at its current value.
//!
//! # Example
//!
//! ```rust
//! use envtag::Lookup;
//!
//! #[derive(Debug, Default, Lookup)]
//! struct Config {
//!     #[env("APP_NAME,required")]
//!     pub name: String,
//!
//!     #[env("APP_ENV,expectedValues=development production")]
//!     pub env: String,
//!
//!     #[env("APP_PORT")]
//!     pub port: u16,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("APP_NAME", "knight");
//! #     std::env::set_var("APP_ENV", "production");
//! let config = Config::from_env()?;
//! #     assert_eq!(config.name, "knight");
//! #     assert_eq!(config.port, 0);
//! #     Ok(())
//! # }
//! ```
//!
//! # Custom Validators
//!
//! ```rust
//! use envtag::{EnvError, Environment, Lookup, Registry};
//!
//! #[derive(Debug, Default, Lookup)]
//! struct Config {
//!     #[env("CALLBACK_URL,https")]
//!     pub callback_url: String,
//! }
//!
//! let mut registry = Registry::default();
//! registry.add_validator("https", |_args: &str| {
//!     |name: &str, value: &str| {
//!         if value.is_empty() || value.starts_with("https://") {
//!             Ok(())
//!         } else {
//!             Err(EnvError::invalid(name, "must use https"))
//!         }
//!     }
//! });
//!
//! std::env::set_var("CALLBACK_URL", "http://example.com");
//! let err = Config::from_source(&registry, &Environment).unwrap_err();
//! assert_eq!(err.to_string(), "CALLBACK_URL is invalid: must use https");
//! ```

// Lets the derive's `::envtag::` paths resolve inside this crate's own tests.
extern crate self as envtag;

pub mod annotation;
mod error;
pub mod field;
mod registry;
mod source;
pub mod validator;
mod walker;

pub use envtag_derive::Lookup;
pub use error::{EnvError, ErrorKind, FieldError, LookupError};
pub use field::{Field, FieldDescriptor, FieldKind};
pub use registry::{Registry, ValidatorFactory};
pub use source::{Environment, Source};
pub use validator::Validator;
pub use walker::Walker;

/// A struct whose fields can be populated from environment variables.
///
/// Normally derived with `#[derive(Lookup)]`.
pub trait Lookup {
    /// Visit every bindable field in declaration order.
    fn walk(&mut self, walker: &mut Walker<'_>);

    /// Describe the binding schema without reading any variable.
    fn describe() -> Vec<FieldDescriptor>
    where
        Self: Sized;

    /// Build `Self::default()` and populate it from the process environment
    /// using the built-in validators.
    fn from_env() -> Result<Self, LookupError>
    where
        Self: Default + Sized,
    {
        Self::from_source(&Registry::default(), &Environment)
    }

    /// Build `Self::default()` and populate it from `source`.
    fn from_source(registry: &Registry, source: &dyn Source) -> Result<Self, LookupError>
    where
        Self: Default + Sized,
    {
        let mut target = Self::default();
        lookup_with(&mut target, registry, source)?;
        Ok(target)
    }
}

/// Populate `target` from the process environment with the default [`Registry`].
///
/// Variables are read one at a time while fields are visited, so the result
/// is not an atomic snapshot if the environment changes concurrently. On
/// error, `target` may be partially populated and must not be used.
pub fn lookup<T: Lookup>(target: &mut T) -> Result<(), LookupError> {
    lookup_with(target, &Registry::default(), &Environment)
}

/// Populate `target` from `source`, resolving validators through `registry`.
pub fn lookup_with<T: Lookup>(
    target: &mut T,
    registry: &Registry,
    source: &dyn Source,
) -> Result<(), LookupError> {
    let mut walker = Walker::new(registry, source);
    Lookup::walk(target, &mut walker);
    walker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default, Lookup)]
    struct Web {
        #[env("HOST,required")]
        host: String,
        #[env("PORT")]
        port: u16,
    }

    #[derive(Debug, Default, Lookup)]
    struct Config {
        web: Web,
        #[env("ENABLED")]
        enabled: bool,
    }

    #[test]
    fn test_lookup_with_map_source() {
        let env: HashMap<String, String> = [
            ("HOST".to_string(), "localhost".to_string()),
            ("PORT".to_string(), "3000".to_string()),
        ]
        .into();

        let mut config = Config::default();
        lookup_with(&mut config, &Registry::default(), &env).unwrap();
        assert_eq!(config.web.host, "localhost");
        assert_eq!(config.web.port, 3000);
        assert!(!config.enabled);
    }

    #[test]
    fn test_lookup_with_empty_registry_reports_unknown() {
        let env: HashMap<String, String> = HashMap::new();
        let err = Config::from_source(&Registry::new(), &env).unwrap_err();
        assert_eq!(err.to_string(), "unknown validator `required` for HOST");
    }
}
