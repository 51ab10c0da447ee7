//! Validator capability and the built-in validators

use crate::error::EnvError;

/// Name of the presence validator.
pub const REQUIRED: &str = "required";

/// Name of the allow-list validator.
pub const EXPECTED_VALUES: &str = "expectedValues";

/// Inspects the resolved value of one environment variable.
///
/// Instances are built by a [`Registry`](crate::Registry) factory from the
/// arguments written in the annotation, once per field and per lookup, and
/// are dropped when the lookup returns.
///
/// Closures with the matching signature are validators too:
///
/// ```rust
/// use envtag::{EnvError, Registry};
///
/// let mut registry = Registry::default();
/// registry.add_validator("nonZero", |_args: &str| {
///     |name: &str, value: &str| {
///         if value == "0" {
///             return Err(EnvError::invalid(name, "must not be zero"));
///         }
///         Ok(())
///     }
/// });
/// assert!(registry.contains("nonZero"));
/// ```
pub trait Validator {
    /// Check `value`, the raw string read for `env_name`.
    ///
    /// The value is empty when the variable is not set.
    fn validate(&self, env_name: &str, value: &str) -> Result<(), EnvError>;
}

impl<F> Validator for F
where
    F: Fn(&str, &str) -> Result<(), EnvError>,
{
    fn validate(&self, env_name: &str, value: &str) -> Result<(), EnvError> {
        self(env_name, value)
    }
}

/// Fails when the value is empty. Arguments are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Required {
    pub fn new(_args: &str) -> Self {
        Self
    }
}

impl Validator for Required {
    fn validate(&self, env_name: &str, value: &str) -> Result<(), EnvError> {
        if value.is_empty() {
            return Err(EnvError::required(env_name));
        }
        Ok(())
    }
}

/// Fails when the value is not one of a whitespace-separated allow-list.
///
/// Matching is exact and case-sensitive. An unset variable resolves to the
/// empty string, which no list entry can match.
#[derive(Debug, Clone, Default)]
pub struct ExpectedValues {
    values: Vec<String>,
}

impl ExpectedValues {
    pub fn new(args: &str) -> Self {
        Self {
            values: args.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Validator for ExpectedValues {
    fn validate(&self, env_name: &str, value: &str) -> Result<(), EnvError> {
        if self.values.iter().any(|expected| expected == value) {
            return Ok(());
        }
        Err(EnvError::unexpected_value(env_name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_empty() {
        let v = Required::new("");
        assert_eq!(
            v.validate("NAME", ""),
            Err(EnvError::required("NAME"))
        );
        assert!(v.validate("NAME", "knight").is_ok());
    }

    #[test]
    fn test_required_ignores_args() {
        assert!(Required::new("whatever").validate("NAME", "x").is_ok());
    }

    #[test]
    fn test_expected_values() {
        let v = ExpectedValues::new("a b c");
        assert_eq!(v.values(), ["a", "b", "c"]);
        assert!(v.validate("ENV", "b").is_ok());

        let err = v.validate("ENV", "d").unwrap_err();
        assert_eq!(err.to_string(), "ENV is unexpected value: d");
    }

    #[test]
    fn test_expected_values_is_case_sensitive() {
        let v = ExpectedValues::new("development production");
        assert!(v.validate("ENV", "Production").is_err());
    }

    #[test]
    fn test_expected_values_rejects_unset() {
        let v = ExpectedValues::new("development production");
        assert_eq!(
            v.validate("ENV", "").unwrap_err().to_string(),
            "ENV is unexpected value: "
        );
    }

    #[test]
    fn test_closure_validator() {
        let v = |name: &str, value: &str| {
            if value.starts_with("http") {
                Ok(())
            } else {
                Err(EnvError::invalid(name, "must be a URL"))
            }
        };
        assert!(v.validate("URL", "https://example.com").is_ok());
        assert_eq!(
            v.validate("URL", "example").unwrap_err().to_string(),
            "URL is invalid: must be a URL"
        );
    }
}
