//! Error types for environment variable binding

use serde::{Serialize, Serializer};
use std::fmt;

/// A single failure raised while binding one field.
///
/// Validators, the annotation parser and the field binder all report through
/// this type. Variants carry the environment variable name so the rendered
/// message stands on its own when several failures are listed together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind")]
pub enum EnvError {
    /// The resolved value is empty but the field is annotated `required`.
    #[error("{name} is required")]
    #[serde(rename = "missing-required")]
    Required {
        /// Name of the environment variable
        name: String,
    },

    /// The resolved value is not part of an `expectedValues` allow-list.
    #[error("{name} is unexpected value: {value}")]
    #[serde(rename = "unexpected-value")]
    UnexpectedValue {
        /// Name of the environment variable
        name: String,
        /// Value that was rejected
        value: String,
    },

    /// The raw string cannot be converted into the field's type.
    #[error("error parsing {type_name} for {name}: {reason}")]
    #[serde(rename = "coercion-failure")]
    Parse {
        /// Name of the environment variable being parsed
        name: String,
        /// Type name that parsing was attempted for
        type_name: String,
        /// Error message from the parser
        reason: String,
    },

    /// The field's type has no coercion rule.
    #[error("unsupported type `{type_name}` for `{name}`")]
    #[serde(rename = "unsupported-type")]
    UnsupportedType {
        /// Name of the environment variable
        name: String,
        /// Declared type of the field
        type_name: String,
    },

    /// The annotation references a validator that is not registered.
    #[error("unknown validator `{validator}` for {name}")]
    #[serde(rename = "unknown-validator")]
    UnknownValidator {
        /// Name of the environment variable
        name: String,
        /// Validator name as written in the annotation
        validator: String,
    },

    /// The annotation text does not follow the `NAME[,validator[=args]]*` grammar.
    #[error("malformed annotation `{tag}`: {reason}")]
    #[serde(rename = "malformed-annotation")]
    MalformedAnnotation {
        /// Raw annotation text
        tag: String,
        /// What is wrong with it
        reason: String,
    },

    /// Failure reported by a user-registered validator.
    #[error("{name} is invalid: {reason}")]
    #[serde(rename = "invalid")]
    Invalid {
        /// Name of the environment variable
        name: String,
        /// Message supplied by the validator
        reason: String,
    },
}

impl EnvError {
    /// Create a missing required value error
    pub fn required(name: impl Into<String>) -> Self {
        Self::Required { name: name.into() }
    }

    /// Create an allow-list violation error
    pub fn unexpected_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnexpectedValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a parse error for the target type `T`
    pub fn parse_error<T>(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            reason: message.to_string(),
        }
    }

    /// Create a failure for custom validators
    pub fn invalid(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Invalid {
            name: name.into(),
            reason: message.to_string(),
        }
    }

    pub(crate) fn malformed(tag: &str, reason: impl fmt::Display) -> Self {
        Self::MalformedAnnotation {
            tag: tag.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Category of this error, without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Required { .. } => ErrorKind::Required,
            Self::UnexpectedValue { .. } => ErrorKind::UnexpectedValue,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::UnknownValidator { .. } => ErrorKind::UnknownValidator,
            Self::MalformedAnnotation { .. } => ErrorKind::MalformedAnnotation,
            Self::Invalid { .. } => ErrorKind::Invalid,
        }
    }
}

/// Fieldless mirror of [`EnvError`] for matching on the failure category.
///
/// Serializes to the same `kind` label as the corresponding [`EnvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A `required` variable is unset or empty.
    #[serde(rename = "missing-required")]
    Required,
    /// A value is missing from an `expectedValues` allow-list.
    #[serde(rename = "unexpected-value")]
    UnexpectedValue,
    /// A raw string could not be converted to the field's type.
    #[serde(rename = "coercion-failure")]
    Parse,
    /// The field's type has no coercion rule.
    #[serde(rename = "unsupported-type")]
    UnsupportedType,
    /// An annotation names a validator the registry does not know.
    #[serde(rename = "unknown-validator")]
    UnknownValidator,
    /// An annotation does not follow the grammar.
    #[serde(rename = "malformed-annotation")]
    MalformedAnnotation,
    /// A custom validator rejected the value.
    #[serde(rename = "invalid")]
    Invalid,
}

/// An [`EnvError`] attributed to the field it was raised for.
///
/// Serializes as one flat record: `field`, the `kind` label, the variant's
/// payload, and the rendered `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of Rust field names from the root structure (`web.host`).
    ///
    /// Stays stable even when two fields share an environment variable.
    pub field: String,
    /// The failure itself
    pub error: EnvError,
}

impl FieldError {
    /// Category of the failure
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Rendered message, as listed in [`LookupError`]'s text form
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Record<'a> {
            field: &'a str,
            #[serde(flatten)]
            error: &'a EnvError,
            message: String,
        }

        Record {
            field: &self.field,
            error: &self.error,
            message: self.message(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Every failure collected during one lookup, in field declaration order
/// (depth-first through nested structures).
///
/// The textual form lists one message per line. A lookup that returns this
/// error may have populated some fields; the target must not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LookupError {
    errors: Vec<FieldError>,
}

impl LookupError {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Collected failures, in field declaration order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Take ownership of the collected failures
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Number of failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false` for errors returned by a lookup
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the failures in order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LookupError {}

impl IntoIterator for LookupError {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a LookupError {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
