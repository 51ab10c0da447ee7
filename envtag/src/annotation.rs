//! Parsing of field annotations.
//!
//! An annotation names the environment variable a field is read from and the
//! validators its value must pass:
//!
//! ```text
//! annotation    = env-name ("," validator)*
//! validator     = name ["=" args]
//! ```
//!
//! `args` is free text up to the next `,` and may contain spaces, e.g.
//! `ENV,required,expectedValues=development production`. An empty annotation
//! or the sentinel `-` disables binding for the field.

use crate::error::EnvError;
use crate::registry::Registry;
use crate::validator::Validator;
use regex::Regex;
use std::sync::OnceLock;

/// Separator between the environment name and each validator clause.
pub const SEPARATOR: char = ',';

/// Annotation that disables binding for a field.
pub const SKIP: &str = "-";

const CLAUSE_PATTERN: &str = r"^(\w+)(?:=(.*))?$";

fn clause_regex() -> Option<&'static Regex> {
    static CLAUSE: OnceLock<Option<Regex>> = OnceLock::new();
    CLAUSE.get_or_init(|| Regex::new(CLAUSE_PATTERN).ok()).as_ref()
}

/// One `name[=args]` clause of an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSpec {
    pub name: String,
    /// Text after `=`, empty when the clause has no arguments.
    pub args: String,
}

impl ValidatorSpec {
    fn parse(clause: &str) -> Option<Self> {
        let captures = clause_regex()?.captures(clause.trim())?;
        Some(Self {
            name: captures[1].to_string(),
            args: captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }
}

/// A parsed annotation: where to read the value and how to check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    /// Environment variable name, never empty.
    pub env_name: String,
    /// Validator clauses in declaration order.
    pub validators: Vec<ValidatorSpec>,
}

impl AnnotationSpec {
    /// Parse annotation text.
    ///
    /// Returns `Ok(None)` for an empty annotation or [`SKIP`]. A missing
    /// environment name or a clause that is not `name[=args]` (including the
    /// empty clause left by a trailing separator) is a
    /// [`EnvError::MalformedAnnotation`].
    pub fn parse(tag: &str) -> Result<Option<Self>, EnvError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() || trimmed == SKIP {
            return Ok(None);
        }

        let (env_name, clauses) = match trimmed.split_once(SEPARATOR) {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (trimmed, None),
        };
        if env_name.is_empty() {
            return Err(EnvError::malformed(tag, "missing environment variable name"));
        }

        let validators = match clauses {
            Some(rest) => rest
                .split(SEPARATOR)
                .map(|clause| {
                    ValidatorSpec::parse(clause).ok_or_else(|| {
                        EnvError::malformed(tag, format!("invalid validator clause `{clause}`"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Some(Self {
            env_name: env_name.to_string(),
            validators,
        }))
    }

    /// Build one validator per clause through `registry`.
    ///
    /// Unknown names do not stop the others from being built; each is
    /// reported as an [`EnvError::UnknownValidator`] in clause order.
    pub fn instantiate(&self, registry: &Registry) -> (Vec<Box<dyn Validator>>, Vec<EnvError>) {
        let mut validators = Vec::with_capacity(self.validators.len());
        let mut errors = Vec::new();
        for spec in &self.validators {
            match registry.instantiate(&self.env_name, spec) {
                Ok(validator) => validators.push(validator),
                Err(e) => errors.push(e),
            }
        }
        (validators, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(tag: &str) -> AnnotationSpec {
        AnnotationSpec::parse(tag).unwrap().unwrap()
    }

    fn spec(name: &str, args: &str) -> ValidatorSpec {
        ValidatorSpec {
            name: name.to_string(),
            args: args.to_string(),
        }
    }

    #[test]
    fn test_parse_name_only() {
        let a = parse("PORT");
        assert_eq!(a.env_name, "PORT");
        assert!(a.validators.is_empty());
    }

    #[test]
    fn test_parse_skip_and_empty() {
        assert_eq!(AnnotationSpec::parse("").unwrap(), None);
        assert_eq!(AnnotationSpec::parse("-").unwrap(), None);
        assert_eq!(AnnotationSpec::parse("  ").unwrap(), None);
    }

    #[test]
    fn test_parse_validators_in_order() {
        let a = parse("ENV,required,expectedValues=development production");
        assert_eq!(a.env_name, "ENV");
        assert_eq!(
            a.validators,
            [
                spec("required", ""),
                spec("expectedValues", "development production")
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_spaces_around_clauses() {
        let a = parse("NAME , required");
        assert_eq!(a.env_name, "NAME");
        assert_eq!(a.validators, [spec("required", "")]);
    }

    #[test]
    fn test_parse_args_keep_punctuation() {
        let a = parse("LEVEL,expectedValues=info warn.v2 error-x");
        assert_eq!(a.validators[0].args, "info warn.v2 error-x");
    }

    #[test]
    fn test_parse_missing_name() {
        let err = AnnotationSpec::parse(",required").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedAnnotation);
        assert_eq!(
            err.to_string(),
            "malformed annotation `,required`: missing environment variable name"
        );
    }

    #[test]
    fn test_parse_trailing_separator() {
        let err = AnnotationSpec::parse("NAME,required,").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed annotation `NAME,required,`: invalid validator clause ``"
        );
    }

    #[test]
    fn test_parse_invalid_clause() {
        let err = AnnotationSpec::parse("NAME,=x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedAnnotation);
    }

    #[test]
    fn test_instantiate_reports_unknown_and_keeps_known() {
        let a = parse("PORT,min=1,required");
        let (validators, errors) = a.instantiate(&Registry::default());
        assert_eq!(validators.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "unknown validator `min` for PORT");
    }
}
