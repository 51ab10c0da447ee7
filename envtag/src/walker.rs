//! Depth-first traversal that binds and validates each field

use crate::annotation::AnnotationSpec;
use crate::error::{EnvError, FieldError, LookupError};
use crate::field::{self, Field, FieldKind};
use crate::registry::Registry;
use crate::source::Source;

/// Binding pass state shared by every field of one lookup.
///
/// Generated [`Lookup::walk`](crate::Lookup::walk) implementations call
/// [`Walker::visit`] once per field in declaration order. Failures are
/// collected rather than returned so that one pass reports every problem.
pub struct Walker<'a> {
    registry: &'a Registry,
    source: &'a dyn Source,
    path: Vec<&'static str>,
    errors: Vec<FieldError>,
}

impl<'a> Walker<'a> {
    pub fn new(registry: &'a Registry, source: &'a dyn Source) -> Self {
        Self {
            registry,
            source,
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Bind one field.
    ///
    /// Composite fields are descended into whatever their annotation says;
    /// nested leaves resolve against their own variable names.
    pub fn visit<F: Field>(&mut self, name: &'static str, annotation: &'static str, field: &mut F) {
        self.path.push(name);
        match F::KIND {
            FieldKind::Composite => field.walk(self),
            _ => self.bind_leaf(annotation, field),
        }
        self.path.pop();
    }

    fn bind_leaf<F: Field>(&mut self, annotation: &str, field: &mut F) {
        let spec = match AnnotationSpec::parse(annotation) {
            Ok(Some(spec)) => spec,
            Ok(None) => {
                tracing::trace!(field = %self.field_path(), "no annotation, skipping");
                return;
            }
            Err(e) => {
                self.push(e);
                return;
            }
        };

        let (validators, unknown) = spec.instantiate(self.registry);
        for e in unknown {
            self.push(e);
        }

        let env_name = spec.env_name.as_str();
        let raw = self.source.get(env_name).unwrap_or_default();
        tracing::debug!(
            field = %self.field_path(),
            env = env_name,
            set = !raw.is_empty(),
            validators = validators.len(),
            "binding field"
        );

        for validator in &validators {
            if let Err(e) = validator.validate(env_name, &raw) {
                self.push(e);
            }
        }

        if let Err(e) = field::bind(field, env_name, &raw) {
            self.push(e);
        }
    }

    fn push(&mut self, error: EnvError) {
        tracing::debug!(field = %self.field_path(), %error, "field failed");
        let field = self.field_path();
        self.errors.push(FieldError { field, error });
    }

    fn field_path(&self) -> String {
        self.path.join(".")
    }

    /// Errors collected so far.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// End the pass.
    pub fn finish(self) -> Result<(), LookupError> {
        tracing::debug!(errors = self.errors.len(), "environment lookup finished");
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(LookupError::new(self.errors))
        }
    }
}
