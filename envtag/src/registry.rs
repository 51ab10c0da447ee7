//! Catalog of validator factories keyed by annotation name

use crate::annotation::ValidatorSpec;
use crate::error::EnvError;
use crate::validator::{ExpectedValues, Required, Validator, EXPECTED_VALUES, REQUIRED};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a configured validator from the annotation arguments.
pub type ValidatorFactory = Arc<dyn Fn(&str) -> Box<dyn Validator> + Send + Sync>;

/// Maps validator names used in annotations to their factories.
///
/// A registry is an ordinary value handed to each lookup, so different
/// callers can use different validator sets side by side. `Registry::default()`
/// knows `required` and `expectedValues`; `Registry::new()` knows nothing.
#[derive(Clone)]
pub struct Registry {
    factories: HashMap<String, ValidatorFactory>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any previous entry.
    ///
    /// Subsequent lookups using this registry route every annotation clause
    /// named `name` through `factory`, building a fresh validator each time.
    pub fn add_validator<F, V>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&str) -> V + Send + Sync + 'static,
        V: Validator + 'static,
    {
        let name = name.into();
        let factory: ValidatorFactory =
            Arc::new(move |args: &str| Box::new(factory(args)) as Box<dyn Validator>);
        let replaced = self.factories.insert(name.clone(), factory).is_some();
        tracing::debug!(validator = %name, replaced, "registered validator");
        self
    }

    /// Builder-style variant of [`Registry::add_validator`].
    pub fn with_validator<F, V>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> V + Send + Sync + 'static,
        V: Validator + 'static,
    {
        self.add_validator(name, factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorFactory> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered validator names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the validator described by `spec` for the variable `env_name`.
    pub fn instantiate(
        &self,
        env_name: &str,
        spec: &ValidatorSpec,
    ) -> Result<Box<dyn Validator>, EnvError> {
        let factory = self
            .get(&spec.name)
            .ok_or_else(|| EnvError::UnknownValidator {
                name: env_name.to_string(),
                validator: spec.name.clone(),
            })?;
        Ok(factory(&spec.args))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
            .with_validator(REQUIRED, Required::new)
            .with_validator(EXPECTED_VALUES, ExpectedValues::new)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("validators", &self.names())
            .finish()
    }
}
