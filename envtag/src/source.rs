//! Flat name → value stores the walker reads from

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;

/// A flat, case-sensitive map from variable name to value.
///
/// The walker only reads; it fetches each variable at the moment the field
/// using it is visited.
pub trait Source {
    fn get(&self, name: &str) -> Option<String>;
}

/// The process environment.
///
/// Values are read one variable at a time, so a lookup racing with
/// `std::env::set_var` elsewhere may observe some fields before the change
/// and others after it. Non-UTF-8 values are decoded lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Source for Environment {
    fn get(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_reads_process_env() {
        env::set_var("ENVTAG_SOURCE_TEST", "value");
        assert_eq!(
            Environment.get("ENVTAG_SOURCE_TEST"),
            Some("value".to_string())
        );
        env::remove_var("ENVTAG_SOURCE_TEST");
        assert_eq!(Environment.get("ENVTAG_SOURCE_TEST"), None);
    }

    #[test]
    fn test_map_sources_are_case_sensitive() {
        let map: HashMap<String, String> = [("HOST".to_string(), "localhost".to_string())].into();
        assert_eq!(Source::get(&map, "HOST"), Some("localhost".to_string()));
        assert_eq!(Source::get(&map, "host"), None);

        let tree: BTreeMap<String, String> = map.into_iter().collect();
        assert_eq!(Source::get(&tree, "HOST"), Some("localhost".to_string()));
    }
}
