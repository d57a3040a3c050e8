//! Registries consulted by the validator.
//!
//! The parser never touches these; only [`JqlValidator`](crate::JqlValidator) does. The static
//! implementations here back the command line tool and tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::RwLock,
};

/// Knows which field names exist.
pub trait FieldResolver: Send + Sync {
    /// Returns true if `name` is a known field.
    fn exists(&self, name: &str) -> bool;
}

/// Knows which functions exist and whether they may be called.
pub trait FunctionResolver: Send + Sync {
    /// Returns true if a function named `name` is registered.
    fn exists(&self, name: &str) -> bool;

    /// Returns true if the function is registered and enabled.
    fn is_enabled(&self, name: &str) -> bool;
}

/// A fixed set of field names, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFieldResolver {
    /// Lowercased field names.
    names: BTreeSet<String>,
}

impl StaticFieldResolver {
    /// Creates a resolver knowing `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Number of known fields.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true when no fields are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FieldResolver for StaticFieldResolver {
    fn exists(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }
}

/// A mutable function registry. Each lookup sees a consistent snapshot.
#[derive(Debug, Default)]
pub struct StaticFunctionResolver {
    /// Lowercased function name to enabled flag.
    functions: RwLock<BTreeMap<String, bool>>,
}

impl StaticFunctionResolver {
    /// Creates a registry from `(name, enabled)` pairs.
    pub fn new<I, S>(functions: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        Self {
            functions: RwLock::new(
                functions
                    .into_iter()
                    .map(|(name, enabled)| (name.as_ref().to_lowercase(), enabled))
                    .collect(),
            ),
        }
    }

    /// Registers or replaces a function.
    pub fn register(&self, name: &str, enabled: bool) {
        let mut functions = self
            .functions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        functions.insert(name.to_lowercase(), enabled);
    }

    /// Enables or disables a registered function. Returns false if it is not registered.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        let mut functions = self
            .functions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match functions.get_mut(&name.to_lowercase()) {
            Some(flag) => {
                *flag = enabled;
                true
            }
            None => false,
        }
    }

    /// Registered function names, lowercased and sorted.
    pub fn names(&self) -> Vec<String> {
        self.snapshot(|functions| functions.keys().cloned().collect())
    }

    /// Runs `f` against the current registry contents.
    fn snapshot<T>(&self, f: impl FnOnce(&BTreeMap<String, bool>) -> T) -> T {
        let functions = self
            .functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&functions)
    }
}

impl FunctionResolver for StaticFunctionResolver {
    fn exists(&self, name: &str) -> bool {
        self.snapshot(|functions| functions.contains_key(&name.to_lowercase()))
    }

    fn is_enabled(&self, name: &str) -> bool {
        self.snapshot(|functions| functions.get(&name.to_lowercase()) == Some(&true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_match_case_insensitively() {
        let fields = StaticFieldResolver::new(["Project", "status"]);
        assert!(fields.exists("project"));
        assert!(fields.exists("STATUS"));
        assert!(!fields.exists("priority"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn disabled_functions_exist_but_are_not_enabled() {
        let functions = StaticFunctionResolver::new([("currentUser", true), ("legacy", false)]);
        assert!(functions.exists("currentuser"));
        assert!(functions.is_enabled("currentUser"));
        assert!(functions.exists("legacy"));
        assert!(!functions.is_enabled("legacy"));
        assert!(!functions.exists("membersOf"));
    }

    #[test]
    fn registry_updates() {
        let functions = StaticFunctionResolver::default();
        assert!(!functions.set_enabled("now", true));
        functions.register("now", false);
        assert!(!functions.is_enabled("now"));
        assert!(functions.set_enabled("NOW", true));
        assert!(functions.is_enabled("now"));
        assert_eq!(functions.names(), ["now"]);
    }
}
