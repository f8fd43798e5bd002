//! Template store
//!
//! Maps unique names to template instances. Cloning hands the caller an
//! independent copy; the stored template never changes after registration.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// A type that can serve as a template
///
/// Implementers own all of their data, so `Clone` produces a deep copy.
/// Shared interior state (`Rc<RefCell<_>>`, `Arc<Mutex<_>>`) would leak
/// mutations between clones and must not appear in a template type.
pub trait Prototype: Clone + Send + Sync + fmt::Debug + 'static {
    /// Independent copy of this instance
    #[must_use]
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

/// Prototype store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrototypeError {
    /// No template registered under the name
    #[error("unknown template: {name}")]
    UnknownTemplateName {
        /// Requested name
        name: String,
    },

    /// A template is already registered under the name
    #[error("duplicate template: {name}")]
    DuplicateTemplateName {
        /// Offending name
        name: String,
    },
}

/// Named templates of one type
pub struct PrototypeStore<T: Prototype> {
    templates: RwLock<HashMap<String, T>>,
}

impl<T: Prototype> PrototypeStore<T> {
    /// Create new empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Register `template` under `name`
    ///
    /// # Errors
    /// [`PrototypeError::DuplicateTemplateName`] if the name is taken. The
    /// existing template is left untouched.
    pub fn register(&self, name: impl Into<String>, template: T) -> Result<(), PrototypeError> {
        let name = name.into();
        let mut templates = self.templates.write();
        if templates.contains_key(&name) {
            return Err(PrototypeError::DuplicateTemplateName { name });
        }

        tracing::debug!(%name, "registered template");
        templates.insert(name, template);
        Ok(())
    }

    /// Deep copy of the template registered under `name`
    ///
    /// # Errors
    /// [`PrototypeError::UnknownTemplateName`] if nothing is registered.
    pub fn clone_template(&self, name: &str) -> Result<T, PrototypeError> {
        let templates = self.templates.read();
        let template = templates
            .get(name)
            .ok_or_else(|| PrototypeError::UnknownTemplateName {
                name: name.to_string(),
            })?;

        tracing::debug!(name, "cloning template");
        Ok(template.duplicate())
    }

    /// Check if a template is registered under `name`
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.read().contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Get number of templates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

impl<T: Prototype> Default for PrototypeStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prototype> fmt::Debug for PrototypeStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrototypeStore")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Node {
        label: String,
        children: Vec<Node>,
        attrs: BTreeMap<String, Vec<String>>,
    }

    impl Prototype for Node {}

    fn tree() -> Node {
        Node {
            label: "root".to_string(),
            children: vec![Node {
                label: "leaf".to_string(),
                children: Vec::new(),
                attrs: BTreeMap::new(),
            }],
            attrs: BTreeMap::from([("k".to_string(), vec!["v".to_string()])]),
        }
    }

    #[test]
    fn store_new_empty() {
        let store = PrototypeStore::<Node>::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn store_register_duplicate_keeps_original() {
        let store = PrototypeStore::new();
        store.register("t", tree()).unwrap();

        let mut other = tree();
        other.label = "other".to_string();
        assert_eq!(
            store.register("t", other).unwrap_err(),
            PrototypeError::DuplicateTemplateName {
                name: "t".to_string()
            }
        );
        assert_eq!(store.clone_template("t").unwrap().label, "root");
    }

    #[test]
    fn store_unknown_name() {
        let store = PrototypeStore::<Node>::new();
        assert_eq!(
            store.clone_template("missing").unwrap_err(),
            PrototypeError::UnknownTemplateName {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn nested_mutation_does_not_reach_template() {
        let store = PrototypeStore::new();
        store.register("t", tree()).unwrap();

        let mut copy = store.clone_template("t").unwrap();
        copy.children[0].label = "changed".to_string();
        copy.children.push(tree());
        copy.attrs.get_mut("k").unwrap().push("w".to_string());

        assert_eq!(store.clone_template("t").unwrap(), tree());
    }

    #[test]
    fn names_sorted() {
        let store = PrototypeStore::new();
        store.register("b", tree()).unwrap();
        store.register("a", tree()).unwrap();
        assert_eq!(store.names(), vec!["a".to_string(), "b".to_string()]);
        assert!(store.contains("a"));
        assert!(!store.contains("c"));
    }
}
