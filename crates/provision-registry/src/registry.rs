//! Variant registry
//!
//! Provides [`VariantRegistry`], a table from selector tag to constructor.
//! Every [`create`](VariantRegistry::create) call runs the constructor again;
//! the registry never caches instances.

use crate::selector::Selector;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Zero-argument constructor producing a capability implementer
pub type Constructor<C> = Arc<dyn Fn() -> Box<C> + Send + Sync>;

/// What to do when a selector is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`RegistryError::DuplicateSelector`] - default
    #[default]
    Reject,

    /// Replace the existing constructor
    Overwrite,
}

/// Outcome of a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Selector was new
    Inserted,

    /// Selector existed and its constructor was replaced
    Replaced,
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No constructor registered for the selector
    #[error("unknown selector: {selector}")]
    UnknownSelector {
        /// Requested selector
        selector: String,
    },

    /// Selector already registered and overwrite was not requested
    #[error("duplicate selector: {selector}")]
    DuplicateSelector {
        /// Offending selector
        selector: String,
    },
}

/// Selector-keyed table of constructors
///
/// `C` is usually a capability trait object such as `dyn Database`. The
/// descriptor table sits behind a read-write lock so a registry can be shared
/// across threads; constructors run after the lock is released.
pub struct VariantRegistry<S, C: ?Sized + 'static> {
    descriptors: RwLock<HashMap<S, Constructor<C>>>,
    policy: DuplicatePolicy,
}

impl<S: Selector, C: ?Sized + 'static> VariantRegistry<S, C> {
    /// Create new empty registry rejecting duplicates
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
            policy: DuplicatePolicy::Reject,
        }
    }

    /// Set the registry-wide duplicate policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registry-wide duplicate policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a constructor under the registry-wide policy
    ///
    /// # Errors
    /// [`RegistryError::DuplicateSelector`] if the selector exists and the
    /// policy is [`DuplicatePolicy::Reject`].
    pub fn register<F>(&self, selector: S, constructor: F) -> Result<Registration, RegistryError>
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        self.register_with(selector, constructor, self.policy)
    }

    /// Register a constructor with an explicit policy for this call
    ///
    /// # Errors
    /// [`RegistryError::DuplicateSelector`] if the selector exists and
    /// `policy` is [`DuplicatePolicy::Reject`].
    pub fn register_with<F>(
        &self,
        selector: S,
        constructor: F,
        policy: DuplicatePolicy,
    ) -> Result<Registration, RegistryError>
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        let mut descriptors = self.descriptors.write();
        match descriptors.entry(selector) {
            Entry::Occupied(mut slot) => match policy {
                DuplicatePolicy::Reject => Err(RegistryError::DuplicateSelector {
                    selector: selector.to_string(),
                }),
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(%selector, "replacing registered constructor");
                    slot.insert(Arc::new(constructor));
                    Ok(Registration::Replaced)
                }
            },
            Entry::Vacant(slot) => {
                tracing::debug!(%selector, "registered variant");
                slot.insert(Arc::new(constructor));
                Ok(Registration::Inserted)
            }
        }
    }

    /// Construct a fresh instance for `selector`
    ///
    /// # Errors
    /// [`RegistryError::UnknownSelector`] if nothing is registered under it.
    pub fn create(&self, selector: S) -> Result<Box<C>, RegistryError> {
        let constructor = self
            .descriptors
            .read()
            .get(&selector)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownSelector {
                selector: selector.to_string(),
            })?;

        tracing::debug!(%selector, "creating variant");
        Ok(constructor())
    }

    /// Parse `name` into a selector and construct it
    ///
    /// # Errors
    /// [`RegistryError::UnknownSelector`] if `name` names no tag or the tag is
    /// not registered.
    pub fn create_named(&self, name: &str) -> Result<Box<C>, RegistryError>
    where
        S: FromStr<Err = RegistryError>,
    {
        self.create(name.parse()?)
    }

    /// Check if selector is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, selector: S) -> bool {
        self.descriptors.read().contains_key(&selector)
    }

    /// Registered selectors, sorted
    #[must_use]
    pub fn selectors(&self) -> Vec<S> {
        let mut selectors: Vec<S> = self.descriptors.read().keys().copied().collect();
        selectors.sort_unstable();
        selectors
    }

    /// Get number of registered selectors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }

    /// Insert a built-in constructor while the registry is still exclusively owned
    pub(crate) fn seed<F>(mut self, selector: S, constructor: F) -> Self
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        self.descriptors
            .get_mut()
            .insert(selector, Arc::new(constructor));
        self
    }
}

impl<S: Selector, C: ?Sized + 'static> Default for VariantRegistry<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Selector, C: ?Sized + 'static> fmt::Debug for VariantRegistry<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("selectors", &self.selectors())
            .field("policy", &self.policy)
            .finish()
    }
}
