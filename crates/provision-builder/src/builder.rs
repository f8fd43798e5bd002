//! Schema-validated builder
//!
//! [`Builder`] accumulates field values for a [`Buildable`] target. Every `set`
//! is checked against the target's [`Schema`]; `build()` checks that every
//! required field is present and hands the completed field set to the target.
//!
//! `build()` takes `&self`: the builder keeps its values afterwards and can
//! build again, or be changed and built into a different value.

use crate::field::{FieldKind, FieldSpec, FieldValue, Requirement, Schema};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Builder errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Field not declared by the target schema
    #[error("unknown field `{field}` for {target}")]
    UnknownField {
        /// Target type
        target: &'static str,
        /// Requested field
        field: String,
    },

    /// Value kind does not match the declared kind
    #[error("field `{field}` of {target} expects {expected}, got {actual}")]
    InvalidFieldType {
        /// Target type
        target: &'static str,
        /// Field name
        field: &'static str,
        /// Declared kind
        expected: FieldKind,
        /// Supplied kind
        actual: FieldKind,
    },

    /// Required fields missing at build time
    #[error("incomplete {target}: missing required fields {}", .missing.join(", "))]
    Incomplete {
        /// Target type
        target: &'static str,
        /// Every missing field, in schema order
        missing: Vec<&'static str>,
    },

    /// Value has the right kind but is not acceptable to the target
    #[error("invalid value for `{field}` of {target}: {reason}")]
    InvalidFieldValue {
        /// Target type
        target: &'static str,
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// A type constructed through a [`Builder`]
pub trait Buildable: Sized {
    /// Field declarations for this type
    fn schema() -> Schema;

    /// Construct from a complete, kind-checked field set
    ///
    /// # Errors
    /// [`BuildError::InvalidFieldValue`] when a value is out of range for the
    /// target.
    fn assemble(fields: BuiltFields) -> Result<Self, BuildError>;

    /// Fresh builder for this type
    #[must_use]
    fn builder() -> Builder<Self> {
        Builder::new()
    }
}

/// Complete field set handed to [`Buildable::assemble`]
///
/// Required fields are present and defaults are filled in; only optional
/// fields without a default can be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFields {
    target: &'static str,
    values: BTreeMap<&'static str, FieldValue>,
}

impl BuiltFields {
    /// Target type name
    #[inline]
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Take a text field
    ///
    /// # Errors
    /// [`BuildError::Incomplete`] if absent, [`BuildError::InvalidFieldType`]
    /// if it holds another kind.
    pub fn take_text(&mut self, field: &'static str) -> Result<String, BuildError> {
        self.take_opt_text(field)?.ok_or_else(|| self.missing(field))
    }

    /// Take a text field that may be absent
    ///
    /// # Errors
    /// [`BuildError::InvalidFieldType`] if it holds another kind.
    pub fn take_opt_text(&mut self, field: &'static str) -> Result<Option<String>, BuildError> {
        match self.values.remove(field) {
            None => Ok(None),
            Some(FieldValue::Text(value)) => Ok(Some(value)),
            Some(other) => Err(self.mismatch(field, FieldKind::Text, &other)),
        }
    }

    /// Take an integer field
    ///
    /// # Errors
    /// [`BuildError::Incomplete`] if absent, [`BuildError::InvalidFieldType`]
    /// if it holds another kind.
    pub fn take_integer(&mut self, field: &'static str) -> Result<i64, BuildError> {
        match self.values.remove(field) {
            None => Err(self.missing(field)),
            Some(FieldValue::Integer(value)) => Ok(value),
            Some(other) => Err(self.mismatch(field, FieldKind::Integer, &other)),
        }
    }

    /// Take a boolean field
    ///
    /// # Errors
    /// [`BuildError::Incomplete`] if absent, [`BuildError::InvalidFieldType`]
    /// if it holds another kind.
    pub fn take_bool(&mut self, field: &'static str) -> Result<bool, BuildError> {
        match self.values.remove(field) {
            None => Err(self.missing(field)),
            Some(FieldValue::Bool(value)) => Ok(value),
            Some(other) => Err(self.mismatch(field, FieldKind::Bool, &other)),
        }
    }

    /// Take a map field
    ///
    /// # Errors
    /// [`BuildError::Incomplete`] if absent, [`BuildError::InvalidFieldType`]
    /// if it holds another kind.
    pub fn take_text_map(
        &mut self,
        field: &'static str,
    ) -> Result<BTreeMap<String, String>, BuildError> {
        match self.values.remove(field) {
            None => Err(self.missing(field)),
            Some(FieldValue::TextMap(value)) => Ok(value),
            Some(other) => Err(self.mismatch(field, FieldKind::TextMap, &other)),
        }
    }

    /// Reject a value the target cannot accept
    #[must_use]
    pub fn invalid(&self, field: &'static str, reason: impl Into<String>) -> BuildError {
        BuildError::InvalidFieldValue {
            target: self.target,
            field,
            reason: reason.into(),
        }
    }

    fn missing(&self, field: &'static str) -> BuildError {
        BuildError::Incomplete {
            target: self.target,
            missing: vec![field],
        }
    }

    fn mismatch(&self, field: &'static str, expected: FieldKind, actual: &FieldValue) -> BuildError {
        BuildError::InvalidFieldType {
            target: self.target,
            field,
            expected,
            actual: actual.kind(),
        }
    }
}

/// Accumulates field values for `T`
pub struct Builder<T: Buildable> {
    schema: Schema,
    values: BTreeMap<&'static str, FieldValue>,
    _target: PhantomData<fn() -> T>,
}

impl<T: Buildable> Builder<T> {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: T::schema(),
            values: BTreeMap::new(),
            _target: PhantomData,
        }
    }

    /// Target schema
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Set a field
    ///
    /// # Errors
    /// - [`BuildError::UnknownField`] if the schema has no such field
    /// - [`BuildError::InvalidFieldType`] if the value kind differs
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<&mut Self, BuildError> {
        let value = value.into();
        let spec = self.spec(field)?;
        if spec.kind != value.kind() {
            return Err(BuildError::InvalidFieldType {
                target: self.schema.target(),
                field: spec.name,
                expected: spec.kind,
                actual: value.kind(),
            });
        }

        let name = spec.name;
        tracing::trace!(target_type = self.schema.target(), field = name, "field set");
        self.values.insert(name, value);
        Ok(self)
    }

    /// Add one entry to a map field, creating the map on first use
    ///
    /// # Errors
    /// - [`BuildError::UnknownField`] if the schema has no such field
    /// - [`BuildError::InvalidFieldType`] if the field is not a map
    pub fn insert_entry(
        &mut self,
        field: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, BuildError> {
        let spec = self.spec(field)?;
        if spec.kind != FieldKind::TextMap {
            return Err(BuildError::InvalidFieldType {
                target: self.schema.target(),
                field: spec.name,
                expected: spec.kind,
                actual: FieldKind::TextMap,
            });
        }

        let name = spec.name;
        let entry = self
            .values
            .entry(name)
            .or_insert_with(|| FieldValue::TextMap(BTreeMap::new()));
        if let FieldValue::TextMap(map) = entry {
            map.insert(key.into(), value.into());
        }
        Ok(self)
    }

    /// Clear a field
    ///
    /// # Errors
    /// [`BuildError::UnknownField`] if the schema has no such field.
    pub fn unset(&mut self, field: &str) -> Result<&mut Self, BuildError> {
        let name = self.spec(field)?.name;
        self.values.remove(name);
        Ok(self)
    }

    /// Check if a field has been set
    #[inline]
    #[must_use]
    pub fn is_set(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Required fields not yet set, in schema order
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        self.schema
            .fields()
            .iter()
            .filter(|spec| spec.is_required() && !self.values.contains_key(spec.name))
            .map(|spec| spec.name)
            .collect()
    }

    /// Validate and construct the target
    ///
    /// The builder is left as it was.
    ///
    /// # Errors
    /// - [`BuildError::Incomplete`] listing every missing required field
    /// - [`BuildError::InvalidFieldValue`] if the target rejects a value
    pub fn build(&self) -> Result<T, BuildError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(BuildError::Incomplete {
                target: self.schema.target(),
                missing,
            });
        }

        let mut values = self.values.clone();
        for spec in self.schema.fields() {
            if let Requirement::Default(default) = &spec.requirement {
                values.entry(spec.name).or_insert_with(|| default.clone());
            }
        }

        tracing::debug!(target_type = self.schema.target(), "building");
        T::assemble(BuiltFields {
            target: self.schema.target(),
            values,
        })
    }

    fn spec(&self, field: &str) -> Result<&FieldSpec, BuildError> {
        self.schema.get(field).ok_or_else(|| BuildError::UnknownField {
            target: self.schema.target(),
            field: field.to_string(),
        })
    }
}

impl<T: Buildable> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Buildable> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            values: self.values.clone(),
            _target: PhantomData,
        }
    }
}

impl<T: Buildable> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("target", &self.schema.target())
            .field("set", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
