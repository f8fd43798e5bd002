//! Field schema types
//!
//! A [`Schema`] lists the fields a target type accepts, the kind of value each
//! holds and whether it is required, defaulted or may stay absent.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 text
    Text,

    /// Signed integer
    Integer,

    /// Boolean flag
    Bool,

    /// Ordered text-to-text map
    TextMap,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Bool => "bool",
            Self::TextMap => "text map",
        };
        f.write_str(name)
    }
}

/// A value assigned to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value
    Text(String),

    /// Integer value
    Integer(i64),

    /// Boolean value
    Bool(bool),

    /// Map value
    TextMap(BTreeMap<String, String>),
}

impl FieldValue {
    /// Kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Integer(_) => FieldKind::Integer,
            Self::Bool(_) => FieldKind::Bool,
            Self::TextMap(_) => FieldKind::TextMap,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::TextMap(value)
    }
}

/// Whether a field must be set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Must be set before `build()`
    Required,

    /// Takes this value when not set
    Default(FieldValue),

    /// May stay absent
    Optional,
}

/// Declaration of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,

    /// Accepted value kind
    pub kind: FieldKind,

    /// Requirement
    pub requirement: Requirement,
}

impl FieldSpec {
    /// Required field
    #[inline]
    #[must_use]
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Required,
        }
    }

    /// Field with a default value; the kind is taken from the default
    #[inline]
    #[must_use]
    pub fn with_default(name: &'static str, default: impl Into<FieldValue>) -> Self {
        let default = default.into();
        Self {
            name,
            kind: default.kind(),
            requirement: Requirement::Default(default),
        }
    }

    /// Field that may stay absent
    #[inline]
    #[must_use]
    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Optional,
        }
    }

    /// Check if field is required
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }
}

/// Ordered field declarations for one target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    target: &'static str,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Create empty schema for `target`
    #[inline]
    #[must_use]
    pub fn new(target: &'static str) -> Self {
        Self {
            target,
            fields: Vec::new(),
        }
    }

    /// Append a field declaration
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        debug_assert!(
            self.get(spec.name).is_none(),
            "field `{}` declared twice on {}",
            spec.name,
            self.target
        );
        self.fields.push(spec);
        self
    }

    /// Target type name
    #[inline]
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Field declarations in declaration order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kinds() {
        assert_eq!(FieldValue::from("x").kind(), FieldKind::Text);
        assert_eq!(FieldValue::from(8080_u16).kind(), FieldKind::Integer);
        assert_eq!(FieldValue::from(true).kind(), FieldKind::Bool);
        assert_eq!(FieldValue::from(BTreeMap::<String, String>::new()).kind(), FieldKind::TextMap);
    }

    #[test]
    fn default_field_takes_kind_of_default() {
        let spec = FieldSpec::with_default("ssl", false);
        assert_eq!(spec.kind, FieldKind::Bool);
        assert!(!spec.is_required());
    }

    #[test]
    fn schema_lookup() {
        let schema = Schema::new("Thing")
            .field(FieldSpec::required("a", FieldKind::Text))
            .field(FieldSpec::optional("b", FieldKind::Integer));
        assert_eq!(schema.target(), "Thing");
        assert!(schema.get("a").unwrap().is_required());
        assert!(schema.get("c").is_none());
        assert_eq!(schema.fields().len(), 2);
    }
}
