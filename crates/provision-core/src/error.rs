//! Error types for Provision Core
//!
//! Every component error converts into [`ProvisionError`] with `?`, and
//! [`ProvisionError::kind`] names the failure without matching on the
//! component enums.

use provision_builder::BuildError;
use provision_prototype::PrototypeError;
use provision_registry::{PaymentError, RegistryError};
use provision_singleton::SingletonError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Main provisioning error type
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// Variant registry failure
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Builder failure
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// Prototype store failure
    #[error("prototype error: {0}")]
    Prototype(#[from] PrototypeError),

    /// Singleton registry failure
    #[error("singleton error: {0}")]
    Singleton(#[from] SingletonError),

    /// Payment rejected
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialised
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}

impl ProvisionError {
    /// Classification of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(RegistryError::UnknownSelector { .. }) => ErrorKind::UnknownSelector,
            Self::Registry(RegistryError::DuplicateSelector { .. }) => ErrorKind::DuplicateSelector,
            Self::Build(BuildError::UnknownField { .. }) => ErrorKind::UnknownField,
            Self::Build(BuildError::InvalidFieldType { .. }) => ErrorKind::InvalidFieldType,
            Self::Build(BuildError::Incomplete { .. }) => ErrorKind::IncompleteBuilder,
            Self::Build(BuildError::InvalidFieldValue { .. }) => ErrorKind::InvalidFieldValue,
            Self::Prototype(PrototypeError::UnknownTemplateName { .. }) => {
                ErrorKind::UnknownTemplateName
            }
            Self::Prototype(PrototypeError::DuplicateTemplateName { .. }) => {
                ErrorKind::DuplicateTemplateName
            }
            Self::Singleton(SingletonError::TagConflict { .. }) => ErrorKind::TagConflict,
            Self::Payment(PaymentError::InvalidAmount { .. }) => ErrorKind::InvalidAmount,
            Self::Config(_) => ErrorKind::Config,
            Self::Logging(_) => ErrorKind::Logging,
        }
    }

    /// Check if error is retryable
    ///
    /// Every failure here is a caller or configuration mistake; repeating the
    /// same call gives the same result.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No variant registered for the selector
    UnknownSelector,
    /// Selector registered twice
    DuplicateSelector,
    /// Builder field not in the schema
    UnknownField,
    /// Builder value of the wrong kind
    InvalidFieldType,
    /// Builder missing required fields
    IncompleteBuilder,
    /// Builder value rejected by the target
    InvalidFieldValue,
    /// No template under the name
    UnknownTemplateName,
    /// Template name taken
    DuplicateTemplateName,
    /// Singleton tag claimed by another type
    TagConflict,
    /// Payment amount rejected
    InvalidAmount,
    /// Configuration problem
    Config,
    /// Logging problem
    Logging,
}

impl ErrorKind {
    /// Stable name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownSelector => "unknown_selector",
            Self::DuplicateSelector => "duplicate_selector",
            Self::UnknownField => "unknown_field",
            Self::InvalidFieldType => "invalid_field_type",
            Self::IncompleteBuilder => "incomplete_builder",
            Self::InvalidFieldValue => "invalid_field_value",
            Self::UnknownTemplateName => "unknown_template_name",
            Self::DuplicateTemplateName => "duplicate_template_name",
            Self::TagConflict => "tag_conflict",
            Self::InvalidAmount => "invalid_amount",
            Self::Config => "config",
            Self::Logging => "logging",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Logging bootstrap errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Filter directive could not be parsed
    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter {
        /// Offending directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_component_variants() {
        let err: ProvisionError = RegistryError::UnknownSelector {
            selector: "oracle".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::UnknownSelector);
        assert_eq!(err.to_string(), "registry error: unknown selector: oracle");

        let err: ProvisionError = BuildError::Incomplete {
            target: "HttpRequest",
            missing: vec!["url"],
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::IncompleteBuilder);

        let err: ProvisionError = PrototypeError::DuplicateTemplateName {
            name: "report".to_string(),
        }
        .into();
        assert_eq!(err.kind().as_str(), "duplicate_template_name");
    }

    #[test]
    fn nothing_is_retryable() {
        let err: ProvisionError = PaymentError::InvalidAmount { amount: -1.0 }.into();
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
    }
}
