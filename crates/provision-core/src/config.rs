//! Provisioning configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration; unknown keys are rejected.

use crate::error::ConfigError;
use provision_adapter::{NotificationRoute, S3Storage, StorageRoute};
use provision_registry::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Policy for re-registering a selector
    pub duplicate_policy: DuplicatePolicy,
    /// Storage adapter settings
    pub storage: StorageConfig,
    /// Notification adapter settings
    pub notifications: NotificationConfig,
}

impl ProvisionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed TOML, wrong value types or unknown
    /// keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Read`] if the file cannot be read, [`ConfigError::Parse`]
    /// if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_toml_str(&text)
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With duplicate policy
    #[inline]
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// With object storage bucket
    #[inline]
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.storage.bucket = bucket.into();
        self
    }

    /// With storage route
    #[inline]
    #[must_use]
    pub fn with_storage_route(mut self, route: StorageRoute) -> Self {
        self.storage.route = route;
        self
    }

    /// With notification route
    #[inline]
    #[must_use]
    pub fn with_notification_route(mut self, route: NotificationRoute) -> Self {
        self.notifications.route = route;
        self
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            duplicate_policy: DuplicatePolicy::Reject,
            storage: StorageConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

/// Storage adapter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Object storage bucket
    pub bucket: String,
    /// Backend `save_file` is routed to
    pub route: StorageRoute,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: S3Storage::DEFAULT_BUCKET.to_string(),
            route: StorageRoute::default(),
        }
    }
}

/// Notification adapter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// Backend `send` is routed to
    pub route: NotificationRoute,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ProvisionConfig::from_toml_str("").unwrap(), ProvisionConfig::default());
    }

    #[test]
    fn full_file() {
        let config = ProvisionConfig::from_toml_str(
            r#"
            log_filter = "debug"
            duplicate_policy = "overwrite"

            [storage]
            bucket = "archive"
            route = "local"

            [notifications]
            route = "slack"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            ProvisionConfig::new()
                .with_log_filter("debug")
                .with_duplicate_policy(DuplicatePolicy::Overwrite)
                .with_storage_route(StorageRoute::Local)
                .with_notification_route(NotificationRoute::Slack)
                .with_bucket("archive")
        );
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            ProvisionConfig::from_toml_str("colour = \"blue\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(ProvisionConfig::from_toml_str("[storage]\nregion = \"eu\"").is_err());
    }

    #[test]
    fn unknown_route_rejected() {
        assert!(ProvisionConfig::from_toml_str("[notifications]\nroute = \"email\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_filter = \"warn\"").unwrap();
        let config = ProvisionConfig::load(file.path()).unwrap();
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProvisionConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
