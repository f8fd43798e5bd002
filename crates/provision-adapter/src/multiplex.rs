//! Routed adapters
//!
//! A routed adapter holds several backends and sends the unified operation
//! to exactly the one its route names. There is no fallback: a call never
//! reaches a backend the route does not select.

use crate::adapters::{Adaptee, FileStore, LocalStorage, S3Storage, SlackNotifier, StoredFile, TeamsNotifier};
use crate::foreign::{DiskWrite, LocalDisk, S3Client, S3Upload, SlackClient, SlackPost, TeamsClient};
use provision_registry::{Capability, Delivery, Notifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageRoute {
    /// Local disk
    Local,

    /// Object storage
    #[default]
    Cloud,
}

impl fmt::Display for StorageRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Cloud => "cloud",
        })
    }
}

/// Notification backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationRoute {
    /// Slack
    Slack,

    /// Microsoft Teams
    #[default]
    Teams,
}

impl fmt::Display for NotificationRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slack => "slack",
            Self::Teams => "teams",
        })
    }
}

/// File storage routed to local disk or object storage
///
/// The wrapped clients stay private, so the only way to reach a backend is
/// through the route or the two direct operations:
///
/// ```compile_fail
/// use provision_adapter::StorageAdapter;
///
/// let adapter = StorageAdapter::default();
/// adapter.local().write_bytes("bypass.txt", b"x");
/// ```
#[derive(Debug)]
pub struct StorageAdapter {
    local: LocalStorage,
    s3: S3Storage,
    route: StorageRoute,
}

impl StorageAdapter {
    /// Adapter over both backends, routed to `route`
    #[must_use]
    pub fn new(local: LocalStorage, s3: S3Storage, route: StorageRoute) -> Self {
        Self { local, s3, route }
    }

    /// Adapter over default clients with bucket `bucket`
    #[must_use]
    pub fn with_bucket(bucket: impl Into<String>, route: StorageRoute) -> Self {
        Self::new(
            LocalDisk::default().wrap(),
            S3Storage::new(S3Client::new(), bucket),
            route,
        )
    }

    /// Change the route
    #[inline]
    #[must_use]
    pub fn with_route(mut self, route: StorageRoute) -> Self {
        self.route = route;
        self
    }

    /// Current route
    #[inline]
    #[must_use]
    pub fn route(&self) -> StorageRoute {
        self.route
    }

    /// Write to local disk regardless of route
    pub fn save_local_file(&self, path: &str, data: &[u8]) -> StoredFile {
        self.local.save_file(path, data)
    }

    /// Upload to object storage regardless of route
    pub fn upload_to_cloud(&self, path: &str, data: &[u8]) -> StoredFile {
        self.s3.save_file(path, data)
    }

    /// Files written to local disk so far
    #[must_use]
    pub fn local_writes(&self) -> Vec<DiskWrite> {
        self.local.writes()
    }

    /// Objects uploaded to object storage so far
    #[must_use]
    pub fn cloud_uploads(&self) -> Vec<S3Upload> {
        self.s3.uploads()
    }
}

impl Default for StorageAdapter {
    fn default() -> Self {
        Self::with_bucket(S3Storage::DEFAULT_BUCKET, StorageRoute::default())
    }
}

impl Capability for StorageAdapter {
    fn label(&self) -> &'static str {
        match self.route {
            StorageRoute::Local => self.local.label(),
            StorageRoute::Cloud => self.s3.label(),
        }
    }
}

impl FileStore for StorageAdapter {
    fn save_file(&self, path: &str, data: &[u8]) -> StoredFile {
        tracing::debug!(route = %self.route, path, "routing file save");
        match self.route {
            StorageRoute::Local => self.save_local_file(path, data),
            StorageRoute::Cloud => self.upload_to_cloud(path, data),
        }
    }
}

/// Notifications routed to Slack or Teams
#[derive(Debug, Default)]
pub struct NotificationAdapter {
    slack: SlackNotifier,
    teams: TeamsNotifier,
    route: NotificationRoute,
}

impl NotificationAdapter {
    /// Adapter over both backends, routed to `route`
    #[must_use]
    pub fn new(slack: SlackNotifier, teams: TeamsNotifier, route: NotificationRoute) -> Self {
        Self { slack, teams, route }
    }

    /// Adapter over fresh clients
    #[must_use]
    pub fn with_route(route: NotificationRoute) -> Self {
        Self::new(SlackClient::default().wrap(), TeamsClient::new().wrap(), route)
    }

    /// Current route
    #[inline]
    #[must_use]
    pub fn route(&self) -> NotificationRoute {
        self.route
    }

    /// Post to Slack regardless of route
    pub fn send_slack(&self, message: &str) -> Delivery {
        self.slack.send(message)
    }

    /// Send to Teams regardless of route
    pub fn send_teams(&self, message: &str) -> Delivery {
        self.teams.send(message)
    }

    /// Messages posted to Slack so far
    #[must_use]
    pub fn slack_posts(&self) -> Vec<SlackPost> {
        self.slack.posts()
    }

    /// Card bodies sent to Teams so far
    #[must_use]
    pub fn teams_cards(&self) -> Vec<String> {
        self.teams.cards()
    }
}

impl Capability for NotificationAdapter {
    fn label(&self) -> &'static str {
        match self.route {
            NotificationRoute::Slack => self.slack.label(),
            NotificationRoute::Teams => self.teams.label(),
        }
    }
}

impl Notifier for NotificationAdapter {
    fn send(&self, message: &str) -> Delivery {
        tracing::debug!(route = %self.route, "routing notification");
        match self.route {
            NotificationRoute::Slack => self.send_slack(message),
            NotificationRoute::Teams => self.send_teams(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_route_never_touches_disk() {
        let adapter = StorageAdapter::default();
        let stored = adapter.save_file("report.pdf", b"%PDF");
        assert_eq!(stored.backend, "s3");
        assert_eq!(adapter.cloud_uploads().len(), 1);
        assert!(adapter.local_writes().is_empty());
    }

    #[test]
    fn local_route_never_touches_cloud() {
        let adapter = StorageAdapter::default().with_route(StorageRoute::Local);
        let stored = adapter.save_file("report.pdf", b"%PDF");
        assert_eq!(stored.backend, "local");
        assert_eq!(adapter.local_writes().len(), 1);
        assert!(adapter.cloud_uploads().is_empty());
    }

    #[test]
    fn auxiliary_operations_bypass_route() {
        let adapter = StorageAdapter::with_bucket("backups", StorageRoute::Local);
        adapter.upload_to_cloud("x", b"1");
        assert_eq!(adapter.cloud_uploads()[0].bucket, "backups");
        assert!(adapter.local_writes().is_empty());
    }

    #[test]
    fn record_views_are_snapshots() {
        let adapter = StorageAdapter::default();
        adapter.save_file("a", b"1");

        let mut uploads = adapter.cloud_uploads();
        uploads.clear();
        adapter.save_file("b", b"2");

        assert_eq!(adapter.cloud_uploads().len(), 2);
        assert!(adapter.local_writes().is_empty());
    }

    #[test]
    fn teams_is_default_route() {
        let adapter = NotificationAdapter::default();
        assert_eq!(adapter.send("This is a notification message").channel, "teams");
        assert!(adapter.slack_posts().is_empty());
        assert_eq!(adapter.teams_cards().len(), 1);
    }

    #[test]
    fn slack_route_never_touches_teams() {
        let adapter = NotificationAdapter::with_route(NotificationRoute::Slack);
        assert_eq!(adapter.label(), "slack");
        adapter.send("hi");
        assert_eq!(adapter.slack_posts().len(), 1);
        assert!(adapter.teams_cards().is_empty());
    }

    #[test]
    fn routes_parse_from_config_text() {
        #[derive(Deserialize)]
        struct Wrapper {
            storage: StorageRoute,
            notifications: NotificationRoute,
        }
        let parsed: Wrapper =
            serde_json::from_str(r#"{"storage":"local","notifications":"slack"}"#).unwrap();
        assert_eq!(parsed.storage, StorageRoute::Local);
        assert_eq!(parsed.notifications, NotificationRoute::Slack);
    }
}
