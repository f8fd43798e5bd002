//! Provisioning facade
//!
//! [`Provisioner`] owns one instance of every provisioning component, set up
//! from a [`ProvisionConfig`]. Callers reach each component through it and
//! never name a concrete variant type.

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use provision_adapter::{NotificationAdapter, SlackNotifier, StorageAdapter, TeamsNotifier};
use provision_builder::{Buildable, Builder, DatabaseConfig, HttpRequest};
use provision_prototype::{Document, PrototypeStore, Section, UserProfile};
use provision_registry::{
    AccessGate, DatabaseClient, DatabaseKind, DatabaseRegistry, NotificationDispatcher,
    NotificationKind, NotificationRegistry, PaymentClient, PaymentKind, PaymentRegistry,
    RoleRegistry,
};
use provision_singleton::{AuditLog, SingletonRegistry};
use std::sync::Arc;

/// Name of the built-in report template
pub const REPORT_TEMPLATE: &str = "report";
/// Name of the built-in letter template
pub const LETTER_TEMPLATE: &str = "letter";
/// Name of the built-in administrator profile template
pub const ADMIN_TEMPLATE: &str = "admin";
/// Name of the built-in regular user profile template
pub const REGULAR_TEMPLATE: &str = "regular";

/// All provisioning components behind one owner
#[derive(Debug)]
pub struct Provisioner {
    config: ProvisionConfig,
    databases: DatabaseRegistry,
    payments: PaymentRegistry,
    notifications: NotificationRegistry,
    roles: RoleRegistry,
    documents: PrototypeStore<Document>,
    users: PrototypeStore<UserProfile>,
    singletons: Arc<SingletonRegistry>,
    storage: StorageAdapter,
    notifier: NotificationAdapter,
}

impl Provisioner {
    /// Set up every component from `config`
    ///
    /// Registries start with the built-in variants and use the configured
    /// duplicate policy; Slack and Teams are added to the notification
    /// registry through their adapters.
    ///
    /// # Errors
    /// [`ProvisionError::Registry`] or [`ProvisionError::Prototype`] if a
    /// built-in registration collides.
    pub fn new(config: ProvisionConfig) -> Result<Self, ProvisionError> {
        let policy = config.duplicate_policy;

        let notifications = NotificationRegistry::with_defaults().with_policy(policy);
        notifications.register(NotificationKind::Slack, || Box::new(SlackNotifier::default()))?;
        notifications.register(NotificationKind::Teams, || Box::new(TeamsNotifier::default()))?;

        let documents = PrototypeStore::new();
        documents.register(
            REPORT_TEMPLATE,
            Document::new("Quarterly Report", "Summary of the quarter.", "Finance Team")
                .with_tag("report")
                .with_section(Section::new("Highlights", ""))
                .with_section(Section::new("Figures", "")),
        )?;
        documents.register(
            LETTER_TEMPLATE,
            Document::new("Letter", "Dear customer,", "Support Team").with_tag("letter"),
        )?;

        let users = PrototypeStore::new();
        users.register(
            ADMIN_TEMPLATE,
            UserProfile::new("admin", "admin", ["read", "write", "delete"]),
        )?;
        users.register(REGULAR_TEMPLATE, UserProfile::new("user", "regular", ["read"]))?;

        let storage = StorageAdapter::with_bucket(config.storage.bucket.clone(), config.storage.route);
        let notifier = NotificationAdapter::with_route(config.notifications.route);

        tracing::info!(
            ?policy,
            storage_route = %config.storage.route,
            notification_route = %config.notifications.route,
            "provisioner ready"
        );

        Ok(Self {
            databases: DatabaseRegistry::with_defaults().with_policy(policy),
            payments: PaymentRegistry::with_defaults().with_policy(policy),
            notifications,
            roles: RoleRegistry::with_defaults().with_policy(policy),
            documents,
            users,
            singletons: Arc::new(SingletonRegistry::new()),
            storage,
            notifier,
            config,
        })
    }

    /// Provisioner with default configuration
    ///
    /// # Errors
    /// See [`Provisioner::new`].
    pub fn with_defaults() -> Result<Self, ProvisionError> {
        Self::new(ProvisionConfig::default())
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Database provider registry
    #[inline]
    #[must_use]
    pub fn databases(&self) -> &DatabaseRegistry {
        &self.databases
    }

    /// Payment processor registry
    #[inline]
    #[must_use]
    pub fn payments(&self) -> &PaymentRegistry {
        &self.payments
    }

    /// Notification channel registry
    #[inline]
    #[must_use]
    pub fn notifications(&self) -> &NotificationRegistry {
        &self.notifications
    }

    /// User role registry
    #[inline]
    #[must_use]
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Document templates
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &PrototypeStore<Document> {
        &self.documents
    }

    /// User profile templates
    #[inline]
    #[must_use]
    pub fn users(&self) -> &PrototypeStore<UserProfile> {
        &self.users
    }

    /// Singleton registry, shareable across threads
    #[inline]
    #[must_use]
    pub fn singletons(&self) -> &Arc<SingletonRegistry> {
        &self.singletons
    }

    /// Routed storage adapter
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &StorageAdapter {
        &self.storage
    }

    /// Routed notification adapter
    #[inline]
    #[must_use]
    pub fn notifier(&self) -> &NotificationAdapter {
        &self.notifier
    }

    /// Database client for `kind`
    ///
    /// # Errors
    /// [`ProvisionError::Registry`] if `kind` is not registered.
    pub fn database_client(&self, kind: DatabaseKind) -> Result<DatabaseClient, ProvisionError> {
        Ok(DatabaseClient::from_registry(&self.databases, kind)?)
    }

    /// Database client for a backend named in text, e.g. from a request
    ///
    /// # Errors
    /// [`ProvisionError::Registry`] if `name` names no registered backend.
    pub fn database_client_named(&self, name: &str) -> Result<DatabaseClient, ProvisionError> {
        Ok(DatabaseClient::new(self.databases.create_named(name)?))
    }

    /// Payment client for `kind`
    ///
    /// # Errors
    /// [`ProvisionError::Registry`] if `kind` is not registered.
    pub fn payment_client(&self, kind: PaymentKind) -> Result<PaymentClient, ProvisionError> {
        Ok(PaymentClient::from_registry(&self.payments, kind)?)
    }

    /// Dispatcher over the notification registry
    #[inline]
    #[must_use]
    pub fn dispatcher(&self) -> NotificationDispatcher<'_> {
        NotificationDispatcher::new(&self.notifications)
    }

    /// Access gate over the role registry
    #[inline]
    #[must_use]
    pub fn access_gate(&self) -> AccessGate<'_> {
        AccessGate::new(&self.roles)
    }

    /// Fresh HTTP request builder
    #[inline]
    #[must_use]
    pub fn http_request(&self) -> Builder<HttpRequest> {
        HttpRequest::builder()
    }

    /// Fresh database settings builder
    #[inline]
    #[must_use]
    pub fn database_config(&self) -> Builder<DatabaseConfig> {
        DatabaseConfig::builder()
    }

    /// The shared audit log
    ///
    /// # Errors
    /// [`ProvisionError::Singleton`] if its tag was claimed by another type.
    pub fn audit_log(&self) -> Result<Arc<AuditLog>, ProvisionError> {
        Ok(self.singletons.get_instance::<AuditLog>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use provision_adapter::{NotificationRoute, StorageRoute};
    use provision_registry::{DuplicatePolicy, Registration};

    #[test]
    fn every_notification_channel_is_registered() {
        let provisioner = Provisioner::with_defaults().unwrap();
        assert_eq!(provisioner.notifications().selectors(), NotificationKind::ALL.to_vec());
        let delivery = provisioner.dispatcher().send(NotificationKind::Slack, "hi").unwrap();
        assert_eq!(delivery.channel, "slack");
    }

    #[test]
    fn configured_policy_reaches_registries() {
        let config = ProvisionConfig::new().with_duplicate_policy(DuplicatePolicy::Overwrite);
        let provisioner = Provisioner::new(config).unwrap();
        let outcome = provisioner
            .databases()
            .register(DatabaseKind::Mongo, || {
                Box::new(provision_registry::variants::PostgresConnection::default())
            })
            .unwrap();
        assert_eq!(outcome, Registration::Replaced);
    }

    #[test]
    fn default_policy_rejects() {
        let provisioner = Provisioner::with_defaults().unwrap();
        let err = provisioner
            .notifications()
            .register(NotificationKind::Email, || Box::new(SlackNotifier::default()))
            .map_err(ProvisionError::from)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateSelector);
    }

    #[test]
    fn configured_routes_reach_adapters() {
        let config = ProvisionConfig::new()
            .with_storage_route(StorageRoute::Local)
            .with_notification_route(NotificationRoute::Slack);
        let provisioner = Provisioner::new(config).unwrap();
        assert_eq!(provisioner.storage().route(), StorageRoute::Local);
        assert_eq!(provisioner.notifier().route(), NotificationRoute::Slack);
    }

    #[test]
    fn named_database_client() {
        let provisioner = Provisioner::with_defaults().unwrap();
        assert_eq!(provisioner.database_client_named("postgres").unwrap().backend(), "postgres");
        assert_eq!(
            provisioner.database_client_named("oracle").unwrap_err().kind(),
            ErrorKind::UnknownSelector
        );
    }

    #[test]
    fn builtin_templates() {
        let provisioner = Provisioner::with_defaults().unwrap();
        assert_eq!(provisioner.documents().names(), vec!["letter", "report"]);
        assert_eq!(provisioner.users().names(), vec!["admin", "regular"]);
    }
}
