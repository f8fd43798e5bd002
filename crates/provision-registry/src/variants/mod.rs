//! Built-in variants and their default registries

pub mod database;
pub mod notification;
pub mod payment;
pub mod role;

use crate::capability::{Database, Notifier, PaymentProcessor, UserRole};
use crate::registry::VariantRegistry;
use crate::selector::{DatabaseKind, NotificationKind, PaymentKind, RoleKind};

pub use database::{MongoConnection, MySqlConnection, PostgresConnection};
pub use notification::{EmailNotifier, SmsNotifier};
pub use payment::{PayPalProcessor, StripeProcessor};
pub use role::{AdminUser, RegularUser};

/// Registry of database connection providers
pub type DatabaseRegistry = VariantRegistry<DatabaseKind, dyn Database>;

/// Registry of payment processors
pub type PaymentRegistry = VariantRegistry<PaymentKind, dyn PaymentProcessor>;

/// Registry of notification channels
pub type NotificationRegistry = VariantRegistry<NotificationKind, dyn Notifier>;

/// Registry of user roles
pub type RoleRegistry = VariantRegistry<RoleKind, dyn UserRole>;

impl VariantRegistry<DatabaseKind, dyn Database> {
    /// Create registry with MySQL, PostgreSQL and MongoDB
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .seed(DatabaseKind::MySql, || Box::new(MySqlConnection::default()))
            .seed(DatabaseKind::Postgres, || Box::new(PostgresConnection::default()))
            .seed(DatabaseKind::Mongo, || Box::new(MongoConnection::default()))
    }
}

impl VariantRegistry<PaymentKind, dyn PaymentProcessor> {
    /// Create registry with Stripe and PayPal
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .seed(PaymentKind::Stripe, || Box::new(StripeProcessor::default()))
            .seed(PaymentKind::PayPal, || Box::new(PayPalProcessor::default()))
    }
}

impl VariantRegistry<NotificationKind, dyn Notifier> {
    /// Create registry with e-mail and SMS
    ///
    /// Slack and Teams go through adapters and are registered by their owner.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .seed(NotificationKind::Email, || Box::new(EmailNotifier::default()))
            .seed(NotificationKind::Sms, || Box::new(SmsNotifier::default()))
    }
}

impl VariantRegistry<RoleKind, dyn UserRole> {
    /// Create registry with admin and regular roles
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .seed(RoleKind::Admin, || Box::new(AdminUser::default()))
            .seed(RoleKind::Regular, || Box::new(RegularUser::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::AccessLevel;

    #[test]
    fn database_defaults() {
        let registry = DatabaseRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        for kind in DatabaseKind::ALL {
            let db = registry.create(*kind).unwrap();
            assert_eq!(db.label(), kind.as_str());
        }
    }

    #[test]
    fn payment_defaults() {
        let registry = PaymentRegistry::with_defaults();
        assert_eq!(registry.selectors(), vec![PaymentKind::Stripe, PaymentKind::PayPal]);
    }

    #[test]
    fn notification_defaults_leave_adapters_out() {
        let registry = NotificationRegistry::with_defaults();
        assert!(registry.contains(NotificationKind::Email));
        assert!(registry.contains(NotificationKind::Sms));
        assert!(!registry.contains(NotificationKind::Slack));
        assert!(!registry.contains(NotificationKind::Teams));
    }

    #[test]
    fn role_defaults() {
        let registry = RoleRegistry::with_defaults();
        assert_eq!(
            registry.create(RoleKind::Admin).unwrap().access_level(),
            AccessLevel::Full
        );
        assert_eq!(
            registry.create(RoleKind::Regular).unwrap().access_level(),
            AccessLevel::Limited
        );
    }

    #[test]
    fn defaults_still_reject_duplicates() {
        let registry = DatabaseRegistry::with_defaults();
        assert!(registry
            .register(DatabaseKind::MySql, || Box::new(MySqlConnection::default()))
            .is_err());
    }
}
