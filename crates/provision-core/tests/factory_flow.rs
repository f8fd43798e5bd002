//! Variant registry behaviour seen through the provisioner

use provision_core::registry::{
    AccessLevel, Capability, Database, DatabaseKind, DatabaseRegistry, DuplicatePolicy,
    NotificationKind, NotificationRegistry, Notifier, PaymentKind, RegistryError, RoleKind,
};
use provision_core::{ErrorKind, ProvisionConfig, ProvisionError};
use provision_test_utils::{
    assert_delivered, run_concurrently, setup_provisioner, setup_provisioner_with,
    ConstructionCounter,
};
use std::sync::Arc;

#[test]
fn mysql_and_postgres_connect_oracle_is_unknown() {
    let provisioner = setup_provisioner();
    let registry = provisioner.databases();

    for name in ["mysql", "postgres"] {
        let provider = registry.create_named(name).unwrap();
        let connection = provider.connect();
        assert_eq!(connection.backend(), name);
        assert_eq!(connection.execute_query("SELECT 1").backend, name);
    }

    assert_eq!(
        registry.create_named("oracle").unwrap_err(),
        RegistryError::UnknownSelector {
            selector: "oracle".to_string()
        }
    );
}

#[test]
fn every_create_is_a_new_instance() {
    let counter = ConstructionCounter::new();
    let registry = NotificationRegistry::new();
    registry
        .register(NotificationKind::Email, counter.notifier_constructor())
        .unwrap();

    let first = registry.create(NotificationKind::Email).unwrap();
    let second = registry.create(NotificationKind::Email).unwrap();
    assert_eq!(counter.count(), 2);
    assert_eq!(first.label(), second.label());
    assert_delivered(&first.send("a"), "email", "a");
}

#[test]
fn database_instances_have_distinct_identity() {
    let registry = DatabaseRegistry::with_defaults();
    let a = registry.create(DatabaseKind::Postgres).unwrap();
    let b = registry.create(DatabaseKind::Postgres).unwrap();
    let pa: *const dyn Database = &*a;
    let pb: *const dyn Database = &*b;
    assert!(!std::ptr::eq(pa.cast::<u8>(), pb.cast::<u8>()));
}

#[test]
fn duplicate_registration_needs_explicit_overwrite() {
    let provisioner = setup_provisioner();
    let counter = ConstructionCounter::new();

    let err: ProvisionError = provisioner
        .notifications()
        .register(NotificationKind::Sms, counter.notifier_constructor())
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), ErrorKind::DuplicateSelector);

    provisioner
        .notifications()
        .register_with(
            NotificationKind::Sms,
            counter.notifier_constructor(),
            DuplicatePolicy::Overwrite,
        )
        .unwrap();
    provisioner.dispatcher().send(NotificationKind::Sms, "x").unwrap();
    assert_eq!(counter.count(), 1);
}

#[test]
fn overwrite_policy_from_config() {
    let provisioner = setup_provisioner_with(
        ProvisionConfig::new().with_duplicate_policy(DuplicatePolicy::Overwrite),
    );
    let counter = ConstructionCounter::new();
    provisioner
        .notifications()
        .register(NotificationKind::Teams, counter.notifier_constructor())
        .unwrap();
    provisioner.dispatcher().send(NotificationKind::Teams, "x").unwrap();
    assert_eq!(counter.count(), 1);
}

#[test]
fn concurrent_creates_share_one_registry() {
    let provisioner = Arc::new(setup_provisioner());
    let shared = Arc::clone(&provisioner);
    let labels = run_concurrently(16, move |i| {
        let kind = if i % 2 == 0 {
            DatabaseKind::MySql
        } else {
            DatabaseKind::Postgres
        };
        shared.database_client(kind).unwrap().backend()
    });

    assert_eq!(labels.iter().filter(|l| **l == "mysql").count(), 8);
    assert_eq!(labels.iter().filter(|l| **l == "postgres").count(), 8);
}

#[test]
fn payments_and_roles() {
    let provisioner = setup_provisioner();
    let receipt = provisioner
        .payment_client(PaymentKind::PayPal)
        .unwrap()
        .pay(50.0)
        .unwrap();
    assert_eq!(receipt.processor, "paypal");

    let gate = provisioner.access_gate();
    assert_eq!(gate.access(RoleKind::Admin).unwrap(), AccessLevel::Full);
}
