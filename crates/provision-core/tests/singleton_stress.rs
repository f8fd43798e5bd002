//! Singleton slots under concurrent first access

use provision_core::singleton::{AuditLog, Singleton, SingletonRegistry};
use provision_core::{ErrorKind, ProvisionError};
use provision_test_utils::{run_concurrently, setup_provisioner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static CONNECTION_POOLS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct ConnectionPool {
    size: usize,
}

impl Singleton for ConnectionPool {
    const TAG: &'static str = "connection_pool";

    fn create() -> Self {
        CONNECTION_POOLS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(10));
        Self { size: 8 }
    }
}

#[derive(Debug)]
struct Squatter;

impl Singleton for Squatter {
    const TAG: &'static str = "audit_log";

    fn create() -> Self {
        Self
    }
}

#[test]
fn one_construction_across_many_threads() {
    let registry = Arc::new(SingletonRegistry::new());
    let shared = Arc::clone(&registry);
    let pools = run_concurrently(32, move |_| shared.get_instance::<ConnectionPool>().unwrap());

    assert_eq!(CONNECTION_POOLS.load(Ordering::SeqCst), 1);
    assert!(pools.iter().all(|pool| Arc::ptr_eq(pool, &pools[0])));
    assert_eq!(pools[0].size, 8);

    for _ in 0..100 {
        let again = registry.get_instance::<ConnectionPool>().unwrap();
        assert!(Arc::ptr_eq(&again, &pools[0]));
    }
    assert_eq!(CONNECTION_POOLS.load(Ordering::SeqCst), 1);
}

#[test]
fn audit_entries_from_every_thread_land_in_one_log() {
    let provisioner = Arc::new(setup_provisioner());
    let shared = Arc::clone(&provisioner);
    run_concurrently(8, move |i| {
        let log = shared.audit_log().unwrap();
        for n in 0..25 {
            log.log(format!("thread {i} message {n}"));
        }
    });

    let log = provisioner.audit_log().unwrap();
    assert_eq!(log.len(), 200);
    let seqs: Vec<u64> = log.entries().iter().map(|e| e.seq).collect();
    assert_eq!(seqs, (0..200).collect::<Vec<u64>>());
}

#[test]
fn tag_squatting_is_a_conflict() {
    let provisioner = setup_provisioner();
    provisioner.audit_log().unwrap();

    let err: ProvisionError = provisioner
        .singletons()
        .get_instance::<Squatter>()
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), ErrorKind::TagConflict);
    assert!(provisioner.singletons().is_initialized::<AuditLog>());
    assert!(!provisioner.singletons().is_initialized::<Squatter>());
}
