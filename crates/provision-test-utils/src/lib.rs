//! Testing utilities for the provision workspace
//!
//! Shared fixtures and helpers.

#![allow(missing_docs)]

use provision_core::builder::{Builder, DatabaseConfig};
use provision_core::prototype::{Document, Section, UserProfile};
use provision_core::registry::variants::EmailNotifier;
use provision_core::registry::{Delivery, Notifier};
use provision_core::{ProvisionConfig, Provisioner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

pub fn setup_provisioner() -> Provisioner {
    Provisioner::new(ProvisionConfig::new()).unwrap()
}

pub fn setup_provisioner_with(config: ProvisionConfig) -> Provisioner {
    Provisioner::new(config).unwrap()
}

/// Builder with every required field of `DatabaseConfig` set
pub fn complete_database_builder() -> Builder<DatabaseConfig> {
    let mut builder = Builder::new();
    builder
        .set("host", "db.internal")
        .unwrap()
        .set("port", 5432)
        .unwrap()
        .set("user", "app")
        .unwrap()
        .set("password", "s3cret")
        .unwrap();
    builder
}

pub fn sample_document() -> Document {
    Document::new("Design Notes", "Initial draft.", "Ana")
        .with_tag("draft")
        .with_section(Section::new("Context", "Why this exists."))
        .with_section(Section::new("Decision", "What we chose."))
}

pub fn sample_user() -> UserProfile {
    UserProfile::new("template", "editor", ["read", "write"])
}

/// Counts constructor invocations
#[derive(Debug, Clone, Default)]
pub struct ConstructionCounter {
    calls: Arc<AtomicUsize>,
}

impl ConstructionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Notifier constructor that bumps the counter on every call
    pub fn notifier_constructor(&self) -> impl Fn() -> Box<dyn Notifier> + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Box::new(EmailNotifier::default()) as Box<dyn Notifier>
        }
    }
}

/// Run `task` on `threads` threads released together; results in spawn order
pub fn run_concurrently<T, F>(threads: usize, task: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(threads));
    let task = Arc::new(task);
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            let task = Arc::clone(&task);
            std::thread::spawn(move || {
                barrier.wait();
                task(i)
            })
        })
        .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

pub fn assert_delivered(delivery: &Delivery, channel: &str, message: &str) {
    assert_eq!(delivery.channel, channel, "delivery channel");
    assert_eq!(delivery.message, message, "delivery message");
}
