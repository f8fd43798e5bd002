//! Provision Registry
//!
//! Capability traits and selector-keyed variant registries.
//!
//! # Core Concepts
//!
//! - [`Capability`]: Base trait every provisioned variant implements
//! - [`Database`], [`PaymentProcessor`], [`Notifier`], [`UserRole`]: Domain capabilities
//! - [`VariantRegistry`]: Selector tag to constructor table; fresh instance per `create`
//! - [`DuplicatePolicy`]: Explicit reject/overwrite behaviour for re-registration
//! - [`DatabaseClient`], [`NotificationDispatcher`], ...: Callers that only see capabilities
//!
//! # Example
//!
//! ```rust
//! use provision_registry::{DatabaseClient, DatabaseKind, DatabaseRegistry};
//!
//! let registry = DatabaseRegistry::with_defaults();
//! let client = DatabaseClient::from_registry(&registry, DatabaseKind::Postgres).unwrap();
//! let outcome = client.run_query("SELECT * FROM customers;");
//! assert_eq!(outcome.backend, "postgres");
//!
//! assert!(registry.create_named("oracle").is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod capability;
mod client;
mod registry;
mod selector;
pub mod variants;

// Re-exports
pub use capability::{
    AccessLevel, Capability, Connection, Database, Delivery, Notifier, PaymentError,
    PaymentProcessor, PaymentReceipt, QueryOutcome, UserRole,
};
pub use client::{AccessGate, DatabaseClient, NotificationDispatcher, PaymentClient};
pub use registry::{Constructor, DuplicatePolicy, Registration, RegistryError, VariantRegistry};
pub use selector::{DatabaseKind, NotificationKind, PaymentKind, RoleKind, Selector};
pub use variants::{DatabaseRegistry, NotificationRegistry, PaymentRegistry, RoleRegistry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with registries
    pub use crate::{
        Capability, Database, DatabaseKind, DuplicatePolicy, Notifier, NotificationKind,
        PaymentKind, PaymentProcessor, RegistryError, RoleKind, UserRole, VariantRegistry,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
