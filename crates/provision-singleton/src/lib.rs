//! Provision Singleton
//!
//! Lazily constructed, at-most-once instances owned by an explicit registry.
//!
//! # Core Concepts
//!
//! - [`Singleton`]: Types declaring a unique tag and a constructor
//! - [`SingletonRegistry`]: Tag to slot table; constructs on first access, exactly once
//! - [`AuditLog`]: Shared append-only log
//!
//! # Example
//!
//! ```rust
//! use provision_singleton::{AuditLog, SingletonRegistry};
//! use std::sync::Arc;
//!
//! let registry = SingletonRegistry::new();
//! let a = registry.get_instance::<AuditLog>().unwrap();
//! let b = registry.get_instance::<AuditLog>().unwrap();
//! a.log("first");
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(b.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod audit;
mod registry;

// Re-exports
pub use audit::{AuditEntry, AuditLog};
pub use registry::{Singleton, SingletonError, SingletonRegistry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for singleton access
    pub use crate::{Singleton, SingletonError, SingletonRegistry};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
