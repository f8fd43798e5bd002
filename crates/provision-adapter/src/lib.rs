//! Provision Adapter
//!
//! Foreign clients exposed through capability traits.
//!
//! # Core Concepts
//!
//! - [`Adaptee`] / [`wrap`]: Turn a foreign client into its adapter
//! - [`FileStore`]: File storage capability implemented by the storage adapters
//! - [`StorageAdapter`], [`NotificationAdapter`]: Several backends behind one explicit route
//!
//! # Example
//!
//! ```rust
//! use provision_adapter::{FileStore, StorageAdapter, StorageRoute};
//!
//! let storage = StorageAdapter::with_bucket("reports", StorageRoute::Cloud);
//! let stored = storage.save_file("q3.pdf", b"%PDF-1.7");
//! assert_eq!(stored.location, "s3://reports/q3.pdf");
//! assert!(storage.local_writes().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod adapters;
pub mod foreign;
mod multiplex;

// Re-exports
pub use adapters::{
    wrap, Adaptee, FileStore, LocalStorage, S3Storage, SlackNotifier, StoredFile, TeamsNotifier,
};
pub use foreign::{LocalDisk, S3Client, SlackClient, TeamsClient};
pub use multiplex::{NotificationAdapter, NotificationRoute, StorageAdapter, StorageRoute};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for adapting foreign clients
    pub use crate::{wrap, Adaptee, FileStore, NotificationRoute, StorageRoute};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
