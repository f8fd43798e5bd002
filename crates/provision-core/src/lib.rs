//! Provision Core
//!
//! One owner for every provisioning component, plus the error taxonomy,
//! configuration and logging bootstrap shared by the `provision` binary.
//!
//! # Core Concepts
//!
//! - [`Provisioner`]: Registries, builders, template stores, singletons and adapters set up from one config
//! - [`ProvisionError`]: Every component error, classified by [`ErrorKind`]
//! - [`ProvisionConfig`]: TOML configuration
//! - [`run_demo`]: Scenario runner behind `provision demo`
//!
//! # Example
//!
//! ```rust
//! use provision_core::{ErrorKind, ProvisionConfig, Provisioner};
//! use provision_core::registry::DatabaseKind;
//!
//! let provisioner = Provisioner::new(ProvisionConfig::default()).unwrap();
//! let client = provisioner.database_client(DatabaseKind::MySql).unwrap();
//! assert_eq!(client.run_query("SELECT 1").backend, "mysql");
//!
//! let err = provisioner.database_client_named("oracle").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnknownSelector);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod demo;
mod error;
pub mod logging;
mod provisioner;

// Re-exports
pub use config::{NotificationConfig, ProvisionConfig, StorageConfig};
pub use demo::{run_demo, Demo, DemoReport, ScenarioReport, UnknownDemo};
pub use error::{ConfigError, ErrorKind, LoggingError, ProvisionError};
pub use logging::{init_tracing, LogFormat};
pub use provisioner::{
    Provisioner, ADMIN_TEMPLATE, LETTER_TEMPLATE, REGULAR_TEMPLATE, REPORT_TEMPLATE,
};

pub use provision_adapter as adapter;
pub use provision_builder as builder;
pub use provision_prototype as prototype;
pub use provision_registry as registry;
pub use provision_singleton as singleton;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for provisioning
    pub use crate::{ErrorKind, ProvisionConfig, ProvisionError, Provisioner};
    pub use provision_adapter::prelude::*;
    pub use provision_builder::prelude::*;
    pub use provision_prototype::prelude::*;
    pub use provision_registry::prelude::*;
    pub use provision_singleton::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
