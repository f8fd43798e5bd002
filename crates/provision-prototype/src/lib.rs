//! Provision Prototype
//!
//! Named templates cloned into independent instances.
//!
//! # Core Concepts
//!
//! - [`Prototype`]: Types whose `Clone` is a deep copy
//! - [`PrototypeStore`]: Unique name to template table
//! - [`Document`], [`UserProfile`]: Built-in template types
//!
//! # Example
//!
//! ```rust
//! use provision_prototype::{PrototypeStore, UserProfile};
//!
//! let store = PrototypeStore::new();
//! store
//!     .register("admin", UserProfile::new("template", "admin", ["read", "write"]))
//!     .unwrap();
//!
//! let mut user = store.clone_template("admin").unwrap().with_username("janedoe");
//! user.grant("delete");
//!
//! let fresh = store.clone_template("admin").unwrap();
//! assert_eq!(fresh.permissions(), ["read", "write"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod store;
pub mod templates;

// Re-exports
pub use store::{Prototype, PrototypeError, PrototypeStore};
pub use templates::{Document, Section, UserProfile};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with templates
    pub use crate::{Prototype, PrototypeError, PrototypeStore};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
