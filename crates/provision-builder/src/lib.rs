//! Provision Builder
//!
//! Schema-validated builders producing immutable values.
//!
//! # Core Concepts
//!
//! - [`Schema`]: Field declarations of a target type
//! - [`Builder`]: Accumulates values, checked against the schema on every `set`
//! - [`Buildable`]: Implemented by targets; turns a complete field set into a value
//! - [`BuildError`]: Unknown field, wrong kind, missing fields, rejected value
//!
//! # Example
//!
//! ```rust
//! use provision_builder::{Buildable, BuildError, HttpRequest};
//!
//! # fn main() -> Result<(), BuildError> {
//! let request = HttpRequest::builder()
//!     .set("url", "https://api.example.com/resource")?
//!     .set("method", "POST")?
//!     .insert_entry("headers", "Content-Type", "application/json")?
//!     .set("body", "{\"key\":\"value\"}")?
//!     .build()?;
//!
//! assert_eq!(request.method(), "POST");
//! assert_eq!(request.headers().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod builder;
mod field;
pub mod targets;

// Re-exports
pub use builder::{BuildError, Buildable, Builder, BuiltFields};
pub use field::{FieldKind, FieldSpec, FieldValue, Requirement, Schema};
pub use targets::{ConnectionDescriptor, DatabaseConfig, HttpRequest, RequestSummary};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building values
    pub use crate::{BuildError, Buildable, Builder, FieldKind, FieldSpec, Schema};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
