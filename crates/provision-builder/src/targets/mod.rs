//! Built-in buildable targets

pub mod database;
pub mod http;

pub use database::{ConnectionDescriptor, DatabaseConfig};
pub use http::{HttpRequest, RequestSummary};
