//! Built-in template types

pub mod document;
pub mod user;

pub use document::{Document, Section};
pub use user::UserProfile;
