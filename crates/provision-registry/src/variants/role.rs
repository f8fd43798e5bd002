//! User roles

use crate::capability::{AccessLevel, Capability, UserRole};

/// Administrator
#[derive(Debug, Clone, Default)]
pub struct AdminUser {
    _private: (),
}

impl Capability for AdminUser {
    fn label(&self) -> &'static str {
        "admin"
    }
}

impl UserRole for AdminUser {
    fn access_level(&self) -> AccessLevel {
        AccessLevel::Full
    }
}

/// Regular user
#[derive(Debug, Clone, Default)]
pub struct RegularUser {
    _private: (),
}

impl Capability for RegularUser {
    fn label(&self) -> &'static str {
        "regular"
    }
}

impl UserRole for RegularUser {
    fn access_level(&self) -> AccessLevel {
        AccessLevel::Limited
    }
}
