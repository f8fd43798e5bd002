//! User profile template

use crate::store::Prototype;
use serde::Serialize;

/// A user profile with a permission list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    username: String,
    role: String,
    permissions: Vec<String>,
}

impl Prototype for UserProfile {}

impl UserProfile {
    /// Create profile
    #[must_use]
    pub fn new<I, P>(username: impl Into<String>, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            username: username.into(),
            role: role.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Replace role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Grant a permission; no-op if already granted
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.grant(permission);
        self
    }

    /// Grant a permission in place; returns false if already granted
    pub fn grant(&mut self, permission: impl Into<String>) -> bool {
        let permission = permission.into();
        if self.permissions.contains(&permission) {
            return false;
        }
        self.permissions.push(permission);
        true
    }

    /// Revoke a permission; returns false if it was not granted
    pub fn revoke(&mut self, permission: &str) -> bool {
        let before = self.permissions.len();
        self.permissions.retain(|p| p != permission);
        self.permissions.len() != before
    }

    /// Username
    #[inline]
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Role
    #[inline]
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Permissions in grant order
    #[inline]
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Check if permission is granted
    #[inline]
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granting_on_copy_leaves_original() {
        let original = UserProfile::new("johndoe", "admin", ["read", "write"]);
        let mut copy = original.duplicate().with_username("janedoe");
        assert!(copy.grant("delete"));

        assert_eq!(original.permissions(), ["read", "write"]);
        assert_eq!(copy.permissions(), ["read", "write", "delete"]);
        assert_eq!(original.username(), "johndoe");
    }

    #[test]
    fn grant_is_idempotent() {
        let mut user = UserProfile::new("u", "regular", ["read"]);
        assert!(!user.grant("read"));
        assert_eq!(user.permissions().len(), 1);
    }

    #[test]
    fn revoke() {
        let mut user = UserProfile::new("u", "regular", ["read", "write"]);
        assert!(user.revoke("write"));
        assert!(!user.revoke("write"));
        assert!(!user.has_permission("write"));
        assert!(user.has_permission("read"));
    }
}
