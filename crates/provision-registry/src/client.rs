//! Registry-backed clients
//!
//! Callers hold a client bound to one selected variant, or a dispatcher that
//! creates a fresh variant per call. Neither knows any concrete type.

use crate::capability::{
    AccessLevel, Capability, Database, Delivery, Notifier, PaymentError, PaymentProcessor,
    PaymentReceipt, QueryOutcome, UserRole,
};
use crate::registry::RegistryError;
use crate::selector::{DatabaseKind, NotificationKind, PaymentKind, RoleKind};
use crate::variants::{DatabaseRegistry, NotificationRegistry, PaymentRegistry, RoleRegistry};

/// Database client bound to one backend
#[derive(Debug)]
pub struct DatabaseClient {
    provider: Box<dyn Database>,
}

impl DatabaseClient {
    /// Wrap an already constructed provider
    #[inline]
    #[must_use]
    pub fn new(provider: Box<dyn Database>) -> Self {
        Self { provider }
    }

    /// Create client for `kind` from `registry`
    ///
    /// # Errors
    /// [`RegistryError::UnknownSelector`] if `kind` is not registered.
    pub fn from_registry(
        registry: &DatabaseRegistry,
        kind: DatabaseKind,
    ) -> Result<Self, RegistryError> {
        registry.create(kind).map(Self::new)
    }

    /// Backend label
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.provider.label()
    }

    /// Connect, then run `statement`
    #[must_use]
    pub fn run_query(&self, statement: &str) -> QueryOutcome {
        self.provider.connect().execute_query(statement)
    }
}

/// Payment client bound to one processor
#[derive(Debug)]
pub struct PaymentClient {
    processor: Box<dyn PaymentProcessor>,
}

impl PaymentClient {
    /// Wrap an already constructed processor
    #[inline]
    #[must_use]
    pub fn new(processor: Box<dyn PaymentProcessor>) -> Self {
        Self { processor }
    }

    /// Create client for `kind` from `registry`
    ///
    /// # Errors
    /// [`RegistryError::UnknownSelector`] if `kind` is not registered.
    pub fn from_registry(
        registry: &PaymentRegistry,
        kind: PaymentKind,
    ) -> Result<Self, RegistryError> {
        registry.create(kind).map(Self::new)
    }

    /// Charge `amount`
    ///
    /// # Errors
    /// [`PaymentError::InvalidAmount`] for non-positive amounts.
    pub fn pay(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        self.processor.process_payment(amount)
    }
}

/// Sends messages through a channel created on demand
#[derive(Debug, Clone, Copy)]
pub struct NotificationDispatcher<'a> {
    registry: &'a NotificationRegistry,
}

impl<'a> NotificationDispatcher<'a> {
    /// Dispatcher over `registry`
    #[inline]
    #[must_use]
    pub fn new(registry: &'a NotificationRegistry) -> Self {
        Self { registry }
    }

    /// Create a notifier for `kind` and deliver `message` through it
    ///
    /// # Errors
    /// [`RegistryError::UnknownSelector`] if `kind` is not registered.
    pub fn send(&self, kind: NotificationKind, message: &str) -> Result<Delivery, RegistryError> {
        let notifier = self.registry.create(kind)?;
        Ok(notifier.send(message))
    }
}

/// Resolves access levels through a role registry
#[derive(Debug, Clone, Copy)]
pub struct AccessGate<'a> {
    registry: &'a RoleRegistry,
}

impl<'a> AccessGate<'a> {
    /// Gate over `registry`
    #[inline]
    #[must_use]
    pub fn new(registry: &'a RoleRegistry) -> Self {
        Self { registry }
    }

    /// Access level granted to `kind`
    ///
    /// # Errors
    /// [`RegistryError::UnknownSelector`] if `kind` is not registered.
    pub fn access(&self, kind: RoleKind) -> Result<AccessLevel, RegistryError> {
        let role: Box<dyn UserRole> = self.registry.create(kind)?;
        let level = role.access_level();
        tracing::info!(role = role.label(), %level, "resolved access level");
        Ok(level)
    }
}
