//! Capability traits and the records their operations produce
//!
//! Every provisioned variant implements [`Capability`] plus exactly one domain
//! trait. A variant that leaves an operation out does not compile, so contract
//! coverage is checked before anything is registered.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Common surface of every provisioned variant
pub trait Capability: Send + Sync + fmt::Debug {
    /// Stable label of the concrete variant (`"mysql"`, `"stripe"`, ...)
    fn label(&self) -> &'static str;
}

/// Database connection provider
pub trait Database: Capability {
    /// Open a connection to the backend
    fn connect(&self) -> Connection;
}

/// Payment processor
pub trait PaymentProcessor: Capability {
    /// Charge `amount` (USD)
    ///
    /// # Errors
    /// Returns [`PaymentError::InvalidAmount`] when the amount is not a
    /// positive finite number.
    fn process_payment(&self, amount: f64) -> Result<PaymentReceipt, PaymentError>;
}

/// Message delivery channel
pub trait Notifier: Capability {
    /// Deliver `message` over this channel
    fn send(&self, message: &str) -> Delivery;
}

/// User role with an access level
pub trait UserRole: Capability {
    /// Access granted to this role
    fn access_level(&self) -> AccessLevel;
}

/// An open connection handed out by a [`Database`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    backend: &'static str,
    endpoint: String,
}

impl Connection {
    /// Create connection record
    #[inline]
    #[must_use]
    pub fn new(backend: &'static str, endpoint: impl Into<String>) -> Self {
        Self {
            backend,
            endpoint: endpoint.into(),
        }
    }

    /// Backend label
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Endpoint the connection points at
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a statement on this connection
    #[must_use]
    pub fn execute_query(&self, statement: &str) -> QueryOutcome {
        tracing::info!(backend = self.backend, statement, "executing query");
        QueryOutcome {
            backend: self.backend,
            statement: statement.to_string(),
        }
    }
}

/// Result of [`Connection::execute_query`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    /// Backend that ran the statement
    pub backend: &'static str,
    /// Statement as submitted
    pub statement: String,
}

/// Receipt for a processed payment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    /// Processor label
    pub processor: &'static str,
    /// Payment method used by the processor
    pub method: &'static str,
    /// Charged amount in USD
    pub amount: f64,
    /// Processing time
    pub processed_at: DateTime<Utc>,
}

impl PaymentReceipt {
    /// Validate `amount` and build a receipt stamped now
    ///
    /// # Errors
    /// Returns [`PaymentError::InvalidAmount`] for zero, negative, NaN or
    /// infinite amounts.
    pub fn issue(
        processor: &'static str,
        method: &'static str,
        amount: f64,
    ) -> Result<Self, PaymentError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::InvalidAmount { amount });
        }
        Ok(Self {
            processor,
            method,
            amount,
            processed_at: Utc::now(),
        })
    }
}

/// Payment errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    /// Amount is not a positive finite number
    #[error("invalid payment amount: {amount}")]
    InvalidAmount {
        /// Rejected amount
        amount: f64,
    },
}

/// A delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Channel label
    pub channel: &'static str,
    /// Delivered message
    pub message: String,
}

impl Delivery {
    /// Create delivery record
    #[inline]
    #[must_use]
    pub fn new(channel: &'static str, message: impl Into<String>) -> Self {
        Self {
            channel,
            message: message.into(),
        }
    }
}

/// Access level of a [`UserRole`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Unrestricted access
    Full,

    /// Restricted access
    Limited,
}

impl AccessLevel {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Full => "full access as administrator",
            Self::Limited => "limited access as regular user",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
