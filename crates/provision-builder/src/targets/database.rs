//! Database connection settings

use crate::builder::{BuildError, Buildable, BuiltFields};
use crate::field::{FieldKind, FieldSpec, Schema};
use serde::Serialize;
use std::fmt;

/// Immutable database connection settings
///
/// Fields: `host`, `port`, `user`, `password` (all required), `ssl`
/// (default `false`).
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    host: String,
    port: u16,
    user: String,
    password: String,
    ssl: bool,
}

impl DatabaseConfig {
    /// Host name
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// User name
    #[inline]
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Whether TLS is used
    #[inline]
    #[must_use]
    pub fn ssl(&self) -> bool {
        self.ssl
    }

    /// Open a connection with these settings
    #[must_use]
    pub fn connect(&self) -> ConnectionDescriptor {
        tracing::info!(host = %self.host, port = self.port, user = %self.user, ssl = self.ssl, "connecting to database");
        ConnectionDescriptor {
            address: format!("{}:{}", self.host, self.port),
            user: self.user.clone(),
            ssl: self.ssl,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("ssl", &self.ssl)
            .finish()
    }
}

impl Buildable for DatabaseConfig {
    fn schema() -> Schema {
        Schema::new("DatabaseConfig")
            .field(FieldSpec::required("host", FieldKind::Text))
            .field(FieldSpec::required("port", FieldKind::Integer))
            .field(FieldSpec::required("user", FieldKind::Text))
            .field(FieldSpec::required("password", FieldKind::Text))
            .field(FieldSpec::with_default("ssl", false))
    }

    fn assemble(mut fields: BuiltFields) -> Result<Self, BuildError> {
        let raw_port = fields.take_integer("port")?;
        let port = u16::try_from(raw_port)
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| fields.invalid("port", format!("{raw_port} is not a valid TCP port")))?;

        Ok(Self {
            host: fields.take_text("host")?,
            port,
            user: fields.take_text("user")?,
            password: fields.take_text("password")?,
            ssl: fields.take_bool("ssl")?,
        })
    }
}

/// What [`DatabaseConfig::connect`] opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionDescriptor {
    /// `host:port`
    pub address: String,
    /// Connected user
    pub user: String,
    /// Whether TLS is used
    pub ssl: bool,
}
