//! Database connection providers

use crate::capability::{Capability, Connection, Database};

/// MySQL connection provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConnection {
    endpoint: String,
}

impl MySqlConnection {
    /// Provider for a specific endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for MySqlConnection {
    fn default() -> Self {
        Self::new("mysql://localhost:3306")
    }
}

impl Capability for MySqlConnection {
    fn label(&self) -> &'static str {
        "mysql"
    }
}

impl Database for MySqlConnection {
    fn connect(&self) -> Connection {
        tracing::info!(endpoint = %self.endpoint, "connecting to MySQL");
        Connection::new(self.label(), self.endpoint.clone())
    }
}

/// PostgreSQL connection provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConnection {
    endpoint: String,
}

impl PostgresConnection {
    /// Provider for a specific endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for PostgresConnection {
    fn default() -> Self {
        Self::new("postgres://localhost:5432")
    }
}

impl Capability for PostgresConnection {
    fn label(&self) -> &'static str {
        "postgres"
    }
}

impl Database for PostgresConnection {
    fn connect(&self) -> Connection {
        tracing::info!(endpoint = %self.endpoint, "connecting to PostgreSQL");
        Connection::new(self.label(), self.endpoint.clone())
    }
}

/// MongoDB connection provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConnection {
    endpoint: String,
}

impl MongoConnection {
    /// Provider for a specific endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for MongoConnection {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

impl Capability for MongoConnection {
    fn label(&self) -> &'static str {
        "mongo"
    }
}

impl Database for MongoConnection {
    fn connect(&self) -> Connection {
        tracing::info!(endpoint = %self.endpoint, "connecting to MongoDB");
        Connection::new(self.label(), self.endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_backend_connects_to_itself() {
        let backends: Vec<Box<dyn Database>> = vec![
            Box::new(MySqlConnection::default()),
            Box::new(PostgresConnection::default()),
            Box::new(MongoConnection::default()),
        ];
        for db in backends {
            let conn = db.connect();
            assert_eq!(conn.backend(), db.label());
        }
    }

    #[test]
    fn custom_endpoint() {
        let conn = PostgresConnection::new("postgres://db:6543").connect();
        assert_eq!(conn.endpoint(), "postgres://db:6543");
    }
}
