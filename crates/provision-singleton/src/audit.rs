//! Process-wide audit log
//!
//! Every handle obtained from one [`SingletonRegistry`](crate::SingletonRegistry)
//! appends to the same entry list.

use crate::registry::Singleton;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Sequence number, starting at 0
    pub seq: u64,
    /// Time recorded
    pub at: DateTime<Utc>,
    /// Message text
    pub message: String,
}

/// Append-only message log
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl Singleton for AuditLog {
    const TAG: &'static str = "audit_log";

    fn create() -> Self {
        Self::default()
    }
}

impl AuditLog {
    /// Record a message
    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "audit");

        let mut entries = self.entries.lock();
        let seq = entries.len() as u64;
        entries.push(AuditEntry {
            seq,
            at: Utc::now(),
            message,
        });
    }

    /// Snapshot of all entries in order
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    /// Get number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if nothing was logged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SingletonRegistry;
    use std::sync::Arc;

    #[test]
    fn entries_accumulate_across_handles() {
        let registry = SingletonRegistry::new();
        let first = registry.get_instance::<AuditLog>().unwrap();
        let second = registry.get_instance::<AuditLog>().unwrap();

        first.log("This is a log message");
        second.log("This is another log message");

        assert!(Arc::ptr_eq(&first, &second));
        let messages: Vec<String> = first.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, ["This is a log message", "This is another log message"]);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn sequence_numbers_are_dense() {
        let log = AuditLog::create();
        for i in 0..5 {
            log.log(format!("m{i}"));
        }
        let seqs: Vec<u64> = log.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }
}
