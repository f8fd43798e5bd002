//! Logging bootstrap
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` wins over the filter
//! passed in; the filter passed in usually comes from
//! [`ProvisionConfig::log_filter`](crate::ProvisionConfig::log_filter).

use crate::error::LoggingError;
use tracing_subscriber::EnvFilter;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,

    /// One JSON object per event
    Json,
}

/// Build the filter from `RUST_LOG`, falling back to `default_filter`
///
/// # Errors
/// [`LoggingError::InvalidFilter`] if `default_filter` is not a valid directive.
pub fn env_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(default_filter).map_err(|err| LoggingError::InvalidFilter {
            filter: default_filter.to_string(),
            reason: err.to_string(),
        })
    })
}

/// Install the global subscriber
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
/// - [`LoggingError::InvalidFilter`] for a malformed filter
/// - [`LoggingError::AlreadyInstalled`] if called twice in one process
pub fn init_tracing(default_filter: &str, format: LogFormat) -> Result<(), LoggingError> {
    let filter = env_filter(default_filter)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| LoggingError::AlreadyInstalled(err.to_string()))
}
