//! Collaborator configuration.
//!
//! # Responsibility
//! - Name the fixed remote endpoint and blob key used by the stores.
//! - Carry per-source transport settings.

use std::time::Duration;

/// Public users listing consumed by [`crate::HttpUserSource`].
pub const DEFAULT_USERS_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Blob store key holding the serialized task list.
pub const TASKS_BLOB_KEY: &str = "tasks";

/// Settings for the remote users source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Absolute URL answering `GET` with a JSON array of users.
    pub endpoint: String,
    /// Whole-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_USERS_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl SourceConfig {
    /// Replaces the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets an explicit request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{SourceConfig, DEFAULT_USERS_ENDPOINT};
    use std::time::Duration;

    #[test]
    fn default_points_at_public_endpoint_without_timeout() {
        let config = SourceConfig::default();
        assert_eq!(config.endpoint, DEFAULT_USERS_ENDPOINT);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let config = SourceConfig::default()
            .with_endpoint("http://127.0.0.1:9/users")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.endpoint, "http://127.0.0.1:9/users");
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
    }
}
