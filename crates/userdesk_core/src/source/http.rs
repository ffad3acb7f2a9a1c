//! HTTP implementation of [`UserSource`].

use super::payload::RemoteUser;
use super::{SourceError, SourceResult, UserSource};
use crate::config::SourceConfig;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Instant;

/// Fetches the users listing with one blocking `GET`.
pub struct HttpUserSource {
    client: Client,
    endpoint: String,
}

impl HttpUserSource {
    /// Builds a client for `config`.
    ///
    /// # Errors
    /// - `Transport` when the HTTP client cannot be constructed.
    pub fn new(config: &SourceConfig) -> SourceResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(SourceError::Transport)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> SourceResult<Vec<RemoteUser>> {
        let started_at = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(SourceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=users_fetch module=source status=error http_status={} duration_ms={}",
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().map_err(SourceError::Transport)?;
        let users: Vec<RemoteUser> = serde_json::from_str(&body).map_err(SourceError::Decode)?;
        debug!(
            "event=users_fetch module=source status=ok count={} duration_ms={}",
            users.len(),
            started_at.elapsed().as_millis()
        );
        Ok(users)
    }
}
