// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the WLED JSON state API.

use std::time::Duration;

use reqwest::Client;

use crate::error::ProtocolError;
use crate::state::LightingState;

/// Path of the device's JSON state endpoint.
pub const STATE_PATH: &str = "/json/state";

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for the lighting device.
///
/// # Examples
///
/// ```
/// use tmcc_wled::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.0.10")
///     .with_port(8080)
///     .with_timeout(Duration::from_millis(500));
///
/// assert_eq!(config.state_url(), "http://192.168.0.10:8080/json/state");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Creates a configuration for the specified host.
    ///
    /// The host may carry an `http://` or `https://` prefix; without one,
    /// plain HTTP is used.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let (scheme, host) = if let Some(rest) = self.host.strip_prefix("https://") {
            ("https", rest)
        } else {
            ("http", self.host.strip_prefix("http://").unwrap_or(&self.host))
        };
        let host = host.trim_end_matches('/');
        let default_port = if scheme == "https" { 443 } else { Self::DEFAULT_PORT };

        if self.port == default_port {
            format!("{scheme}://{host}")
        } else {
            format!("{scheme}://{host}:{}", self.port)
        }
    }

    /// Returns the full URL of the JSON state endpoint.
    #[must_use]
    pub fn state_url(&self) -> String {
        format!("{}{STATE_PATH}", self.base_url())
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        // No idle connections are kept: every post opens, uses and closes
        // its own connection.
        let client = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            state_url: self.state_url(),
            client,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// Posts lighting states to the device.
///
/// Cloning is cheap and clones share no mutable state, so the daylight loop
/// and the dispatch path each hold their own handle.
///
/// # Examples
///
/// ```no_run
/// use tmcc_wled::protocol::HttpConfig;
/// use tmcc_wled::state::LightingState;
///
/// # async fn example() -> tmcc_wled::Result<()> {
/// let client = HttpConfig::new("192.168.0.10").into_client()?;
/// if !client.post_state(&LightingState::power(true)).await {
///     // already logged; nothing else to do
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    state_url: String,
    client: Client,
}

impl HttpClient {
    /// Returns the URL states are posted to.
    #[must_use]
    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    /// Posts a state and reports whether the device accepted it.
    ///
    /// Failures are logged here and never returned: a non-2xx status is a
    /// warning, a transport error (including timeout) is an error.
    pub async fn post_state(&self, state: &LightingState) -> bool {
        match self.try_post_state(state).await {
            Ok(()) => true,
            Err(ProtocolError::Status { status, reason }) => {
                let payload = serde_json::to_string(state).unwrap_or_default();
                tracing::warn!(url = %self.state_url, status, %reason, %payload, "Device rejected state");
                false
            }
            Err(e) => {
                tracing::error!(url = %self.state_url, error = %e, "Device request failed");
                false
            }
        }
    }

    /// Posts a state, returning the failure reason.
    ///
    /// The response body is always read to completion before returning.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Http` on transport failure and
    /// `ProtocolError::Status` on a non-2xx response.
    pub async fn try_post_state(&self, state: &LightingState) -> Result<(), ProtocolError> {
        tracing::debug!(url = %self.state_url, ?state, "Posting lighting state");

        let response = self.client.post(&self.state_url).json(state).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        tracing::trace!(body = %body, "Device accepted state");
        Ok(())
    }
}
