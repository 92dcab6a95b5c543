//! Configuration module
//!
//! Connection settings for the processing service. Values come from the environment
//! (optionally a `.env` file loaded by the binary) with fixed defaults, and can be
//! overridden by the caller before the client is built.

use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const ATTACHMENTS_PATH: &str = "/api/attachments";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Route prefix of the attachment endpoints.
    pub attachments_path: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            attachments_path: ATTACHMENTS_PATH.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read PAIRSPAN_API_URL (or API_URL) and PAIRSPAN_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let base_url = env::var("PAIRSPAN_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("PAIRSPAN_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid PAIRSPAN_TIMEOUT_SECS: {}", raw))?;
                (secs > 0).then_some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let config = Self {
            base_url,
            timeout,
            ..Self::default()
        }
        .normalized();
        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded client configuration");
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}
