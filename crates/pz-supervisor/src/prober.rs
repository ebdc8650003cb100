use crate::{ServiceEndpoint, SupervisorResult};

use std::time::Duration;

use async_trait::async_trait;

const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1000;

/// Result of a single readiness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this HTTP status
    Status(u16),
    /// No response: connection refused, DNS failure, timeout
    Unreachable(String),
}

/// Issues one readiness request against an endpoint.
#[async_trait]
pub trait EndpointProber: Send + Sync {
    async fn probe(&self, endpoint: &ServiceEndpoint) -> ProbeOutcome;
}

/// Plain `GET /` over reqwest.
///
/// Redirects are not followed: a 3xx from the UI root counts as an
/// unexpected status rather than a ready server.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new() -> SupervisorResult<Self> {
        Self::with_timeout(Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> SupervisorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl EndpointProber for HttpProber {
    async fn probe(&self, endpoint: &ServiceEndpoint) -> ProbeOutcome {
        match self.client.get(endpoint.url()).send().await {
            Ok(resp) => ProbeOutcome::Status(resp.status().as_u16()),
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        }
    }
}
