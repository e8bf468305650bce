//! HTTP service backend

use std::time::Duration;

use ureq::Agent;

use super::wire::{WireReply, WireRequest};
use super::{CompressionError, CompressionRequest, Compressor, CompressorOutput};

const BACKEND: &str = "http";

/// Compressor reached over HTTP: one POST of the request JSON per document
#[derive(Debug)]
pub struct HttpCompressor {
    agent: Agent,
    endpoint: String,
    model: String,
    user_agent: String,
}

impl HttpCompressor {
    pub fn new(endpoint: &str, model: &str, timeout_seconds: u64) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_seconds)))
            .build();

        Self {
            agent: Agent::new_with_config(config),
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            user_agent: format!("guidance-compress/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    fn post(&self, payload: &str) -> Result<String, CompressionError> {
        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.user_agent)
            .send(payload)
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => {
                    CompressionError::Failed(format!("service returned HTTP {}", code))
                }
                other => CompressionError::Failed(format!("request failed: {}", other)),
            })?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| CompressionError::Protocol(format!("unreadable reply: {}", e)))
    }
}

impl Compressor for HttpCompressor {
    fn name(&self) -> &str {
        BACKEND
    }

    fn compress(
        &mut self,
        text: &str,
        request: &CompressionRequest,
    ) -> Result<CompressorOutput, CompressionError> {
        let payload = serde_json::to_string(&WireRequest::new(text, request, &self.model))
            .map_err(|e| CompressionError::Protocol(e.to_string()))?;

        let reply = self.post(&payload)?;
        WireReply::parse(&reply)?.into_output()
    }
}

/// Check that the service answers at all. Any HTTP status counts as reachable.
pub(super) fn probe(endpoint: &str, timeout_seconds: u64) -> Result<(), CompressionError> {
    let config = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_seconds.min(10))))
        .build();
    let agent = Agent::new_with_config(config);

    match agent.get(endpoint).call() {
        Ok(_) | Err(ureq::Error::StatusCode(_)) => {
            tracing::debug!(endpoint, "compressor service reachable");
            Ok(())
        }
        Err(e) => Err(CompressionError::Unavailable {
            backend: BACKEND.to_string(),
            hint: format!(
                "Cannot reach {} ({}). Start the compressor service or set \
                 [compressor].endpoint in the config file.",
                endpoint, e
            ),
        }),
    }
}
