//! Lazily constructed compressor

use super::{
    command, http, CommandCompressor, CompressionError, CompressionRequest, Compressor,
    CompressorOutput, HttpCompressor,
};
use crate::config::{CompressorBackend, CompressorConfig};

type Factory = Box<dyn FnMut() -> Result<Box<dyn Compressor>, CompressionError>>;

/// Owns the compressor for one run.
///
/// The backend is built on the first `compress` call and reused afterwards,
/// so a run that never compresses anything never starts a worker.
pub struct CompressorService {
    config: Option<CompressorConfig>,
    factory: Factory,
    backend: Option<Box<dyn Compressor>>,
}

impl CompressorService {
    /// Service for the configured backend.
    pub fn from_config(config: &CompressorConfig) -> Self {
        let owned = config.clone();
        let factory: Factory = Box::new(move || build(&owned));

        Self {
            config: Some(config.clone()),
            factory,
            backend: None,
        }
    }

    /// Service around a caller-supplied constructor. Probing always succeeds.
    pub fn from_factory(
        factory: impl FnMut() -> Result<Box<dyn Compressor>, CompressionError> + 'static,
    ) -> Self {
        Self {
            config: None,
            factory: Box::new(factory),
            backend: None,
        }
    }

    /// Check availability without constructing the backend.
    pub fn probe(&self) -> Result<(), CompressionError> {
        let Some(config) = &self.config else {
            return Ok(());
        };

        match config.backend {
            CompressorBackend::Command => command::probe(&config.command),
            CompressorBackend::Http => match &config.endpoint {
                Some(endpoint) => http::probe(endpoint, config.timeout_seconds),
                None => Err(CompressionError::Unavailable {
                    backend: config.backend.to_string(),
                    hint: "Set [compressor].endpoint in the config file.".to_string(),
                }),
            },
        }
    }

    pub fn is_started(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&mut self) -> Result<&mut Box<dyn Compressor>, CompressionError> {
        if self.backend.is_none() {
            let backend = (self.factory)()?;
            tracing::info!(backend = backend.name(), "compressor ready");
            self.backend = Some(backend);
        }

        self.backend
            .as_mut()
            .ok_or_else(|| CompressionError::Failed("compressor not constructed".to_string()))
    }
}

impl Compressor for CompressorService {
    fn name(&self) -> &str {
        match (&self.backend, &self.config) {
            (Some(backend), _) => backend.name(),
            (None, Some(config)) => match config.backend {
                CompressorBackend::Command => "command",
                CompressorBackend::Http => "http",
            },
            (None, None) => "custom",
        }
    }

    fn compress(
        &mut self,
        text: &str,
        request: &CompressionRequest,
    ) -> Result<CompressorOutput, CompressionError> {
        self.backend()?.compress(text, request)
    }
}

fn build(config: &CompressorConfig) -> Result<Box<dyn Compressor>, CompressionError> {
    match config.backend {
        CompressorBackend::Command => Ok(Box::new(CommandCompressor::spawn(
            &config.command,
            &config.model,
        )?)),
        CompressorBackend::Http => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                CompressionError::InvalidRequest("http backend requires an endpoint".to_string())
            })?;
            Ok(Box::new(HttpCompressor::new(
                endpoint,
                &config.model,
                config.timeout_seconds,
            )))
        }
    }
}
