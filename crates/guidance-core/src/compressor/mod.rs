//! The external semantic compressor
//!
//! The compressor itself is a third-party model; this module only defines how
//! it is called. Two backends speak the same JSON shape: a long-running worker
//! process ([`CommandCompressor`]) and an HTTP service ([`HttpCompressor`]).
//! [`CompressorService`] builds the configured backend once, on first use.

mod command;
mod http;
mod profile;
mod service;
mod wire;

use thiserror::Error;

use crate::config::validate_ratio;

pub use command::CommandCompressor;
pub use http::HttpCompressor;
pub use profile::Profile;
pub use service::CompressorService;

/// Failures raised at the compressor seam
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("{backend} compressor unavailable. {hint}")]
    Unavailable { backend: String, hint: String },

    #[error("invalid compression request: {0}")]
    InvalidRequest(String),

    #[error("compressor protocol error: {0}")]
    Protocol(String),

    #[error("compression failed: {0}")]
    Failed(String),

    #[error("compressor IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompressionError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CompressionError::Unavailable { .. })
    }
}

/// Parameters for one compression call
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionRequest {
    /// Target fraction of the original size, in (0, 1]
    pub target_ratio: f64,
    /// Tokens the compressor must keep (structure markers)
    pub preserve_tokens: Vec<String>,
    /// Collapse runs of preserved tokens
    pub drop_consecutive: bool,
    /// Backend tuning options, forwarded verbatim
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl CompressionRequest {
    /// Build a request for a profile, validating the ratio.
    pub fn new(
        target_ratio: f64,
        profile: Profile,
        drop_consecutive: bool,
    ) -> Result<Self, CompressionError> {
        validate_ratio(target_ratio).map_err(|e| CompressionError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            target_ratio,
            preserve_tokens: profile.preserve_tokens(),
            drop_consecutive,
            options: profile.options(target_ratio),
        })
    }
}

/// What the compressor returns for one call
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorOutput {
    pub compressed_text: String,
    /// Original tokens per compressed token (2.0 means half the size)
    pub achieved_ratio: f64,
    pub origin_tokens: usize,
    pub compressed_tokens: usize,
}

/// A semantic text compressor.
///
/// Implementations may hold heavyweight state; calls are strictly sequential.
pub trait Compressor {
    /// Short backend name for logs and reports
    fn name(&self) -> &str;

    fn compress(
        &mut self,
        text: &str,
        request: &CompressionRequest,
    ) -> Result<CompressorOutput, CompressionError>;
}
