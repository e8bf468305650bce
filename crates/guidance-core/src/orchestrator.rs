//! Header-protected compression of a single document
//!
//! Only the body goes through the compressor. The header is carried over
//! byte-for-byte, so document metadata is never paraphrased or dropped.

use std::time::Instant;

use crate::compressor::{CompressionError, CompressionRequest, Compressor};
use crate::document::{Document, TextStats};
use crate::header;

/// Outcome of transforming one document in memory
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Below the minimum line count; the compressor was not called.
    Skipped { lines: usize, min_lines: usize },
    Compressed(Compressed),
}

/// A compressed document ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed {
    /// Header plus compressed body
    pub content: String,
    pub stats: TextStats,
    pub achieved_ratio: f64,
    pub origin_tokens: usize,
    pub compressed_tokens: usize,
}

/// Drives the header split and the compressor. Never touches the filesystem.
pub struct Orchestrator<'a> {
    compressor: &'a mut dyn Compressor,
    min_lines: usize,
}

impl<'a> Orchestrator<'a> {
    /// `min_lines` is the guard threshold; documents with fewer lines are
    /// skipped. Zero disables the guard.
    pub fn new(compressor: &'a mut dyn Compressor, min_lines: usize) -> Self {
        Self {
            compressor,
            min_lines,
        }
    }

    #[tracing::instrument(skip_all, fields(path = %document.path.display(), lines = document.lines))]
    pub fn transform(
        &mut self,
        document: &Document,
        request: &CompressionRequest,
    ) -> Result<Transform, CompressionError> {
        if document.lines < self.min_lines {
            tracing::debug!(min_lines = self.min_lines, "below guard threshold");
            return Ok(Transform::Skipped {
                lines: document.lines,
                min_lines: self.min_lines,
            });
        }

        let split = header::split(&document.content);

        let (body, achieved_ratio, origin_tokens, compressed_tokens) =
            if split.body.trim().is_empty() {
                (split.body.to_string(), 1.0, 0, 0)
            } else {
                let start = Instant::now();
                let output = self.compressor.compress(split.body, request)?;
                crate::trace_time!(start, "compress_body", backend = self.compressor.name());
                (
                    output.compressed_text,
                    output.achieved_ratio,
                    output.origin_tokens,
                    output.compressed_tokens,
                )
            };

        let content = header::join(split.header, &body);
        let stats = TextStats::measure(&document.content, &content);

        tracing::debug!(
            header_bytes = split.header.len(),
            original_lines = stats.original_lines,
            compressed_lines = stats.compressed_lines,
            achieved_ratio,
            "document compressed"
        );

        Ok(Transform::Compressed(Compressed {
            content,
            stats,
            achieved_ratio,
            origin_tokens,
            compressed_tokens,
        }))
    }
}
