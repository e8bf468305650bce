//! JSON shapes exchanged with compressor backends
//!
//! Field names follow the compressor's own vocabulary (`rate`,
//! `force_tokens`, `compressed_prompt`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CompressionError, CompressionRequest, CompressorOutput};

#[derive(Debug, Serialize)]
pub(super) struct WireRequest<'a> {
    pub text: &'a str,
    pub rate: f64,
    pub force_tokens: &'a [String],
    pub drop_consecutive: bool,
    pub model: &'a str,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: &'a Map<String, Value>,
}

impl<'a> WireRequest<'a> {
    pub fn new(text: &'a str, request: &'a CompressionRequest, model: &'a str) -> Self {
        Self {
            text,
            rate: request.target_ratio,
            force_tokens: &request.preserve_tokens,
            drop_consecutive: request.drop_consecutive,
            model,
            options: &request.options,
        }
    }
}

/// The compressor reports its ratio either as a number or as text like "2.1x".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireRatio {
    Number(f64),
    Text(String),
}

impl WireRatio {
    fn value(&self) -> Option<f64> {
        match self {
            WireRatio::Number(n) => Some(*n),
            WireRatio::Text(s) => s.trim().trim_end_matches('x').trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WireReply {
    #[serde(default)]
    compressed_prompt: Option<String>,
    #[serde(default)]
    origin_tokens: Option<usize>,
    #[serde(default)]
    compressed_tokens: Option<usize>,
    #[serde(default)]
    ratio: Option<WireRatio>,
    #[serde(default)]
    error: Option<String>,
}

impl WireReply {
    pub fn parse(raw: &str) -> Result<Self, CompressionError> {
        serde_json::from_str(raw.trim())
            .map_err(|e| CompressionError::Protocol(format!("malformed reply: {}", e)))
    }

    /// Convert into a typed output. Required fields must be present.
    pub fn into_output(self) -> Result<CompressorOutput, CompressionError> {
        if let Some(error) = self.error {
            return Err(CompressionError::Failed(error));
        }

        let compressed_text = self
            .compressed_prompt
            .ok_or_else(|| missing("compressed_prompt"))?;
        let origin_tokens = self.origin_tokens.ok_or_else(|| missing("origin_tokens"))?;
        let compressed_tokens = self
            .compressed_tokens
            .ok_or_else(|| missing("compressed_tokens"))?;

        let achieved_ratio = match self.ratio.as_ref().and_then(WireRatio::value) {
            Some(ratio) => ratio,
            None if compressed_tokens > 0 => origin_tokens as f64 / compressed_tokens as f64,
            None => 1.0,
        };

        Ok(CompressorOutput {
            compressed_text,
            achieved_ratio,
            origin_tokens,
            compressed_tokens,
        })
    }
}

fn missing(field: &str) -> CompressionError {
    CompressionError::Protocol(format!("reply is missing `{}`", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compressor::Profile;

    #[test]
    fn test_reply_with_numeric_ratio() {
        let reply = WireReply::parse(
            r#"{"compressed_prompt":"short","origin_tokens":100,"compressed_tokens":40,"ratio":2.5}"#,
        )
        .unwrap();
        let output = reply.into_output().unwrap();
        assert_eq!(output.compressed_text, "short");
        assert_eq!(output.achieved_ratio, 2.5);
    }

    #[test]
    fn test_reply_with_text_ratio() {
        let reply = WireReply::parse(
            r#"{"compressed_prompt":"s","origin_tokens":9,"compressed_tokens":3,"ratio":"2.1x"}"#,
        )
        .unwrap();
        assert_eq!(reply.into_output().unwrap().achieved_ratio, 2.1);
    }

    #[test]
    fn test_reply_without_ratio_is_computed() {
        let reply =
            WireReply::parse(r#"{"compressed_prompt":"s","origin_tokens":90,"compressed_tokens":30}"#)
                .unwrap();
        assert_eq!(reply.into_output().unwrap().achieved_ratio, 3.0);
    }

    #[test]
    fn test_reply_missing_field_is_protocol_error() {
        let reply = WireReply::parse(r#"{"origin_tokens":90,"compressed_tokens":30}"#).unwrap();
        let err = reply.into_output().unwrap_err();
        assert!(err.to_string().contains("compressed_prompt"));
    }

    #[test]
    fn test_reply_error_field_is_failure() {
        let reply = WireReply::parse(r#"{"error":"model not loaded"}"#).unwrap();
        let err = reply.into_output().unwrap_err();
        assert!(matches!(err, CompressionError::Failed(ref m) if m == "model not loaded"));
    }

    #[test]
    fn test_malformed_reply() {
        assert!(matches!(
            WireReply::parse("not json"),
            Err(CompressionError::Protocol(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = CompressionRequest::new(0.5, Profile::Standard, true).unwrap();
        let wire = WireRequest::new("body", &request, "some-model");
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["text"], "body");
        assert_eq!(value["rate"], 0.5);
        assert_eq!(value["model"], "some-model");
        assert!(value.get("options").is_none());
        assert_eq!(value["force_tokens"][0], "\n");
    }
}
