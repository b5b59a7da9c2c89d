//! Data models and configuration
//!
//! Defines the call-scoped image payload and the endpoint/credential
//! configuration for the OCR and generation services.

use crate::{Error, Result};
use base64::Engine as _;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base64-encoded bytes of a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent(String);

impl ImageContent {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidImage("image is empty".to_string()));
        }
        Ok(Self(base64::engine::general_purpose::STANDARD.encode(bytes)))
    }

    /// Wrap content that is already base64-encoded, checking that it decodes.
    pub fn from_base64(content: String) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(Error::InvalidImage("image content is empty".to_string()));
        }
        base64::engine::general_purpose::STANDARD
            .decode(content.as_bytes())
            .map_err(|e| Error::InvalidImage(format!("not valid base64: {}", e)))?;
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub vision_api_key: String,
    pub vision_endpoint: String,
    pub gemini_api_key: String,
    pub gemini_endpoint: String,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} not set", key)))
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                Error::Config(format!(
                    "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            vision_api_key: required("VISION_API_KEY")?,
            vision_endpoint: lookup("VISION_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_VISION_ENDPOINT.to_string()),
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_endpoint: lookup("GEMINI_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            request_timeout,
        })
    }
}
