//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("{service} API error: {status_text}")]
    Gateway {
        service: &'static str,
        status: u16,
        status_text: String,
        body: String,
    },

    /// A success response that is missing part of the expected shape.
    #[error("Invalid response from {service} API: missing {field}")]
    MalformedResponse {
        service: &'static str,
        field: String,
    },

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("No text detected in image")]
    NoTextDetected,

    #[error("Invalid image content: {0}")]
    InvalidImage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
