pub mod client;
pub mod types;

pub use client::VisionClient;

use serde_json::Value;

/// Recognized text of the first image in an annotate response.
///
/// Prefers the document-level `fullTextAnnotation` and falls back to the first
/// `textAnnotations` entry, which Vision fills with the whole detected block.
pub fn extract_text(response: &Value) -> Option<String> {
    let first = response.pointer("/responses/0")?;

    first
        .pointer("/fullTextAnnotation/text")
        .or_else(|| first.pointer("/textAnnotations/0/description"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// In-band error Vision reports for a single image alongside a 200 status.
pub fn response_error(response: &Value) -> Option<String> {
    let error = response.pointer("/responses/0/error")?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");

    match error.get("code").and_then(Value::as_i64) {
        Some(code) => Some(format!("{} (code {})", message, code)),
        None => Some(message.to_string()),
    }
}
