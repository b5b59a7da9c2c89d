//! Gemini `generateContent` payloads used by the notes client.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sampling settings sent with every notes request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config,
        }
    }
}

/// Top-level `generateContent` response envelope.
///
/// Every level is optional so that shape problems surface through
/// [`GenerateContentResponse::first_text`] with the missing field named.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of `candidates[0].content.parts[0]`, which must be non-empty.
    pub fn first_text(&self, service: &'static str) -> Result<&str> {
        let missing = |field: &str| Error::MalformedResponse {
            service,
            field: field.to_string(),
        };

        let candidate = self.candidates.first().ok_or_else(|| missing("candidates[0]"))?;
        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| missing("candidates[0].content"))?;
        let part = content
            .parts
            .first()
            .ok_or_else(|| missing("candidates[0].content.parts[0]"))?;

        part.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| missing("candidates[0].content.parts[0].text"))
    }
}
