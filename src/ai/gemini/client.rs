use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::ai::gateway::ApiGateway;
use crate::ai::NotesService;
use crate::{prompts, reformat, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const SERVICE_NAME: &str = "Gemini";

/// Turns recognized text into formatted HTML notes via Gemini `generateContent`.
pub struct GeminiNotesClient {
    http: ApiGateway,
    generation_config: GenerationConfig,
}

impl GeminiNotesClient {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Self {
        Self::new_with_client(endpoint, api_key, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        endpoint: String,
        api_key: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: ApiGateway::new(SERVICE_NAME, endpoint, api_key, timeout, client),
            generation_config: GenerationConfig::default(),
        }
    }

    fn build_request(&self, text: &str) -> GenerateContentRequest {
        GenerateContentRequest::from_prompt(prompts::notes_prompt(text), self.generation_config)
    }

    /// Raw text of the first candidate, before any HTML reformatting.
    pub async fn generate_raw(&self, text: &str) -> Result<String> {
        let request = self.build_request(text);
        let body = self.http.post_json(&request).await?;

        let response: GenerateContentResponse = serde_json::from_value(body).map_err(|e| {
            tracing::error!("Unexpected {} response shape: {}", SERVICE_NAME, e);
            Error::MalformedResponse {
                service: SERVICE_NAME,
                field: "candidates".to_string(),
            }
        })?;

        response.first_text(SERVICE_NAME).map(str::to_string)
    }
}

#[async_trait]
impl NotesService for GeminiNotesClient {
    async fn generate_notes(&self, text: &str) -> Result<String> {
        tracing::debug!("Generating notes from {} chars of text", text.len());

        let raw = self.generate_raw(text).await?;
        let html = reformat::reformat(&raw);

        tracing::debug!(
            "Reformatted {} generated chars into {} chars of HTML",
            raw.len(),
            html.len()
        );
        Ok(html)
    }
}
