//! Cloud service integration for text recognition and notes generation
//!
//! Provides interfaces to Cloud Vision text detection and Gemini content
//! generation, both reached through the keyed JSON [`gateway::ApiGateway`].

pub mod gateway;
pub mod gemini;
pub mod mime;
pub mod mock;
#[cfg(test)]
pub(crate) mod test_support;
pub mod vision;

pub use gemini::GeminiNotesClient;
pub use mock::{MockNotesClient, MockOcrClient};
pub use vision::VisionClient;

use crate::models::ImageContent;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait OcrService: Send + Sync {
    /// Run text detection and return the service response unmodified.
    async fn recognize_text(&self, image: &ImageContent) -> Result<Value>;
}

#[async_trait]
pub trait NotesService: Send + Sync {
    /// Summarize `text` into HTML notes.
    async fn generate_notes(&self, text: &str) -> Result<String>;
}
