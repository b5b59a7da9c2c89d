use super::{NotesService, OcrService};
use crate::models::ImageContent;
use crate::{reformat, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub struct MockOcrClient {
    responses: Arc<Mutex<Vec<Value>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockOcrClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: Value) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Queue a response whose full text annotation is `text`.
    pub fn with_text(self, text: &str) -> Self {
        self.with_response(serde_json::json!({
            "responses": [{ "fullTextAnnotation": { "text": text } }]
        }))
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockOcrClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrService for MockOcrClient {
    async fn recognize_text(&self, _image: &ImageContent) -> Result<Value> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(serde_json::json!({
                "responses": [{ "fullTextAnnotation": { "text": "Mock recognized text" } }]
            }))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Notes service that reformats canned model output instead of calling out.
pub struct MockNotesClient {
    raw_responses: Arc<Mutex<Vec<String>>>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockNotesClient {
    pub fn new() -> Self {
        Self {
            raw_responses: Arc::new(Mutex::new(Vec::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue raw generated text; it goes through the reformatter like real output.
    pub fn with_raw_response(self, response: String) -> Self {
        self.raw_responses.lock().unwrap().push(response);
        self
    }

    /// Texts passed to `generate_notes`, oldest first.
    pub fn received_texts(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    pub fn get_call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl Default for MockNotesClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotesService for MockNotesClient {
    async fn generate_notes(&self, text: &str) -> Result<String> {
        let mut received = self.received.lock().unwrap();
        received.push(text.to_string());

        let responses = self.raw_responses.lock().unwrap();
        let raw = if responses.is_empty() {
            format!("# Notes\n\n{}", text)
        } else {
            let index = (received.len() - 1) % responses.len();
            responses[index].clone()
        };

        Ok(reformat::reformat(&raw))
    }
}
