use super::types::AnnotateImagesRequest;
use crate::ai::gateway::ApiGateway;
use crate::ai::OcrService;
use crate::models::ImageContent;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const SERVICE_NAME: &str = "Vision";

/// Text detection through the Cloud Vision `images:annotate` endpoint.
pub struct VisionClient {
    http: ApiGateway,
}

impl VisionClient {
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
        }
    }
}

#[async_trait]
impl OcrService for VisionClient {
    async fn recognize_text(&self, image: &ImageContent) -> Result<Value> {
        tracing::debug!(
            "Requesting text detection for {} base64 chars",
            image.as_str().len()
        );

        let request = AnnotateImagesRequest::text_detection(image.as_str());
        self.http.post_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support;
    use crate::Error;
    use wiremock::matchers::body_json;
    use wiremock::{MockServer, ResponseTemplate};

    fn make_client(server: &MockServer, api_key: &str) -> VisionClient {
        VisionClient::new(
            format!("{}{}", server.uri(), test_support::ANNOTATE_PATH),
            api_key.to_string(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_recognize_text_sends_text_detection_request() {
        let server = MockServer::start().await;

        test_support::post_with_key(test_support::ANNOTATE_PATH, "vision-key")
            .and(body_json(serde_json::json!({
                "requests": [{
                    "image": { "content": "aGVsbG8=" },
                    "features": [{ "type": "TEXT_DETECTION" }]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responses": [{ "fullTextAnnotation": { "text": "hello" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "vision-key");
        let image = ImageContent::from_bytes(b"hello").unwrap();

        client.recognize_text(&image).await.unwrap();
    }

    #[tokio::test]
    async fn test_recognize_text_returns_body_unmodified() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "responses": [{
                "textAnnotations": [{ "locale": "en", "description": "Mitochondria" }],
                "fullTextAnnotation": { "text": "Mitochondria", "pages": [] }
            }]
        });

        test_support::post_with_key(test_support::ANNOTATE_PATH, "vision-key")
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let client = make_client(&server, "vision-key");
        let image = ImageContent::from_bytes(&[0x89, 0x50, 0x4E, 0x47]).unwrap();

        let response = client.recognize_text(&image).await.unwrap();
        assert_eq!(response, body);
    }

    #[tokio::test]
    async fn test_forbidden_response_is_gateway_error() {
        let server = MockServer::start().await;

        test_support::post_with_key(test_support::ANNOTATE_PATH, "bad-key")
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = make_client(&server, "bad-key");
        let image = ImageContent::from_bytes(b"img").unwrap();

        let err = client.recognize_text(&image).await.unwrap_err();
        assert!(matches!(err, Error::Gateway { status: 403, .. }));
        assert_eq!(err.to_string(), "Vision API error: Forbidden");
    }
}
