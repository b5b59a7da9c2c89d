use crate::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Posts JSON to a single keyed REST endpoint.
///
/// The API key travels as the `key` query parameter, which both the Vision
/// and Gemini REST surfaces accept.
pub struct ApiGateway {
    client: Client,
    service: &'static str,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl ApiGateway {
    pub fn new(
        service: &'static str,
        endpoint: String,
        api_key: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            client,
            service,
            endpoint,
            api_key,
            timeout,
        }
    }

    /// Send `request` and return the parsed JSON body of a success response.
    pub async fn post_json<Req: Serialize>(&self, request: &Req) -> Result<Value> {
        tracing::debug!("Sending request to {} API", self.service);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {} API: {}", self.service, e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "{} API error (status {}): {}",
                self.service,
                status,
                body
            );
            return Err(Error::Gateway {
                service: self.service,
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse {} response: {}\nBody: {}",
                self.service,
                e,
                body
            );
            Error::Serialization(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support;
    use wiremock::matchers::{body_json, header};
    use wiremock::{MockServer, ResponseTemplate};

    fn make_gateway(server: &MockServer, api_key: &str) -> ApiGateway {
        ApiGateway::new(
            "Test",
            format!("{}{}", server.uri(), test_support::ANNOTATE_PATH),
            api_key.to_string(),
            Duration::from_secs(5),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn test_post_json_sends_key_and_body() {
        let server = MockServer::start().await;

        test_support::post_with_key(test_support::ANNOTATE_PATH, "secret")
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({ "hello": "world" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = make_gateway(&server, "secret");
        let body = gateway
            .post_json(&serde_json::json!({ "hello": "world" }))
            .await
            .unwrap();

        assert_eq!(body, serde_json::json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_status_text() {
        let server = MockServer::start().await;

        test_support::post_with_key(test_support::ANNOTATE_PATH, "secret")
            .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
            .mount(&server)
            .await;

        let gateway = make_gateway(&server, "secret");
        let err = gateway.post_json(&serde_json::json!({})).await.unwrap_err();

        match err {
            Error::Gateway {
                service,
                status,
                status_text,
                body,
            } => {
                assert_eq!(service, "Test");
                assert_eq!(status, 503);
                assert_eq!(status_text, "Service Unavailable");
                assert_eq!(body, "try later");
            }
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_body_is_serialization_error() {
        let server = MockServer::start().await;

        test_support::post_with_key(test_support::ANNOTATE_PATH, "secret")
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let gateway = make_gateway(&server, "secret");
        let err = gateway.post_json(&serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
