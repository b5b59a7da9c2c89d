use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockBuilder};

pub const ANNOTATE_PATH: &str = "/v1/images:annotate";
pub const GENERATE_CONTENT_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

pub fn post_with_key(endpoint_path: &str, api_key: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(endpoint_path))
        .and(query_param("key", api_key))
}
