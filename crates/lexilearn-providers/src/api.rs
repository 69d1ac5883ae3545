//! HTTP client for the buddy and story-generator endpoints.
//!
//! `POST {base}/api/ai-buddy` takes `{emotion, userName}` and answers
//! `{message}`. `POST {base}/api/story-generator` takes `{story}` and answers
//! `{summary, scrambledEvents, correctOrder}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lexilearn_core::model::StoryAnalysis;
use lexilearn_core::traits::{EncouragementProvider, EncouragementRequest, StoryAnalyzer};

use crate::error::{from_reqwest, from_response, ProviderError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the lexilearn API.
pub struct ApiProvider {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
            client,
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> anyhow::Result<R>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("content-type", "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| from_reqwest(e, self.timeout_secs))?;

        if !response.status().is_success() {
            return Err(from_response(response).await.into());
        }

        let parsed = response.json::<R>().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("failed to parse response: {e}"))
        })?;
        Ok(parsed)
    }
}

#[derive(Serialize)]
struct StoryRequest<'a> {
    story: &'a str,
}

#[derive(Deserialize)]
struct BuddyResponse {
    message: String,
}

#[async_trait]
impl EncouragementProvider for ApiProvider {
    fn name(&self) -> &str {
        "api"
    }

    #[instrument(skip(self, request), fields(mood = %request.mood))]
    async fn encourage(&self, request: &EncouragementRequest) -> anyhow::Result<String> {
        let response: BuddyResponse = self.post("/api/ai-buddy", request).await?;
        if response.message.trim().is_empty() {
            return Err(ProviderError::MalformedResponse("empty message".into()).into());
        }
        Ok(response.message)
    }
}

#[async_trait]
impl StoryAnalyzer for ApiProvider {
    fn name(&self) -> &str {
        "api"
    }

    #[instrument(skip(self, story), fields(chars = story.len()))]
    async fn analyze(&self, story: &str) -> anyhow::Result<StoryAnalysis> {
        let analysis: StoryAnalysis = self
            .post("/api/story-generator", &StoryRequest { story })
            .await?;
        analysis
            .to_puzzle("check")
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexilearn_core::model::Mood;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> EncouragementRequest {
        EncouragementRequest {
            mood: Mood::Sad,
            user_name: "Sam".into(),
        }
    }

    fn events() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e"]
    }

    #[tokio::test]
    async fn encouragement_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/ai-buddy"))
            .and(body_json(serde_json::json!({"emotion": "sad", "userName": "Sam"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "You've got this!"})),
            )
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), None).unwrap();
        let message = provider.encourage(&request()).await.unwrap();
        assert_eq!(message, "You've got this!");
    }

    #[tokio::test]
    async fn api_key_is_sent_as_bearer() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/ai-buddy"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "hi"})),
            )
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), Some("secret".into())).unwrap();
        assert_eq!(provider.encourage(&request()).await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/ai-buddy"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), None).unwrap();
        let err = provider.encourage(&request()).await.unwrap_err();
        match err.downcast_ref::<ProviderError>() {
            Some(ProviderError::ApiError { status, message }) => {
                assert_eq!(*status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn json_error_field_is_preferred() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/story-generator"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(serde_json::json!({"error": "busy"})),
            )
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), None).unwrap();
        let err = provider.analyze("story").await.unwrap_err();
        assert!(err.to_string().contains("busy"));
    }

    #[tokio::test]
    async fn story_round_trip() {
        let server = MockServer::start().await;

        let mut scrambled = events();
        scrambled.reverse();
        Mock::given(method("POST"))
            .and(path("/api/story-generator"))
            .and(body_json(serde_json::json!({"story": "Once upon a time"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "summary": "A short tale.",
                "scrambledEvents": scrambled,
                "correctOrder": events(),
            })))
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), None).unwrap();
        let analysis = provider.analyze("Once upon a time").await.unwrap();
        assert_eq!(analysis.summary, "A short tale.");
        assert_eq!(analysis.scrambled_events[0], "e");
        assert_eq!(analysis.correct_order[0], "a");
    }

    #[tokio::test]
    async fn story_with_wrong_event_count_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/story-generator"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "summary": "Too short.",
                "scrambledEvents": ["b", "a"],
                "correctOrder": ["a", "b"],
            })))
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), None).unwrap();
        let err = provider.analyze("story").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn unparseable_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/ai-buddy"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = ApiProvider::new(&server.uri(), None).unwrap();
        let err = provider.encourage(&request()).await.unwrap_err();
        assert!(err.to_string().contains("malformed response"));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let provider = ApiProvider::with_timeout("http://127.0.0.1:9", None, 2).unwrap();
        let err = provider.encourage(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::NetworkError(_)) | Some(ProviderError::Timeout(_))
        ));
    }
}
