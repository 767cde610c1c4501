//! Chat-completions client (OpenAI-compatible dialect).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "gpt-oss-20b:free";

// OpenRouter identification headers
const REFERER: &str = "https://github.com/poyraz-ai/poyraz";
const TITLE: &str = "poyraz";

// --- Internal API types ---

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for a chat-completions endpoint.
///
/// The endpoint is treated as an untrusted text source: the only guarantee
/// this client gives is non-empty content. Interpreting that content is
/// the caller's problem.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl Client {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit one single-turn completion and return its text content.
    ///
    /// Fails with [`Error::ResponseEmpty`] when the endpoint answers with
    /// no choices or blank content.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ApiRequest {
            model: self.model.clone(),
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ApiMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, temperature, "chat completion request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(Error::ResponseEmpty);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> Client {
        Client::new("test-key").with_base_url(server.url())
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"merhaba"}}]}"#)
            .create_async()
            .await;

        let content = client_for(&server)
            .complete("system", "user", 0.1, 100)
            .await
            .unwrap();
        assert_eq!(content, "merhaba");
    }

    #[tokio::test]
    async fn empty_content_is_a_typed_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":""}}]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("system", "user", 0.1, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ResponseEmpty));
    }

    #[tokio::test]
    async fn missing_choices_is_a_typed_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("system", "user", 0.1, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ResponseEmpty));
    }

    #[tokio::test]
    async fn http_failures_carry_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"bad key"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("system", "user", 0.1, 100)
            .await
            .unwrap_err();
        let Error::Api(detail) = err else {
            panic!("expected API error");
        };
        assert!(detail.contains("401"));
        assert!(detail.contains("bad key"));
    }
}
