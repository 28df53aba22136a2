mod client;
pub(crate) mod types;

use crate::error::{AiError, Result};

use client::GroqClient;
use types::*;

/// Default model. Groq serves open-weight models behind an
/// OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

// =============================================================================
// Groq Agent
// =============================================================================

#[derive(Clone)]
pub struct Groq {
    api_key: String,
    model: String,
    base_url: Option<String>,
}

impl Groq {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| AiError::Config("GROQ_API_KEY environment variable not set".into()))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> GroqClient {
        let client = GroqClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    /// One-shot system + user completion with default sampling.
    pub async fn chat_completion(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<String> {
        self.chat_completion_with(system, user, 0.3, 1024).await
    }

    /// One-shot completion with explicit temperature and token budget.
    pub async fn chat_completion_with(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(WireMessage::system(system))
            .message(WireMessage::user(user))
            .temperature(temperature)
            .max_tokens(max_tokens);

        let response = self.client().chat(&request).await?;

        response
            .text()
            .ok_or_else(|| AiError::EmptyCompletion("no choices in Groq response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_new() {
        let ai = Groq::new("gsk-test", DEFAULT_MODEL);
        assert_eq!(ai.model(), "llama-3.3-70b-versatile");
        assert_eq!(ai.api_key, "gsk-test");
    }

    #[test]
    fn test_groq_with_base_url() {
        let ai = Groq::new("gsk-test", DEFAULT_MODEL).with_base_url("http://localhost:8080");
        assert_eq!(ai.base_url, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_chat_request_serializes_without_empty_fields() {
        let request = ChatRequest::new("m").message(WireMessage::user("hi"));
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("stop").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
