use async_trait::async_trait;

use crate::error::Result;
use crate::groq::Groq;

/// Dyn-compatible chat seam so callers can swap the real provider for a
/// fake in tests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}

#[async_trait]
impl ChatModel for Groq {
    async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        self.chat_completion_with(system, user, temperature, max_tokens)
            .await
    }
}
