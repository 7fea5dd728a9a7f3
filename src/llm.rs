use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::message::Message;

/// Per-call generation knobs, with the platform defaults agents run under.
#[derive(Clone, Debug)]
pub struct GenerationOptions {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: 1024,
            temperature: 0.4,
            timeout_secs: 120,
        }
    }
}

/// Error surfaced by a [`ChatClient`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("provider: {0}")]
    Provider(String),
    #[error("empty response")]
    Empty,
}

/// Provider wire payload for a chat completion call.
///
/// The standing instructions go first as a `system` message, followed by the
/// recalled history in order.
pub fn chat_payload(
    model: &str,
    system: &str,
    history: &[Message],
    options: &GenerationOptions,
) -> Value {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(json!({"role": "system", "content": system}));
    for msg in history {
        messages.push(json!({"role": msg.role, "content": msg.content}));
    }

    json!({
        "model": model,
        "messages": messages,
        "temperature": options.temperature,
        "max_tokens": options.max_output_tokens,
    })
}

/// Abstract interface for the chat completion call recalled history feeds.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate a reply to `history`, with `system` as standing instructions.
    async fn complete(
        &self,
        system: &str,
        history: &[Message],
        options: &GenerationOptions,
    ) -> Result<String, ChatError>;
}

/// Trivial implementation used for testing.
pub struct DummyClient;

#[async_trait]
impl ChatClient for DummyClient {
    async fn complete(
        &self,
        _system: &str,
        history: &[Message],
        _options: &GenerationOptions,
    ) -> Result<String, ChatError> {
        Ok(format!("I'm seeing {} turns.", history.len()))
    }
}
