//! Chat assistant plumbing.
//!
//! Completions go to an OpenAI-style endpoint through the async
//! `reqwest` client; the app awaits these calls inside `Task::perform`
//! so the UI thread never blocks. Models are tried best to worst and
//! the first success wins. Conversations are persisted as JSON message
//! lists next to an id-to-title index.

use crate::storage::Storage;
use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Available models, sorted best to worst.
pub const MODEL_LADDER: [&str; 7] = [
    "llama-3.1-405b-reasoning",
    "llama-3.1-70b-versatile",
    "llama-3.1-8b-instant",
    "llama3-70b-8192",
    "gemma2-9b-it",
    "llama3-8b-8192",
    "gemma-7b-it",
];

/// Cheapest model; used for title generation.
pub const TITLE_MODEL: &str = "gemma-7b-it";

pub const DEFAULT_TITLE: &str = "New Chat";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const TITLE_MAX_TOKENS: u32 = 30;

const TITLE_PROMPT: &str = "Create a short and catchy title of up to 5 words that \
captures the essence of the following content. The title should be relevant and \
engaging for any subject matter. This content is a chat between a user and an \
assistant but don't mention that in the title, and never cut the title off \
mid-word.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

/// A configured connection to the completion endpoint. The API key is
/// read from `GROQ_API_KEY` at startup; without it every request fails
/// with a clear error instead of a confusing 401.
#[derive(Debug, Clone)]
pub struct ChatClient {
    endpoint: String,
    api_key: Option<String>,
    max_tokens: u32,
    http: reqwest::Client,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, max_tokens: u32) -> Self {
        let api_key = std::env::var("GROQ_API_KEY").ok();
        if api_key.is_none() {
            warn!("GROQ_API_KEY is not set; chat requests will fail");
        }
        ChatClient {
            endpoint: endpoint.into(),
            api_key,
            max_tokens,
            http: reqwest::Client::new(),
        }
    }

    /// Walk the model ladder until one answers. Returns the reply and
    /// the model that produced it.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<(ChatMessage, String)> {
        let mut last_err = anyhow!("No models available");
        for model in MODEL_LADDER {
            match self.request(model, messages, self.max_tokens).await {
                Ok(reply) => {
                    info!(model, "Chat completion succeeded");
                    return Ok((reply, model.to_string()));
                }
                Err(err) => {
                    warn!(model, "Chat completion failed: {err}");
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }

    /// Ask the cheapest model to title the first exchange. Any failure
    /// falls back to the default title.
    pub async fn generate_title(&self, user: &str, assistant: &str) -> String {
        let messages = [
            ChatMessage::system(TITLE_PROMPT),
            ChatMessage::user(format!("User:{user}\nAssistant:{assistant}")),
        ];
        match self.request(TITLE_MODEL, &messages, TITLE_MAX_TOKENS).await {
            Ok(reply) => {
                let title = reply.content.trim().trim_matches('"').to_string();
                if title.is_empty() {
                    DEFAULT_TITLE.to_string()
                } else {
                    title
                }
            }
            Err(err) => {
                warn!("Title generation failed: {err}");
                DEFAULT_TITLE.to_string()
            }
        }
    }

    async fn request(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<ChatMessage> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("GROQ_API_KEY is not set"))?;
        let body = RequestBody {
            messages,
            model,
            stream: false,
            temperature: 0.2,
            max_tokens,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        let json: Value = response
            .json()
            .await
            .context("Completion response was not JSON")?;
        extract_reply(&json)
    }
}

/// Pull the assistant message out of a completion payload, surfacing
/// the API's own error object when one is present.
fn extract_reply(json: &Value) -> Result<ChatMessage> {
    if !json["error"].is_null() {
        bail!("API error: {}", json["error"]);
    }
    let message = json["choices"][0]["message"]
        .as_object()
        .ok_or_else(|| anyhow!("Completion response had no choices"))?;
    let role = message
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or("assistant");
    let content = message
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Completion message had no content"))?;
    Ok(ChatMessage::new(role, content))
}

/// Millisecond-timestamp chat id; unique enough for a local store and
/// sorts newest-last lexicographically within the same digit count.
pub fn new_chat_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("chat-{millis}")
}

/// Load one conversation; a missing or malformed file starts a fresh
/// chat seeded with the system prompt.
pub fn load_chat(storage: &Storage, chat_id: &str, system_prompt: &str) -> Vec<ChatMessage> {
    let path = storage.chat_path(chat_id);
    match storage.load_json::<Vec<ChatMessage>>(&path) {
        Some(messages) if !messages.is_empty() => messages,
        _ => {
            debug!(chat_id, "Starting a fresh conversation");
            vec![ChatMessage::system(system_prompt)]
        }
    }
}

pub fn save_chat(storage: &Storage, chat_id: &str, messages: &[ChatMessage]) -> Result<()> {
    storage
        .save_json(&storage.chat_path(chat_id), &messages)
        .with_context(|| format!("Failed to save chat {chat_id}"))
}

/// The id-to-title index; absent or malformed reads as empty.
pub fn load_chat_index(storage: &Storage) -> HashMap<String, String> {
    storage
        .load_json(&storage.chat_index_path())
        .unwrap_or_default()
}

pub fn set_chat_title(storage: &Storage, chat_id: &str, title: &str) -> Result<()> {
    let mut index = load_chat_index(storage);
    index.insert(chat_id.to_string(), title.to_string());
    storage
        .save_json(&storage.chat_index_path(), &index)
        .context("Failed to save chat index")
}

/// Drop a conversation and its index entry. Each step logs its own
/// failure; a half-deleted chat heals on the next index rewrite.
pub fn delete_chat(storage: &Storage, chat_id: &str) {
    if let Err(err) = storage.remove(&storage.chat_path(chat_id)) {
        warn!(chat_id, "Could not delete chat file: {err}");
    }
    let mut index = load_chat_index(storage);
    if index.remove(chat_id).is_some() {
        if let Err(err) = storage.save_json(&storage.chat_index_path(), &index) {
            warn!(chat_id, "Could not update chat index: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_reply_reads_the_first_choice() {
        let payload = json!({
            "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
        });
        let reply = extract_reply(&payload).unwrap();
        assert_eq!(reply, ChatMessage::new("assistant", "hi there"));
    }

    #[test]
    fn extract_reply_surfaces_api_errors() {
        let payload = json!({"error": {"message": "rate limited", "code": 429}});
        let err = extract_reply(&payload).unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn extract_reply_rejects_empty_choices() {
        assert!(extract_reply(&json!({"choices": []})).is_err());
        assert!(extract_reply(&json!({})).is_err());
    }

    #[test]
    fn missing_role_defaults_to_assistant() {
        let payload = json!({"choices": [{"message": {"content": "ok"}}]});
        assert_eq!(extract_reply(&payload).unwrap().role, "assistant");
    }

    #[test]
    fn chat_ids_are_timestamped() {
        let id = new_chat_id();
        assert!(id.starts_with("chat-"));
        assert!(id["chat-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    /// Polls a future once with a no-op waker; completion must not
    /// depend on any executor or reactor.
    fn poll_ready<F: std::future::Future>(future: F) -> F::Output {
        let mut future = std::pin::pin!(future);
        let mut cx = std::task::Context::from_waker(std::task::Waker::noop());
        match future.as_mut().poll(&mut cx) {
            std::task::Poll::Ready(value) => value,
            std::task::Poll::Pending => panic!("future was not immediately ready"),
        }
    }

    #[test]
    fn completion_without_api_key_fails_before_any_io() {
        let client = ChatClient {
            endpoint: "http://127.0.0.1:0".to_string(),
            api_key: None,
            max_tokens: 16,
            http: reqwest::Client::new(),
        };
        let err = poll_ready(client.complete(&[ChatMessage::user("hi")])).unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn request_body_serializes_openai_shape() {
        let messages = [ChatMessage::user("question")];
        let body = RequestBody {
            messages: &messages,
            model: "llama3-8b-8192",
            stream: false,
            temperature: 0.2,
            max_tokens: 64,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "llama3-8b-8192");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 64);
    }
}
