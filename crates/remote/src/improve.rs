//! Client for the OpenAI-compatible chat-completion collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::HTTP_CLIENT;
use crate::error::RemoteError;
use crate::traits::TextImprover;

/// Configuration for [`OpenAiImprover`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproveConfig {
    /// Chat-completions endpoint. Absent means no language model is
    /// configured; calls fail with [`RemoteError::MissingConfig`].
    pub api_url: Option<String>,
    /// Bearer token for the endpoint.
    pub api_key: Option<String>,
    /// Model name passed through in the payload.
    pub model: String,
}

impl Default for ImproveConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Sends `{model, messages: [system, user]}` and returns the first choice's
/// message content. The rewrite is treated as opaque: it may or may not
/// preserve placeholder tokens, and this client makes no promises either way.
#[derive(Debug, Clone)]
pub struct OpenAiImprover {
    config: ImproveConfig,
}

impl OpenAiImprover {
    pub fn new(config: ImproveConfig) -> Self {
        Self { config }
    }
}

/// Chat payload for one improve call.
fn build_payload(model: &str, system_prompt: &str, text: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": text },
        ],
    })
}

/// `choices[0].message.content` out of a chat-completion response.
fn parse_content(response: Value) -> Result<String, RemoteError> {
    response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            RemoteError::MalformedResponse("response has no choices[0].message.content".into())
        })
}

#[async_trait]
impl TextImprover for OpenAiImprover {
    async fn improve(&self, system_prompt: &str, text: &str) -> Result<String, RemoteError> {
        let url = self
            .config
            .api_url
            .as_deref()
            .ok_or_else(|| RemoteError::MissingConfig("improve api_url is not set".into()))?;
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| RemoteError::MissingConfig("improve api_key is not set".into()))?;

        let payload = build_payload(&self.config.model, system_prompt, text);
        let response = HTTP_CLIENT
            .post(url)
            .bearer_auth(key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RemoteError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| RemoteError::MalformedResponse(format!("invalid JSON response: {e}")))?;
        parse_content(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_system_and_user_roles() {
        let payload = build_payload("test-model", "Improve this.", "Hallo [NAME].");
        assert_eq!(payload["model"], "test-model");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][0]["content"], "Improve this.");
        assert_eq!(payload["messages"][1]["role"], "user");
        assert_eq!(payload["messages"][1]["content"], "Hallo [NAME].");
    }

    #[test]
    fn content_is_read_from_the_first_choice() {
        let response = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Besser." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(parse_content(response).unwrap(), "Besser.");
    }

    #[test]
    fn empty_choices_is_a_malformed_response() {
        assert!(matches!(
            parse_content(json!({ "choices": [] })),
            Err(RemoteError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_content(json!({})),
            Err(RemoteError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let improver = OpenAiImprover::new(ImproveConfig::default());
        let err = improver.improve("sys", "text").await.unwrap_err();
        assert!(matches!(err, RemoteError::MissingConfig(_)));
    }
}
