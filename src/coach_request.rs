//! # Coach Request
//!
//! Builds the chat-completion request that carries the saved resume and a
//! recorded answer, and reads the reply. Sending the request is left to the
//! host; this module only produces and consumes JSON.
//!
//! Credentials come from [`CoachConfig`], loaded from the environment or from
//! host-supplied JSON. Nothing secret is compiled in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::console;
use crate::schema::IntakeError;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-audio-preview";
pub const NO_RESPONSE: &str = "No response received";

const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
const MODEL_VAR: &str = "COACH_MODEL";
const ENDPOINT_VAR: &str = "COACH_ENDPOINT";

const USER_PROMPT: &str = "Listen to this interview answer and provide feedback.";

/// Settings for the chat-completion call.
///
/// Only `api_key` is required when deserializing:
/// ```json
/// { "api_key": "sk-...", "model": "openai/gpt-4o-audio-preview" }
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_title")]
    pub title: String,
    /// Encoding of the recorded audio.
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_referer() -> String {
    "https://expo.dev".into()
}

fn default_title() -> String {
    "Career Coach App".into()
}

fn default_audio_format() -> String {
    "wav".into()
}

impl std::fmt::Debug for CoachConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("audio_format", &self.audio_format)
            .finish()
    }
}

impl CoachConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: default_endpoint(),
            model: default_model(),
            referer: default_referer(),
            title: default_title(),
            audio_format: default_audio_format(),
        }
    }

    /// Reads `OPENROUTER_API_KEY` (required), `COACH_MODEL` and `COACH_ENDPOINT`.
    pub fn from_env() -> Result<Self, IntakeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IntakeError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| IntakeError::Config(format!("{API_KEY_VAR} is not set")))?;

        let mut config = Self::new(api_key);
        if let Some(model) = lookup(MODEL_VAR) {
            config.model = model;
        }
        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, IntakeError> {
        let config: Self = serde_json::from_str(json)?;
        if config.api_key.trim().is_empty() {
            return Err(IntakeError::Config("api_key is empty".into()));
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAudio {
    pub data: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    InputAudio { input_audio: InputAudio },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

fn system_prompt(resume_text: &str) -> String {
    format!(
        "You are an expert career coach. Here is the user's resume for context:\n\n{resume_text}\n\nAnalyze their interview answer for confidence, pacing, filler words, and how well it aligns with their background."
    )
}

/// Build the request body for one recorded answer.
///
/// # Errors
///
/// [`IntakeError::NoResume`] when `resume_text` is blank and
/// [`IntakeError::EmptyAudio`] when there is no audio.
pub fn build_request(
    config: &CoachConfig,
    resume_text: &str,
    base64_audio: &str,
) -> Result<ChatRequest, IntakeError> {
    if resume_text.trim().is_empty() {
        return Err(IntakeError::NoResume);
    }
    if base64_audio.is_empty() {
        return Err(IntakeError::EmptyAudio);
    }
    console::log(&format!(
        "building coach request: resume {} chars, audio {} bytes (base64)",
        resume_text.chars().count(),
        base64_audio.len()
    ));

    Ok(ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: MessageContent::Text(system_prompt(resume_text)),
            },
            ChatMessage {
                role: Role::User,
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: USER_PROMPT.into(),
                    },
                    ContentPart::InputAudio {
                        input_audio: InputAudio {
                            data: base64_audio.to_string(),
                            format: config.audio_format.clone(),
                        },
                    },
                ]),
            },
        ],
    })
}

/// Headers for the outbound POST, in send order.
pub fn request_headers(config: &CoachConfig) -> Vec<(String, String)> {
    vec![
        ("Authorization".into(), format!("Bearer {}", config.api_key)),
        ("Content-Type".into(), "application/json".into()),
        ("HTTP-Referer".into(), config.referer.clone()),
        ("X-Title".into(), config.title.clone()),
    ]
}

/// Read the assistant's feedback out of a chat-completion response body.
///
/// An `error` object in the body becomes [`IntakeError::Api`]. A body with no
/// choices or no content yields [`NO_RESPONSE`].
pub fn read_response(body: &str) -> Result<String, IntakeError> {
    let data: Value = serde_json::from_str(body)?;

    if let Some(error) = data.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        console::warn(&format!("coach api error: {message}"));
        return Err(IntakeError::Api(message));
    }

    let content = data
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty());

    Ok(content.unwrap_or(NO_RESPONSE).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_from_lookup() {
        let config = CoachConfig::from_lookup(|name| match name {
            "OPENROUTER_API_KEY" => Some("sk-test".into()),
            "COACH_MODEL" => Some("openai/gpt-4o-mini".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_requires_key() {
        assert!(matches!(
            CoachConfig::from_lookup(|_| None),
            Err(IntakeError::Config(_))
        ));
        assert!(matches!(
            CoachConfig::from_lookup(|_| Some("  ".into())),
            Err(IntakeError::Config(_))
        ));
        assert!(CoachConfig::from_json(r#"{"model":"x"}"#).is_err());
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = CoachConfig::from_json(r#"{"api_key":"sk-abc"}"#).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.audio_format, "wav");
        assert!(!format!("{config:?}").contains("sk-abc"));
    }

    #[test]
    fn test_request_shape() {
        let config = CoachConfig::new("sk-test");
        let request = build_request(&config, "Led a team of \"five\"", "UklGRg==").unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], DEFAULT_MODEL);
        assert_eq!(value["messages"][0]["role"], "system");
        assert!(value["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("Led a team of \"five\""));
        assert_eq!(
            value["messages"][1]["content"],
            json!([
                { "type": "text", "text": USER_PROMPT },
                { "type": "input_audio", "input_audio": { "data": "UklGRg==", "format": "wav" } }
            ])
        );
    }

    #[test]
    fn test_request_preconditions() {
        let config = CoachConfig::new("sk-test");
        assert!(matches!(
            build_request(&config, " ", "UklGRg=="),
            Err(IntakeError::NoResume)
        ));
        assert!(matches!(
            build_request(&config, "resume", ""),
            Err(IntakeError::EmptyAudio)
        ));
    }

    #[test]
    fn test_headers() {
        let headers = request_headers(&CoachConfig::new("sk-test"));
        assert_eq!(headers[0], ("Authorization".to_string(), "Bearer sk-test".to_string()));
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn test_read_response() {
        let ok = r#"{"choices":[{"message":{"role":"assistant","content":"Slow down a bit."}}]}"#;
        assert_eq!(read_response(ok).unwrap(), "Slow down a bit.");

        assert_eq!(read_response(r#"{"choices":[]}"#).unwrap(), NO_RESPONSE);
        assert_eq!(read_response("{}").unwrap(), NO_RESPONSE);

        match read_response(r#"{"error":{"message":"Invalid API key","code":401}}"#) {
            Err(IntakeError::Api(message)) => assert_eq!(message, "Invalid API key"),
            other => panic!("unexpected: {other:?}"),
        }
        match read_response(r#"{"error":{"code":429}}"#) {
            Err(IntakeError::Api(message)) => assert_eq!(message, r#"{"code":429}"#),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(read_response("<html>"), Err(IntakeError::Json(_))));
    }
}
