use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single chat message sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The two request shapes accepted for the same model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// `POST /responses`
    Responses,
    /// `POST /chat/completions`
    ChatCompletions,
}

impl CallStyle {
    /// Order in which styles are tried for each model
    pub const ORDER: [CallStyle; 2] = [CallStyle::Responses, CallStyle::ChatCompletions];

    fn endpoint(&self) -> &'static str {
        match self {
            CallStyle::Responses => "responses",
            CallStyle::ChatCompletions => "chat/completions",
        }
    }
}

impl fmt::Display for CallStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallStyle::Responses => write!(f, "responses"),
            CallStyle::ChatCompletions => write!(f, "chat completions"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to send request to OpenAI API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("OpenAI API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenAI response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("OpenAI response contained no text")]
    EmptyResponse,
}

impl ApiError {
    /// Credential failures that no other model or call style can fix
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, .. }
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN
        )
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a [Message],
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn first_choice_text(choices: &[Choice]) -> Option<String> {
    choices
        .first()
        .and_then(|c| c.message.content.clone())
        .filter(|t| !t.is_empty())
}

impl ResponsesResponse {
    fn into_text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.is_empty()) {
            return Some(text);
        }

        let joined: String = self
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect();
        if !joined.is_empty() {
            return Some(joined);
        }

        first_choice_text(&self.choices)
    }
}

/// HTTP client for the OpenAI API, created once per run and shared by every call.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, style: CallStyle) -> String {
        format!("{}/{}", self.base_url, style.endpoint())
    }

    /// Send `messages` to `model` using one call style and extract the reply text
    pub async fn complete(
        &self,
        style: CallStyle,
        model: &str,
        messages: &[Message],
    ) -> Result<String, ApiError> {
        let request = self.http.post(self.url(style)).bearer_auth(&self.api_key);
        let request = match style {
            CallStyle::Responses => request.json(&ResponsesRequest {
                model,
                input: messages,
            }),
            CallStyle::ChatCompletions => request.json(&ChatRequest { model, messages }),
        };

        let response = request.send().await.map_err(ApiError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ApiError::Status { status, body });
        }

        let text = match style {
            CallStyle::Responses => response
                .json::<ResponsesResponse>()
                .await
                .map_err(ApiError::Decode)?
                .into_text(),
            CallStyle::ChatCompletions => {
                let chat: ChatResponse = response.json().await.map_err(ApiError::Decode)?;
                first_choice_text(&chat.choices)
            }
        };

        text.ok_or(ApiError::EmptyResponse)
    }
}
