use serde::{Deserialize, Serialize};

/// Outcome of one question: exactly one of answer or error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResult {
    Answer(String),
    Error(String),
}

impl ApiResult {
    pub fn answer(&self) -> Option<&str> {
        match self {
            ApiResult::Answer(text) => Some(text.as_str()),
            ApiResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResult::Answer(_) => None,
            ApiResult::Error(message) => Some(message.as_str()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResult::Error(_))
    }
}

impl From<crate::error::QaError> for ApiResult {
    fn from(err: crate::error::QaError) -> Self {
        ApiResult::Error(err.to_string())
    }
}

/// A question as typed, its display form, and what came back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub original_question: String,
    pub processed_question: String,
    pub result: ApiResult,
}

// Chat message format (OpenAI-compatible)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// Chat-completion request body
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

// Chat-completion response body, only the fields we read
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `POST /ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Reply of `POST /ask` for handled outcomes
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AskResponse {
    pub original_question: String,
    pub processed_question: String,
    pub answer: String,
    pub error: Option<String>,
}

impl From<Exchange> for AskResponse {
    fn from(exchange: Exchange) -> Self {
        let (answer, error) = match exchange.result {
            ApiResult::Answer(text) => (text, None),
            ApiResult::Error(message) => (String::new(), Some(message)),
        };
        Self {
            original_question: exchange.original_question,
            processed_question: exchange.processed_question,
            answer,
            error,
        }
    }
}
