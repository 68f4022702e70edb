use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::{QaError, Result};
use crate::models::{ApiResult, ChatMessage, ChatRequest, ChatResponse};
use crate::service::QuestionAnswering;
use crate::transport::{HttpTransport, Transport};

/// Client for a single-turn chat completion
pub struct ChatClient {
    tx: Arc<dyn Transport>,
    token: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(cfg)?);
        Ok(Self::with_transport(transport, cfg))
    }

    pub fn with_transport(tx: Arc<dyn Transport>, cfg: &ApiConfig) -> Self {
        Self {
            tx,
            token: cfg.credential().map(str::to_string),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model one question. Never fails: problems come back as
    /// `ApiResult::Error`.
    pub async fn query(&self, question: &str) -> ApiResult {
        match self.try_query(question).await {
            Ok(answer) => {
                tracing::info!(chars = answer.len(), "Received answer");
                ApiResult::Answer(answer)
            }
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                e.into()
            }
        }
    }

    async fn try_query(&self, question: &str) -> Result<String> {
        let token = self.token.as_deref().ok_or(QaError::MissingCredential)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(question)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let body = self.tx.post_chat(token, &request).await?;
        extract_answer(&body)
    }
}

#[async_trait]
impl QuestionAnswering for ChatClient {
    async fn answer(&self, question: &str) -> ApiResult {
        self.query(question).await
    }
}

/// First choice's message content, trimmed
fn extract_answer(body: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|_| QaError::Format(body.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| QaError::Format(body.to_string()))
}
