use async_trait::async_trait;
use std::sync::Arc;

use crate::client::ChatClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ApiResult, Exchange};
use crate::normalize::normalize;

/// Anything that can turn a question into an [`ApiResult`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionAnswering: Send + Sync {
    async fn answer(&self, question: &str) -> ApiResult;
}

/// Shared entry point for the CLI and the web form
#[derive(Clone)]
pub struct QaService {
    answerer: Arc<dyn QuestionAnswering>,
}

impl QaService {
    pub fn new(answerer: Arc<dyn QuestionAnswering>) -> Self {
        Self { answerer }
    }

    /// Build the service backed by the configured chat-completion endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ChatClient::new(&config.api)?;
        tracing::info!(model = %client.model(), "Question answering service ready");
        Ok(Self::new(Arc::new(client)))
    }

    /// Send the question as typed
    pub async fn answer(&self, question: &str) -> ApiResult {
        self.answerer.answer(question).await
    }

    /// Normalize for display, then answer the original question
    pub async fn ask(&self, question: &str) -> Exchange {
        let processed_question = normalize(question);
        tracing::debug!(processed = %processed_question, "Asking question");

        let result = self.answer(question).await;
        Exchange {
            original_question: question.to_string(),
            processed_question,
            result,
        }
    }
}
