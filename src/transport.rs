use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{QaError, Result};
use crate::models::ChatRequest;

/// Sends one chat-completion request and hands back the raw response body.
///
/// Non-2xx statuses and connection failures are `QaError::Transport`; the
/// body is returned untouched so the caller can report it verbatim when it
/// does not have the expected shape.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_chat(&self, token: &str, req: &ChatRequest) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            timeout: cfg.timeout(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_chat(&self, token: &str, req: &ChatRequest) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, model = %req.model, "Sending chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QaError::Transport(format!(
                        "no response within {}s: {e}",
                        self.timeout.as_secs()
                    ))
                } else {
                    e.into()
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QaError::Transport(format!(
                "{status} for url ({}): {body}",
                self.endpoint
            )));
        }

        Ok(body)
    }
}
