//! Chat-completions client for advice and order extraction

use std::time::Instant;

use async_trait::async_trait;
use serde_json::{Value, json};

use shared::{AdviceMode, ExtractedOrder, ProcessId, process_debug, process_warn};

use crate::config::AdvisorConfig;
use crate::core::{extraction_prompt, message_content, parse_extraction, system_role};
use crate::error::{AdvisorError, AdvisorResult};
use crate::traits::AdvisorClient;

const ADVICE_TEMPERATURE: f64 = 0.7;
const EXTRACTION_TEMPERATURE: f64 = 0.0;

/// Real client talking to an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct RealAdvisorClient {
    config: AdvisorConfig,
    http: reqwest::Client,
}

impl RealAdvisorClient {
    pub fn new(config: AdvisorConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, http }
    }

    /// Client configured from the environment
    pub fn from_env() -> Self {
        Self::new(AdvisorConfig::from_env())
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// POST one chat completion and return the reply text
    async fn complete(&self, messages: Value, temperature: f64) -> AdvisorResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;

        let request_body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": temperature
        });

        let request_start = Instant::now();
        let response = self
            .http
            .post(self.config.completions_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            process_warn!(
                ProcessId::current(),
                "⚠️ Model API returned {} after {:?}",
                status,
                request_start.elapsed()
            );
            return Err(AdvisorError::from_status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| AdvisorError::MalformedReply {
            message: format!("Failed to parse response: {}", e),
        })?;

        process_debug!(
            ProcessId::current(),
            "🤖 Model reply in {:?} ({} tokens)",
            request_start.elapsed(),
            body.get("usage")
                .and_then(|u| u.get("total_tokens"))
                .and_then(|t| t.as_u64())
                .unwrap_or(0)
        );

        message_content(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> AdvisorError {
        if e.is_timeout() {
            AdvisorError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            AdvisorError::from(e)
        }
    }
}

#[async_trait]
impl AdvisorClient for RealAdvisorClient {
    async fn strategic_advice(&self, context: &str, mode: AdviceMode) -> AdvisorResult<String> {
        let messages = json!([
            { "role": "system", "content": system_role(mode) },
            { "role": "user", "content": context }
        ]);
        self.complete(messages, ADVICE_TEMPERATURE).await
    }

    async fn extract_order(&self, text: &str) -> AdvisorResult<ExtractedOrder> {
        let messages = json!([
            { "role": "user", "content": extraction_prompt(text) }
        ]);
        let content = self.complete(messages, EXTRACTION_TEMPERATURE).await?;
        parse_extraction(&content)
    }
}
