use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use super::prompt::{build_instruct_prompt, END_OF_TURN};
use super::{LlmProvider, Message, ModelError};

/// Text-generation endpoint of a hosted inference API
/// (`{"inputs", "parameters"}` in, `[{"generated_text"}]` out).
pub struct HostedInferenceProvider {
    url: String,
    api_token: String,
    max_new_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl HostedInferenceProvider {
    pub fn new(
        url: String,
        api_token: String,
        timeout: Duration,
        max_new_tokens: u32,
        temperature: f32,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url,
            api_token,
            max_new_tokens,
            temperature,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for HostedInferenceProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> Result<String, ModelError> {
        let body = json!({
            "inputs": build_instruct_prompt(system_prompt, messages),
            "parameters": {
                "max_new_tokens": self.max_new_tokens,
                "temperature": self.temperature,
                "return_full_text": false,
            },
        });

        let mut request = self.client.post(&self.url).json(&body);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("model endpoint rate limited");
            return Err(ModelError::RateLimited);
        }
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "model endpoint returned error status");
            return Err(ModelError::Status(status.as_u16()));
        }

        let data: serde_json::Value = resp.json().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to decode model response");
            ModelError::Malformed
        })?;

        extract_generated_text(&data).ok_or(ModelError::Malformed)
    }
}

fn extract_generated_text(data: &serde_json::Value) -> Option<String> {
    let text = data
        .get(0)
        .and_then(|first| first.get("generated_text"))
        .or_else(|| data.get("generated_text"))
        .and_then(|v| v.as_str())?;

    Some(text.replace(END_OF_TURN, "").trim().to_string())
}
