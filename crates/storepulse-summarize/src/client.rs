//! Text-summarization collaborator: the OpenAI-backed client and a mock used
//! when no key is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use storepulse_core::{Error, Result};
use tracing::debug;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[async_trait]
pub trait SummarizeClient: Send + Sync {
    /// Run one non-streaming completion and return the raw text, which is
    /// expected (but not guaranteed) to parse as JSON.
    async fn complete(&self, system: &str, prompt: &str, temperature: f64) -> Result<String>;
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl SummarizeClient for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str, temperature: f64) -> Result<String> {
        debug!(model = %self.model, "requesting completion");

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "temperature": temperature,
            "response_format": {"type": "json_object"},
        });

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("completion request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "completion returned status {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("malformed completion body: {e}")))?;

        Ok(data["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("{}")
            .to_string())
    }
}

/// Canned analysis so the dashboard works without a key. The response carries
/// the macro-analysis keys; orchestrators expecting other shapes simply fall
/// back to their empty defaults.
pub struct MockSummarizeClient;

#[async_trait]
impl SummarizeClient for MockSummarizeClient {
    async fn complete(&self, _system: &str, _prompt: &str, _temperature: f64) -> Result<String> {
        Ok(json!({
            "strengths": [
                "Fast and attentive service",
                "Good variety of sporting goods",
                "Organized and clean environment",
            ],
            "weaknesses": [
                "Stock shortages in some sizes",
                "Checkout lines at peak hours",
                "Prices could be more competitive",
            ],
            "trends": [
                "Customers value personalized service",
                "Dissatisfaction tied to product availability",
            ],
            "opportunities": [
                "Offer online reservation for pickup",
                "Extend opening hours",
                "Make the loyalty program more visible",
            ],
        })
        .to_string())
    }
}

/// Strip ```json fences that models sometimes wrap around the payload.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(strip_json_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```\n{}\n```"), "{}");
    }

    #[tokio::test]
    async fn test_mock_client_returns_parseable_json() {
        let raw = MockSummarizeClient.complete("s", "p", 0.7).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["strengths"].is_array());
    }
}
