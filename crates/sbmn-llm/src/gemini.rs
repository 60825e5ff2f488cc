//! Gemini Provider Implementation
//!
//! Provides integration with Google's Gemini `generateContent` API.

use crate::LlmError;
use sbmn_domain::traits::{ChatRole, ChatTurn, LlmProvider as LlmProviderTrait};
use serde_json::json;
use std::time::Duration;

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default timeout for Gemini requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Google Gemini API provider
pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an explicit API key
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a new Gemini provider reading the API key from an environment variable
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Authentication`] if the variable is unset or empty.
    pub fn from_env(var: &str, model: impl Into<String>) -> Result<Self, LlmError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim(), model)),
            _ => Err(LlmError::Authentication(format!(
                "Environment variable {} is not set",
                var
            ))),
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate the next model turn using the Gemini API
    pub async fn generate(&self, conversation: &[ChatTurn]) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_payload(conversation))
            .send()
            .await
            .map_err(|e| LlmError::Communication(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                400 | 404 => LlmError::InvalidRequest(text),
                401 | 403 => LlmError::Authentication(text),
                429 => LlmError::RateLimitExceeded,
                _ => LlmError::Communication(format!("Gemini API error ({}): {}", status, text)),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        extract_text(&data)
    }
}

/// Build the `generateContent` request body
fn request_payload(conversation: &[ChatTurn]) -> serde_json::Value {
    let mut contents = Vec::new();
    let mut system = Vec::new();

    for turn in conversation {
        match turn.role {
            ChatRole::System => system.push(json!({ "text": turn.text })),
            ChatRole::User => contents.push(json!({
                "role": "user",
                "parts": [{ "text": turn.text }]
            })),
            ChatRole::Model => contents.push(json!({
                "role": "model",
                "parts": [{ "text": turn.text }]
            })),
        }
    }

    let mut payload = serde_json::Map::new();
    payload.insert("contents".to_string(), json!(contents));
    if !system.is_empty() {
        payload.insert("systemInstruction".to_string(), json!({ "parts": system }));
    }
    serde_json::Value::Object(payload)
}

/// Concatenate the text parts of the first candidate
fn extract_text(data: &serde_json::Value) -> Result<String, LlmError> {
    let parts = data
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| LlmError::InvalidResponse("No candidate content in response".to_string()))?;

    Ok(parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect())
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, conversation: &[ChatTurn]) -> Result<String, Self::Error> {
        crate::block_on(GeminiProvider::generate(self, conversation))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_roles() {
        let payload = request_payload(&[
            ChatTurn::user("persona"),
            ChatTurn::model("ok"),
            ChatTurn::user("question?"),
        ]);
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "question?");
        assert!(payload.get("systemInstruction").is_none());
    }

    #[test]
    fn test_payload_system_instruction() {
        let payload = request_payload(&[ChatTurn::system("rules"), ChatTurn::user("q")]);
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "rules");
        assert_eq!(payload["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_text() {
        let data = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Si" }, { "text": "m" }] }
            }]
        });
        assert_eq!(extract_text(&data).unwrap(), "Sim");

        let empty = json!({ "candidates": [] });
        assert!(matches!(extract_text(&empty), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = GeminiProvider::from_env("SBMN_TEST_UNSET_GEMINI_KEY", DEFAULT_MODEL);
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let provider = GeminiProvider::new("key", DEFAULT_MODEL).with_base_url("http://localhost:1/");
        assert_eq!(provider.base_url, "http://localhost:1");
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        let provider = GeminiProvider::new("key", DEFAULT_MODEL).with_base_url("http://localhost:99999");
        let result = provider.generate(&[ChatTurn::user("test")]).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
