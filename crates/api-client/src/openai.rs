use crate::error::ApiError;
use crate::responses::{ChatCompletionResponse, LlmErrorResponse};
use crate::{CompletionRequest, LlmProvider};
use async_trait::async_trait;
use configuration::settings::LlmConfig;
use reqwest::Url;
use serde_json::json;
use std::time::Duration;

/// A concrete `LlmProvider` for any OpenAI-compatible `chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Builds a client from the LLM settings.
    ///
    /// # Errors
    /// `MissingCredential` when no non-blank API key is configured.
    pub fn new(config: &LlmConfig) -> Result<Self, ApiError> {
        let api_key = config
            .api_key()
            .ok_or(ApiError::MissingCredential("LLM"))?
            .to_string();

        let mut endpoint =
            Url::parse(&config.base_url).map_err(|_| ApiError::InvalidUrl(config.base_url.clone()))?;
        endpoint
            .path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(config.base_url.clone()))?
            .pop_if_empty()
            .extend(["chat", "completions"]);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ApiError> {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<LlmErrorResponse>(&text)
                .map(|error| error.error.message)
                .unwrap_or(text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidData("The completion contained no content".to_string()))
    }
}
