use reqwest::Client;
use tracing::debug;

use crate::config::GeminiConfig;
use crate::errors::{GeminiError, GeminiResult};
use crate::types::*;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Asks the model for a bare JSON body
const JSON_MIME_TYPE: &str = "application/json";

/// Client for interacting with the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    model: GeminiModel,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini API client
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GeminiError::ConfigError(
                    "API key is required to initialize the Gemini client".to_string(),
                )
            })?;

        let model = GeminiModel::new(api_key, config.model_name.clone());

        let client = Client::new();

        Ok(Self {
            client,
            config,
            model,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API host (used for local proxies and tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Name of the model requests are sent to
    pub fn model_name(&self) -> &str {
        &self.model.model_name
    }

    fn get_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model.model_name, self.model.api_key
        )
    }

    /// Generate content using the Gemini API
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let url = self.get_url();

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                GeminiError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(GeminiError::HttpError {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", error_body),
            });
        }

        let response_body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::ParsingError(format!("Failed to parse response: {}", e)))?;

        Ok(response_body)
    }

    /// Creates a single-turn request carrying the whole prompt as one user part,
    /// in JSON response mode.
    ///
    /// The configured system prompt is not attached here: callers that assemble
    /// their own instruction preamble send it inline with the prompt text.
    pub fn create_prompt_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(prompt.to_string())],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(self.config.temperature.unwrap_or(0.7)),
                response_mime_type: Some(JSON_MIME_TYPE.to_string()),
            }),
        }
    }

    /// Helper method to extract text from a response
    pub fn extract_text_from_response(
        &self,
        response: &GenerateContentResponse,
    ) -> GeminiResult<String> {
        let candidate = response.candidates.first().ok_or_else(|| {
            GeminiError::ResponseError("No candidates in response".to_string())
        })?;

        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| GeminiError::ResponseError("No content in candidate".to_string()))?;

        let part = content
            .parts
            .first()
            .ok_or_else(|| GeminiError::ResponseError("No parts in content".to_string()))?;

        let text = part
            .text
            .as_ref()
            .ok_or_else(|| GeminiError::ResponseError("No text in part".to_string()))?;

        Ok(text.clone())
    }

    /// Sends a prompt and returns the raw text of the first candidate
    pub async fn generate_text(&self, prompt: &str) -> GeminiResult<String> {
        let request = self.create_prompt_request(prompt);
        debug!(
            model = %self.model.model_name,
            prompt_len = prompt.len(),
            "Sending generateContent request"
        );
        let response = self.generate_content(request).await?;
        self.extract_text_from_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(matches!(
            GeminiClient::new(config_with_key(None)),
            Err(GeminiError::ConfigError(_))
        ));
        assert!(matches!(
            GeminiClient::new(config_with_key(Some("   "))),
            Err(GeminiError::ConfigError(_))
        ));
    }

    #[test]
    fn test_url_includes_model_and_key() {
        let client = GeminiClient::new(config_with_key(Some("secret")))
            .unwrap()
            .with_base_url("http://localhost:9999/models/");
        assert_eq!(
            client.get_url(),
            format!(
                "http://localhost:9999/models/{}:generateContent?key=secret",
                DEFAULT_MODEL_NAME
            )
        );
    }

    #[test]
    fn test_extract_text_from_response() {
        let client = GeminiClient::new(config_with_key(Some("secret"))).unwrap();
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"namaste"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(client.extract_text_from_response(&response).unwrap(), "namaste");

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            client.extract_text_from_response(&empty),
            Err(GeminiError::ResponseError(_))
        ));

        let no_text: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#).unwrap();
        assert!(client.extract_text_from_response(&no_text).is_err());
    }

    #[test]
    fn test_prompt_request_carries_prompt_as_user_part() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: Some("secret".to_string()),
            temperature: Some(0.2),
            ..Default::default()
        })
        .unwrap();
        let request = client.create_prompt_request("full prompt");
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].parts[0].text.as_deref(), Some("full prompt"));
        assert!(request.system_instruction.is_none());
        let generation = request.generation_config.unwrap();
        assert_eq!(generation.temperature, Some(0.2));
        assert_eq!(generation.response_mime_type.as_deref(), Some("application/json"));
    }
}
