use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    menu_scan::{ports::LLMClient, value_objects::ModelRequest},
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            client,
        })
    }

    fn build_request(request: ModelRequest) -> GeminiRequest {
        GeminiRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: request.system_instruction.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text {
                        text: request.patient_context,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.image.mime_type.to_string(),
                            data: request.image.data_base64,
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.2,
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema,
            }),
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                if e.is_timeout() {
                    CoreError::UpstreamError("LLM API timed out".to_string())
                } else {
                    CoreError::UpstreamError(format!("LLM API error: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::UpstreamError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::UpstreamError(format!("Failed to parse LLM response: {}", e))
        })?;

        extract_text(gemini_response)
    }
}

fn extract_text(response: GeminiResponse) -> Result<String, CoreError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::UpstreamError("No response from LLM".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        tracing::warn!(finish_reason = ?candidate.finish_reason, "Gemini returned no text");
        return Err(CoreError::UpstreamError(format!(
            "No response from LLM (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(&self, request: ModelRequest) -> Result<String, CoreError> {
        tracing::debug!(
            model = %self.model_name,
            instruction_version = request.instruction_version,
            "Sending menu analysis request"
        );

        self.call_gemini_api(Self::build_request(request)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::menu_scan::value_objects::{ImageMimeType, ImagePayload};

    fn model_request() -> ModelRequest {
        ModelRequest {
            instruction_version: "v-test",
            system_instruction: "Be precise.",
            patient_context: "PATIENT PROFILE".to_string(),
            image: ImagePayload::encode(b"abc", ImageMimeType::Webp),
            response_schema: json!({ "type": "object" }),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let wire = serde_json::to_value(GeminiLLMClient::build_request(model_request())).unwrap();

        assert_eq!(
            wire,
            json!({
                "system_instruction": { "parts": [{ "text": "Be precise." }] },
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "PATIENT PROFILE" },
                        { "inline_data": { "mime_type": "image/webp", "data": "YWJj" } }
                    ]
                }],
                "generation_config": {
                    "temperature": 0.2,
                    "response_mime_type": "application/json",
                    "response_schema": { "type": "object" }
                }
            })
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"items\":" }, { "text": "[]}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "{\"items\":[]}");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();

        assert!(matches!(
            extract_text(response),
            Err(CoreError::UpstreamError(_))
        ));
    }

    #[test]
    fn test_extract_text_blocked_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();

        assert_eq!(
            extract_text(response),
            Err(CoreError::UpstreamError(
                "No response from LLM (finish reason: SAFETY)".to_string()
            ))
        );
    }
}
