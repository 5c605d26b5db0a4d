use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{entities::app_errors::CoreError, truncate_chars},
    food_analysis::ports::{ImageGenerationRequest, LLMClient},
};

const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_base: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
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
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
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
    pub fn new(api_base: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model_name: model_name.into(),
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model_name
        )
    }

    async fn call_gemini_api(
        &self,
        credential: &str,
        request: GeminiRequest,
    ) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", credential)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the key.
                let e = e.without_url();
                tracing::error!(error = %e, "Gemini API request failed");
                CoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %truncate_chars(&error_text, ERROR_BODY_LIMIT),
                "Gemini API error"
            );
            return Err(classify_http_failure(status, &error_text));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e.without_url(), "failed to read Gemini response");
            CoreError::NoContent
        })?;

        extract_reply_text(&body)
    }
}

/// Maps a non-2xx status to the error shown to the user.
pub fn classify_http_failure(status: StatusCode, body: &str) -> CoreError {
    match status {
        StatusCode::BAD_REQUEST => CoreError::InvalidRequest,
        StatusCode::FORBIDDEN => CoreError::InvalidCredential,
        StatusCode::TOO_MANY_REQUESTS => CoreError::RateLimited,
        other => CoreError::Api {
            status: other.as_u16(),
            body: truncate_chars(body, ERROR_BODY_LIMIT).to_string(),
        },
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a success envelope.
pub fn extract_reply_text(body: &str) -> Result<String, CoreError> {
    let envelope: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, "failed to parse Gemini response envelope");
        CoreError::NoContent
    })?;

    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            tracing::error!("Gemini response carried no text");
            CoreError::NoContent
        })
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        credential: &str,
        request: ImageGenerationRequest,
    ) -> Result<String, CoreError> {
        let ImageGenerationRequest {
            prompt,
            mime_type,
            image_base64,
            settings,
        } = request;

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: image_base64,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: settings.temperature,
                top_p: settings.top_p,
                max_output_tokens: settings.max_output_tokens,
            },
        };

        tracing::debug!(model = %self.model_name, "calling Gemini");
        self.call_gemini_api(credential, request).await
    }
}
