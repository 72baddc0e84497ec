use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{GenerationOutput, GenerationRequest, LlmProvider, OutputContract};
use crate::errors::MediationError;
use crate::models::TurnRole;

const SERVICE: &str = "Gemini";

pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, base_url: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(request: &GenerationRequest) -> Value {
        let contents: Vec<Value> = request
            .contents
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    TurnRole::User => "user",
                    TurnRole::Assistant => "model",
                };
                json!({
                    "role": role,
                    "parts": [{ "text": turn.text }],
                })
            })
            .collect();

        let generation_config = match request.output {
            OutputContract::Json(schema) => json!({
                "responseMimeType": "application/json",
                "responseSchema": schema.to_gemini_schema(),
            }),
            OutputContract::Text {
                temperature: Some(t),
            } => json!({ "temperature": t }),
            OutputContract::Text { temperature: None } => json!({}),
        };

        let mut body = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });

        if let Some(system) = &request.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        body
    }
}

/// Joins the text parts of the first candidate. No candidate, or no text in
/// it, is an empty answer rather than an error.
fn candidate_text(data: &Value) -> Option<String> {
    let parts = data["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, MediationError> {
        tracing::debug!(model = %self.model, turns = request.contents.len(), "calling Gemini");

        let resp = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&Self::request_body(request))
            .send()
            .await
            .map_err(|e| MediationError::from_transport(SERVICE, e))?;

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| MediationError::from_transport(SERVICE, e))?;

        if !status.is_success() {
            let err = MediationError::from_status(SERVICE, status, &raw);
            tracing::warn!(error = %err, "Gemini call failed");
            return Err(err);
        }

        let data: Value = serde_json::from_str(&raw).map_err(|e| {
            MediationError::malformed(format!("failed to parse Gemini response: {e}"))
        })?;

        Ok(GenerationOutput {
            text: candidate_text(&data),
        })
    }
}
