use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{chat_messages, GenerationOutput, GenerationRequest, LlmProvider, OutputContract};
use crate::errors::MediationError;

const SERVICE: &str = "Groq";

/// Any OpenAI-compatible chat completions endpoint; Groq by default.
pub struct GroqProvider {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(api_key: String, model: String, base_url: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": chat_messages(request, true),
        });

        match request.output {
            OutputContract::Json(_) => {
                body["response_format"] = json!({ "type": "json_object" });
                body["temperature"] = json!(0.2);
            }
            OutputContract::Text {
                temperature: Some(t),
            } => body["temperature"] = json!(t),
            OutputContract::Text { temperature: None } => {}
        }

        body
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, MediationError> {
        tracing::debug!(model = %self.model, turns = request.contents.len(), "calling Groq");

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&self.request_body(request))
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
            tracing::warn!(error = %err, "Groq call failed");
            return Err(err);
        }

        let data: Value = serde_json::from_str(&raw).map_err(|e| {
            MediationError::malformed(format!("failed to parse Groq response: {e}"))
        })?;

        let text = data["choices"][0]["message"]["content"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Ok(GenerationOutput { text })
    }
}
