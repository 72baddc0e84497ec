use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{chat_messages, GenerationOutput, GenerationRequest, LlmProvider, OutputContract};
use crate::errors::MediationError;

const SERVICE: &str = "Ollama";

pub struct OllamaProvider {
    url: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(url: String, model: String, timeout: Duration) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            model,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        // Ollama enforces `format` natively, no schema hint needed.
        let mut body = json!({
            "model": self.model,
            "messages": chat_messages(request, false),
            "stream": false,
        });

        match request.output {
            OutputContract::Json(schema) => body["format"] = schema.to_json_schema(),
            OutputContract::Text {
                temperature: Some(t),
            } => body["options"] = json!({ "temperature": t }),
            OutputContract::Text { temperature: None } => {}
        }

        body
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, MediationError> {
        tracing::debug!(model = %self.model, turns = request.contents.len(), "calling Ollama");

        let resp = self
            .client
            .post(format!("{}/api/chat", self.url))
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
            tracing::warn!(error = %err, "Ollama call failed");
            return Err(err);
        }

        let data: Value = serde_json::from_str(&raw).map_err(|e| {
            MediationError::malformed(format!("failed to parse Ollama response: {e}"))
        })?;

        let text = data["message"]["content"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Ok(GenerationOutput { text })
    }
}
