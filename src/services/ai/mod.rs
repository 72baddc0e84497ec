pub mod assistant;
pub mod booking;
pub mod gemini;
pub mod groq;
pub mod ollama;
pub mod owner;
pub mod review;
pub mod schema;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::MediationError;
use crate::models::Turn;

pub use assistant::{LlmAssistant, RestaurantAssistant};
pub use schema::OutputSchema;

/// What the caller wants back from the text service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputContract {
    /// A JSON object shaped by the given schema.
    Json(&'static OutputSchema),
    /// Free-form text.
    Text { temperature: Option<f32> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub contents: Vec<Turn>,
    pub system_instruction: Option<String>,
    pub output: OutputContract,
}

impl GenerationRequest {
    pub fn prompt(prompt: impl Into<String>, output: OutputContract) -> Self {
        Self {
            contents: vec![Turn::user(prompt)],
            system_instruction: None,
            output,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOutput {
    /// `None` when the service answered without any text.
    pub text: Option<String>,
}

impl GenerationOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationOutput, MediationError>;
}

/// OpenAI-style `messages` array shared by the chat-completion adapters. The
/// system message also carries the schema for providers lacking a native
/// structured-output mode.
pub(crate) fn chat_messages(request: &GenerationRequest, schema_hint: bool) -> Vec<Value> {
    let mut system = request.system_instruction.clone().unwrap_or_default();
    if let (true, OutputContract::Json(schema)) = (schema_hint, request.output) {
        if !system.is_empty() {
            system.push_str("\n\n");
        }
        system.push_str(&schema.prompt_hint());
    }

    let mut messages = Vec::with_capacity(request.contents.len() + 1);
    if !system.is_empty() {
        messages.push(json!({
            "role": "system",
            "content": system,
        }));
    }

    for turn in &request.contents {
        messages.push(json!({
            "role": turn.role.as_str(),
            "content": turn.text,
        }));
    }

    messages
}
