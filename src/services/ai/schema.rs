//! Static output contracts for structured replies.
//!
//! Each contract renders to the schema dialects the adapters send upstream and
//! validates whatever comes back, so a reply missing a required field or carrying
//! the wrong type is rejected in one place.

use serde_json::{json, Map, Value};

use crate::errors::MediationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object(&'static [FieldSpec]),
}

impl FieldKind {
    fn gemini_type(&self) -> &'static str {
        match self {
            FieldKind::String => "STRING",
            FieldKind::Number => "NUMBER",
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Object(_) => "OBJECT",
        }
    }

    fn json_type(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object(_) => "object",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object(_) => value.is_object(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static REVIEW_ANALYSIS: OutputSchema = OutputSchema {
    name: "review_analysis",
    fields: &[
        FieldSpec {
            name: "sentiment",
            kind: FieldKind::String,
            required: true,
            description: Some("The sentiment of the review (positive, neutral, negative)"),
        },
        FieldSpec {
            name: "draft",
            kind: FieldKind::String,
            required: true,
            description: Some("A draft response to the review."),
        },
    ],
};

const BOOKING_INTENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "guestName",
        kind: FieldKind::String,
        required: false,
        description: None,
    },
    FieldSpec {
        name: "partySize",
        kind: FieldKind::Number,
        required: false,
        description: None,
    },
    FieldSpec {
        name: "date",
        kind: FieldKind::String,
        required: false,
        description: None,
    },
    FieldSpec {
        name: "time",
        kind: FieldKind::String,
        required: false,
        description: None,
    },
    FieldSpec {
        name: "specialRequests",
        kind: FieldKind::String,
        required: false,
        description: None,
    },
    FieldSpec {
        name: "isComplete",
        kind: FieldKind::Boolean,
        required: true,
        description: None,
    },
];

pub static BOOKING_TURN: OutputSchema = OutputSchema {
    name: "booking_turn",
    fields: &[
        FieldSpec {
            name: "reply",
            kind: FieldKind::String,
            required: true,
            description: Some("The polite conversational response to the guest."),
        },
        FieldSpec {
            name: "intent",
            kind: FieldKind::Object(BOOKING_INTENT_FIELDS),
            required: true,
            description: None,
        },
    ],
};

impl OutputSchema {
    /// Gemini `responseSchema` dialect.
    pub fn to_gemini_schema(&self) -> Value {
        object_schema(self.fields, FieldKind::gemini_type)
    }

    /// Plain JSON Schema, as accepted by Ollama's `format`.
    pub fn to_json_schema(&self) -> Value {
        object_schema(self.fields, FieldKind::json_type)
    }

    pub fn prompt_hint(&self) -> String {
        format!(
            "Respond with only a JSON object (no markdown, no explanation) \
             matching this JSON Schema:\n{}",
            self.to_json_schema()
        )
    }

    pub fn validate(&self, value: &Value) -> Result<(), MediationError> {
        let obj = value.as_object().ok_or_else(|| {
            MediationError::malformed(format!("{}: expected a JSON object", self.name))
        })?;
        validate_fields(self.name, "", self.fields, obj)
    }

    /// Extracts and validates the JSON object in a raw reply.
    pub fn parse(&self, raw: &str) -> Result<Value, MediationError> {
        let value = extract_json_object(raw).ok_or_else(|| {
            MediationError::malformed(format!("{}: reply is not a JSON object", self.name))
        })?;
        self.validate(&value)?;
        Ok(value)
    }
}

fn object_schema(fields: &[FieldSpec], type_name: fn(&FieldKind) -> &'static str) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        let mut prop = match field.kind {
            FieldKind::Object(nested) => object_schema(nested, type_name),
            kind => json!({ "type": type_name(&kind) }),
        };
        if let Some(desc) = field.description {
            prop["description"] = json!(desc);
        }
        properties.insert(field.name.to_string(), prop);
        if field.required {
            required.push(field.name);
        }
    }

    json!({
        "type": type_name(&FieldKind::Object(&[])),
        "properties": properties,
        "required": required,
    })
}

fn validate_fields(
    schema: &str,
    prefix: &str,
    fields: &[FieldSpec],
    obj: &Map<String, Value>,
) -> Result<(), MediationError> {
    for field in fields {
        let path = format!("{prefix}{}", field.name);
        match obj.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(MediationError::malformed(format!(
                        "{schema}: missing required field `{path}`"
                    )));
                }
            }
            Some(value) if !field.kind.matches(value) => {
                return Err(MediationError::malformed(format!(
                    "{schema}: field `{path}` should be {}",
                    field.kind.json_type()
                )));
            }
            Some(value) => {
                if let (FieldKind::Object(nested), Some(inner)) = (field.kind, value.as_object()) {
                    validate_fields(schema, &format!("{path}."), nested, inner)?;
                }
            }
        }
    }
    Ok(())
}

/// Models without a native JSON mode wrap objects in code fences or prose.
fn extract_json_object(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    let cleaned = strip_code_fence(trimmed);
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(cleaned) {
        return Some(value);
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

/// Removes one wrapping markdown fence (with or without a language tag).
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening line, if any.
    match body.split_once('\n') {
        Some((tag, inner)) if !tag.trim().contains(' ') => inner.trim(),
        _ => body.trim(),
    }
}
