//! Pulling usable content out of chat-completion replies

use serde_json::Value;

use shared::ExtractedOrder;

use crate::error::{AdvisorError, AdvisorResult};

/// `choices[0].message.content` of a chat-completion body
pub fn message_content(body: &Value) -> AdvisorResult<String> {
    let content = body
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .ok_or_else(|| AdvisorError::MalformedReply {
            message: "No content in response".to_string(),
        })?;

    match content {
        Value::String(text) if !text.trim().is_empty() => Ok(text.clone()),
        Value::String(_) | Value::Null => Err(AdvisorError::EmptyReply),
        other => Err(AdvisorError::MalformedReply {
            message: format!("content is not text: {}", other),
        }),
    }
}

/// Drop markdown code fences the model likes to wrap JSON in
pub fn strip_code_fences(content: &str) -> String {
    content.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse an extraction reply into an order
pub fn parse_extraction(content: &str) -> AdvisorResult<ExtractedOrder> {
    let cleaned = strip_code_fences(content);
    if cleaned.is_empty() {
        return Err(AdvisorError::EmptyReply);
    }
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| AdvisorError::UnparsableJson {
        message: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(AdvisorError::UnparsableJson {
            message: "expected a JSON object".to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| AdvisorError::UnparsableJson {
        message: e.to_string(),
    })
}
