use crate::types::RawPayload;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// The model text could not be decoded into the reply contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure;

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("model output is not a JSON reply object")
    }
}

impl std::error::Error for ParseFailure {}

/// Remove markdown code fences (```json and ```), each with an optional trailing newline.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn decode_object(text: &str) -> Option<RawPayload> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Decode raw model text into a partially filled payload.
///
/// Tries the fence-stripped text first, then the span from the first `{` to
/// the last `}` to tolerate prose around the object.
pub fn parse_model_output(raw: &str) -> Result<RawPayload, ParseFailure> {
    let cleaned = strip_code_fences(raw);

    if let Some(payload) = decode_object(&cleaned) {
        return Ok(payload);
    }

    let embedded = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => decode_object(&cleaned[start..=end]),
        _ => None,
    };

    embedded.ok_or_else(|| {
        debug!(output = %cleaned, "Model output is not decodable");
        ParseFailure
    })
}
