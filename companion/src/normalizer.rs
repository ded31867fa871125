use crate::language::{normalize_language_code, DEFAULT_REPLY_LANGUAGE};
use crate::types::{Mood, RawPayload, ResponsePayload};
use serde_json::Value;

pub const DEFAULT_RESPONSE: &str =
    "मैं यहाँ आपका साथ देने के लिए हूँ। 💙 / I'm here to support you. 💙";

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn truthy_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Turn any decoded payload into a complete `ResponsePayload`.
///
/// Missing, blank or mistyped fields take defaults: the bilingual support
/// line, `normal`, `false`, `hi`. A payload whose mood is `emergency` always
/// carries `emergency = true`.
pub fn normalize(raw: RawPayload) -> ResponsePayload {
    let response =
        non_blank_string(raw.response.as_ref()).unwrap_or_else(|| DEFAULT_RESPONSE.to_string());

    let mood = non_blank_string(raw.mood.as_ref())
        .and_then(|label| label.parse::<Mood>().ok())
        .unwrap_or(Mood::Normal);

    let emergency = truthy_flag(raw.emergency.as_ref()) || mood == Mood::Emergency;

    let language = non_blank_string(raw.language.as_ref())
        .and_then(|value| normalize_language_code(&value))
        .unwrap_or_else(|| DEFAULT_REPLY_LANGUAGE.to_string());

    ResponsePayload {
        response,
        mood,
        emergency,
        language,
    }
}
