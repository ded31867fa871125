use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Emotional-state label attached to a message or reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Stressed,
    Anxious,
    Depressed,
    Happy,
    Emergency,
    Normal,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Stressed,
        Mood::Anxious,
        Mood::Depressed,
        Mood::Happy,
        Mood::Emergency,
        Mood::Normal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Stressed => "stressed",
            Mood::Anxious => "anxious",
            Mood::Depressed => "depressed",
            Mood::Happy => "happy",
            Mood::Emergency => "emergency",
            Mood::Normal => "normal",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mood label: {}", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    /// Case-insensitive; accepts the labels models tend to produce besides the canonical ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase().replace(['_', '-'], " ");
        let mood = match label.as_str() {
            "stressed" | "stress" | "academic pressure" | "financial stress" | "overwhelmed" => {
                Mood::Stressed
            }
            "anxious" | "anxiety" | "worried" | "nervous" => Mood::Anxious,
            "depressed" | "depression" | "sad" | "lonely" | "homesick" => Mood::Depressed,
            "happy" | "joyful" | "positive" | "excited" => Mood::Happy,
            "emergency" | "suicidal" | "crisis" | "self harm" => Mood::Emergency,
            "normal" | "neutral" | "calm" | "okay" | "ok" => Mood::Normal,
            _ => return Err(UnknownMood(s.to_string())),
        };
        Ok(mood)
    }
}

/// One prior exchange, supplied by the caller with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    #[serde(default, alias = "userText")]
    pub user: String,
    #[serde(default, alias = "assistantText")]
    pub assistant: String,
    #[serde(default, deserialize_with = "lenient_mood")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Unknown labels in caller-supplied history are dropped rather than rejected.
fn lenient_mood<'de, D>(deserializer: D) -> Result<Option<Mood>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|label| label.parse().ok()))
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// The reply contract: every exit path produces all four fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub response: String,
    pub mood: Mood,
    pub emergency: bool,
    pub language: String,
}

impl ResponsePayload {
    /// Static bilingual payload with a neutral mood, used by the boundary's canned replies
    pub fn notice(response: &str) -> Self {
        Self {
            response: response.to_string(),
            mood: Mood::Normal,
            emergency: false,
            language: crate::language::DEFAULT_REPLY_LANGUAGE.to_string(),
        }
    }
}

/// Fallback classification of a message; a pure function of its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub mood: Mood,
    pub emergency: bool,
    pub language: &'static str,
}

/// Leniently decoded model output; the normalizer turns it into a `ResponsePayload`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub mood: Option<Value>,
    #[serde(default)]
    pub emergency: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
}

impl From<ResponsePayload> for RawPayload {
    fn from(payload: ResponsePayload) -> Self {
        Self {
            response: Some(Value::String(payload.response)),
            mood: Some(Value::String(payload.mood.to_string())),
            emergency: Some(Value::Bool(payload.emergency)),
            language: Some(Value::String(payload.language)),
        }
    }
}

/// Why the fallback chain produced the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    ParseFailure,
    CallFailed,
    TimedOut,
}

/// Which path of the pipeline produced the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Generated,
    Fallback(FallbackReason),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mood_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Mood::Emergency).unwrap(), json!("emergency"));
        let mood: Mood = serde_json::from_value(json!("anxious")).unwrap();
        assert_eq!(mood, Mood::Anxious);
    }

    #[test]
    fn test_mood_from_str_accepts_synonyms() {
        assert_eq!("Stressed".parse::<Mood>().unwrap(), Mood::Stressed);
        assert_eq!("academic_pressure".parse::<Mood>().unwrap(), Mood::Stressed);
        assert_eq!(" SAD ".parse::<Mood>().unwrap(), Mood::Depressed);
        assert_eq!("self-harm".parse::<Mood>().unwrap(), Mood::Emergency);
        assert!("relationship issues".parse::<Mood>().is_err());
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn test_chat_request_defaults() {
        let request: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.message.is_none());
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn test_history_turn_is_lenient() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "hi",
            "conversationHistory": [
                {"user": "hello", "assistant": "hey", "mood": "happy", "language": "en"},
                {"userText": "kaise ho", "assistantText": "theek", "mood": "curious"},
                {"user": "only user"}
            ]
        }))
        .unwrap();

        let history = request.conversation_history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].mood, Some(Mood::Happy));
        assert_eq!(history[1].user, "kaise ho");
        assert_eq!(history[1].mood, None);
        assert_eq!(history[2].assistant, "");
        assert_eq!(history[2].language, None);
    }
}
