use crate::config::AppConfig;
use crate::context::build_prompt;
use crate::llm_client::{self, GenerationError, ResponseGenerator};
use crate::mood::{classify, detect_mood};
use crate::normalizer::normalize;
use crate::parser::parse_model_output;
use crate::templates::{compose_fallback, resolve_template};
use crate::types::{ChatRequest, FallbackReason, Mood, RawPayload, ReplySource, ResponsePayload};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Requests rejected before the model is called
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is missing or empty")]
    MissingMessage,

    #[error("generative backend is not configured")]
    NotConfigured,
}

/// A normalized reply and the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub payload: ResponsePayload,
    pub source: ReplySource,
}

/// Deterministic reply built from the user's own message.
pub fn fallback_reply(message: &str) -> ResponsePayload {
    let classification = classify(message);
    debug!(
        mood = %classification.mood,
        emergency = classification.emergency,
        language = classification.language,
        "Fallback classification"
    );
    compose_fallback(&classification)
}

/// Number every emergency reply must carry
const CRISIS_HELPLINE: &str = "9152987821";

/// Self-harm keywords in the user's message override the model's mood.
fn enforce_emergency(payload: &mut ResponsePayload, message: &str) {
    let (mood, _) = detect_mood(message);
    if mood != Mood::Emergency {
        return;
    }
    if payload.mood != Mood::Emergency || !payload.emergency {
        warn!(model_mood = %payload.mood, "Emergency keywords override model classification");
    }
    payload.mood = Mood::Emergency;
    payload.emergency = true;
    if !payload.response.contains(CRISIS_HELPLINE) {
        payload.response = resolve_template(Mood::Emergency, &payload.language).to_string();
    }
}

/// Run one chat request through the pipeline.
///
/// Validation and configuration problems are returned as errors; every
/// failure after that point (call error, timeout, undecodable output) is
/// answered by the fallback chain.
pub async fn process_chat(
    config: &AppConfig,
    generator: Option<&dyn ResponseGenerator>,
    request: ChatRequest,
) -> Result<ChatReply, ChatError> {
    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(ChatError::MissingMessage)?;

    let generator = generator.ok_or(ChatError::NotConfigured)?;

    let prompt = build_prompt(config.system_prompt(), message, &request.conversation_history);

    let (raw, source) =
        match llm_client::generate_response(generator, &prompt, config.request_timeout()).await {
            Ok(text) => {
                debug!(raw = %text, "Model response received");
                match parse_model_output(&text) {
                    Ok(raw) => (raw, ReplySource::Generated),
                    Err(e) => {
                        warn!(error = %e, "Falling back to keyword reply");
                        (
                            RawPayload::from(fallback_reply(message)),
                            ReplySource::Fallback(FallbackReason::ParseFailure),
                        )
                    }
                }
            }
            Err(GenerationError::Timeout(after)) => {
                warn!(timeout = ?after, "Model call timed out, using keyword reply");
                (
                    RawPayload::from(fallback_reply(message)),
                    ReplySource::Fallback(FallbackReason::TimedOut),
                )
            }
            Err(e) => {
                warn!(error = %e, "Model call failed, using keyword reply");
                (
                    RawPayload::from(fallback_reply(message)),
                    ReplySource::Fallback(FallbackReason::CallFailed),
                )
            }
        };

    let mut payload = normalize(raw);
    enforce_emergency(&mut payload, message);

    info!(
        mood = %payload.mood,
        emergency = payload.emergency,
        language = %payload.language,
        source = ?source,
        "Chat reply ready"
    );

    Ok(ChatReply { payload, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConversationTurn, Mood};
    use async_trait::async_trait;
    use mindcare_core::errors::GeminiError;
    use std::sync::Mutex;
    use std::time::Duration;

    enum Behaviour {
        Reply(&'static str),
        Unavailable,
        Hang,
    }

    struct StubGenerator {
        behaviour: Behaviour,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResponseGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.behaviour {
                Behaviour::Reply(text) => Ok(text.to_string()),
                Behaviour::Unavailable => Err(GeminiError::RequestError(
                    "connection refused".to_string(),
                )
                .into()),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: Some(message.to_string()),
            conversation_history: Vec::new(),
        }
    }

    fn assert_contract(payload: &ResponsePayload) {
        assert!(!payload.response.trim().is_empty());
        assert!(Mood::ALL.contains(&payload.mood));
        assert!(!payload.language.trim().is_empty());
    }

    #[tokio::test]
    async fn test_generated_reply_is_used() {
        let generator = StubGenerator::new(Behaviour::Reply(
            "```json\n{\"response\":\"Keep going!\",\"mood\":\"happy\",\"emergency\":false,\"language\":\"en\"}\n```",
        ));
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("I passed my exam"))
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Generated);
        assert_eq!(reply.payload.response, "Keep going!");
        assert_eq!(reply.payload.mood, Mood::Happy);
        assert_eq!(reply.payload.language, "en");
    }

    #[tokio::test]
    async fn test_hindi_stress_with_backend_unavailable() {
        let generator = StubGenerator::new(Behaviour::Unavailable);
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("मुझे बहुत तनाव है"))
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Fallback(FallbackReason::CallFailed));
        assert_eq!(reply.payload.mood, Mood::Stressed);
        assert_eq!(reply.payload.language, "hi");
        assert!(!reply.payload.emergency);
        assert_contract(&reply.payload);
    }

    #[tokio::test]
    async fn test_self_harm_message_is_emergency() {
        let generator = StubGenerator::new(Behaviour::Unavailable);
        let reply = process_chat(
            &AppConfig::default(),
            Some(&generator),
            request("I am sad and I want to kill myself"),
        )
        .await
        .unwrap();

        assert_eq!(reply.payload.mood, Mood::Emergency);
        assert!(reply.payload.emergency);
        assert!(reply.payload.response.contains("9152987821"));
    }

    #[tokio::test]
    async fn test_self_harm_keywords_override_generated_mood() {
        let generator = StubGenerator::new(Behaviour::Reply(
            "{\"response\":\"That sounds hard.\",\"mood\":\"depressed\",\"emergency\":false,\"language\":\"en\"}",
        ));
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("I want to kill myself"))
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Generated);
        assert_eq!(reply.payload.mood, Mood::Emergency);
        assert!(reply.payload.emergency);
        assert_eq!(reply.payload.language, "en");
        assert!(reply.payload.response.contains("9152987821"));
    }

    #[tokio::test]
    async fn test_generated_emergency_text_with_helpline_is_kept() {
        let generator = StubGenerator::new(Behaviour::Reply(
            "{\"response\":\"Please call iCall at 9152987821 now.\",\"mood\":\"sad\",\"language\":\"en\"}",
        ));
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("I want to die"))
            .await
            .unwrap();

        assert_eq!(reply.payload.mood, Mood::Emergency);
        assert!(reply.payload.emergency);
        assert_eq!(reply.payload.response, "Please call iCall at 9152987821 now.");
    }

    #[tokio::test]
    async fn test_fenced_invalid_output_falls_back_on_user_message() {
        let generator = StubGenerator::new(Behaviour::Reply(
            "```json\n{\"response\": \"oops\", \"mood\": happy,,}\n```",
        ));
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("I feel so anxious"))
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Fallback(FallbackReason::ParseFailure));
        assert_eq!(reply.payload.mood, Mood::Anxious);
        assert_eq!(reply.payload.language, "en");
        assert_contract(&reply.payload);
    }

    #[tokio::test]
    async fn test_plain_english_without_keywords() {
        let generator = StubGenerator::new(Behaviour::Unavailable);
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("Tell me about the library"))
            .await
            .unwrap();

        assert_eq!(reply.payload.mood, Mood::Normal);
        assert_eq!(reply.payload.language, "en");
        assert!(!reply.payload.emergency);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_routes_to_fallback() {
        let generator = StubGenerator::new(Behaviour::Hang);
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("exam stress"))
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Fallback(FallbackReason::TimedOut));
        assert_eq!(reply.payload.mood, Mood::Stressed);
    }

    #[tokio::test]
    async fn test_partial_model_output_is_normalized() {
        let generator = StubGenerator::new(Behaviour::Reply("{\"mood\": \"suicidal\"}"));
        let reply = process_chat(&AppConfig::default(), Some(&generator), request("hello"))
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Generated);
        assert_eq!(reply.payload.mood, Mood::Emergency);
        assert!(reply.payload.emergency);
        assert_eq!(reply.payload.language, "hi");
        assert_contract(&reply.payload);
    }

    #[tokio::test]
    async fn test_missing_message_is_rejected_before_call() {
        let generator = StubGenerator::new(Behaviour::Unavailable);
        let empty = ChatRequest::default();
        let blank = request("   ");

        assert_eq!(
            process_chat(&AppConfig::default(), Some(&generator), empty).await,
            Err(ChatError::MissingMessage)
        );
        assert_eq!(
            process_chat(&AppConfig::default(), Some(&generator), blank).await,
            Err(ChatError::MissingMessage)
        );
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_generator_is_configuration_error() {
        let result = process_chat(&AppConfig::default(), None, request("hello")).await;
        assert_eq!(result, Err(ChatError::NotConfigured));
    }

    #[tokio::test]
    async fn test_history_reaches_prompt() {
        let generator = StubGenerator::new(Behaviour::Unavailable);
        let mut chat = request("and today?");
        chat.conversation_history.push(ConversationTurn {
            user: "yesterday was hard".to_string(),
            assistant: "I'm sorry to hear that".to_string(),
            mood: Some(Mood::Depressed),
            language: Some("en".to_string()),
        });

        process_chat(&AppConfig::default(), Some(&generator), chat)
            .await
            .unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("User (en, mood: depressed): yesterday was hard"));
        assert!(prompts[0].contains("User message: \"and today?\""));
    }

    #[tokio::test]
    async fn test_fallback_is_deterministic() {
        let generator = StubGenerator::new(Behaviour::Unavailable);
        let first = process_chat(&AppConfig::default(), Some(&generator), request("আমি খুব খুশি"))
            .await
            .unwrap();
        let second = process_chat(&AppConfig::default(), Some(&generator), request("আমি খুব খুশি"))
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.payload.mood, Mood::Happy);
        assert_eq!(first.payload.language, "bn");
    }
}
