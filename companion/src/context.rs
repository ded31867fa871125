use crate::types::ConversationTurn;
use tracing::debug;

/// Instruction preamble sent ahead of every conversation.
pub const SYSTEM_PROMPT: &str = r#"You are a multilingual AI mental health support chatbot designed specifically for Indian students.
Your responsibilities:
1. Detect the user's mood and report it as exactly one of: stressed, anxious, depressed, happy, emergency, normal.
   Homesickness, financial stress, relationship issues and academic pressure map to the closest of these.
2. Respond with empathy and kindness. Never be judgmental or dismissive.
3. Provide practical support:
   - If depressed/stressed/anxious: suggest coping activities, encourage journaling, suggest counseling, and share self-help resources.
   - If normal/happy: suggest wellness activities, community interaction, or focus tools.
4. Always respond in the same language the user used. You support all Indian languages, including
   Hindi (हिंदी), English (Indian context), Bengali (বাংলা), Telugu (తెలుగు), Marathi (मराठी), Tamil (தமிழ்),
   Gujarati (ગુજરાતી), Kannada (ಕನ್ನಡ), Malayalam (മലയാളം), Odia (ଓଡ଼ିଆ), Punjabi (ਪੰਜਾਬੀ), Assamese (অসমীয়া),
   Urdu (اردو), Maithili (मैथिली), Santali (संताली), Kashmiri (कॉशुर / کٲشُر), Nepali (नेपाली), Sindhi (سنڌي),
   Dogri (डोगरी), Manipuri (ꯃꯤꯇꯩ ꯂꯣꯟ), Bodo (बड़ो) and Konkani (कोंकणी).
5. Keep responses short, warm, and human-like. Add emojis occasionally to reduce heaviness.
6. For emergencies (suicide or self-harm risk): set mood to "emergency" and emergency to true, show empathy,
   recommend contacting Indian support services immediately (iCall 9152987821, AASRA 9820466726),
   and encourage reaching out to a trusted person.
7. Maintain privacy and confidentiality.
8. Be culturally sensitive to Indian contexts, family dynamics, and educational pressures.

You are NOT a doctor. You are a supportive companion guiding Indian students towards resources and well-being.

IMPORTANT: Always respond with a single valid JSON object and nothing else:
{
  "response": "Your empathetic response here",
  "mood": "one of stressed|anxious|depressed|happy|emergency|normal",
  "emergency": false,
  "language": "ISO 639 code of the user's language, e.g. hi, en, bn, ta"
}"#;

const UNKNOWN: &str = "unknown";

/// Render prior turns, oldest first, as context lines for the prompt.
pub fn render_history(history: &[ConversationTurn]) -> String {
    history
        .iter()
        .map(|turn| {
            let language = turn
                .language
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(UNKNOWN);
            let mood = turn.mood.map(|m| m.as_str()).unwrap_or(UNKNOWN);
            format!(
                "User ({}, mood: {}): {}\nAssistant: {}",
                language, mood, turn.user, turn.assistant
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Assemble the full prompt: instruction, prior turns, then the new message.
///
/// History is never truncated, so prompt size grows linearly with the number
/// of turns the caller sends.
pub fn build_prompt(system_prompt: &str, message: &str, history: &[ConversationTurn]) -> String {
    let mut prompt = String::from(system_prompt);

    if !history.is_empty() {
        prompt.push_str("\n\nRecent conversation context:\n");
        prompt.push_str(&render_history(history));
    }

    prompt.push_str(&format!(
        "\n\nUser message: \"{}\"\n\nRespond in JSON format:",
        message
    ));

    debug!(
        turns = history.len(),
        prompt_len = prompt.len(),
        "Built conversation prompt"
    );

    prompt
}
