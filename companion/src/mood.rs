//! Keyword mood classifier used when the model's answer is unusable.
//!
//! Each category carries keyword variants across the supported languages.
//! Matching is plain substring containment on the lowercased message; no
//! tokenization. Categories are checked in table order and the first match
//! wins; with no match the mood is `normal`.
//!
//! Emergency is checked first so that a self-harm cue is never shadowed by a
//! sadness or stress keyword in the same message.

use crate::language::detect_language;
use crate::types::{ClassificationResult, Mood};

/// A keyword category: its keywords and the mood they map to.
struct MoodKeywords {
    mood: Mood,
    keywords: &'static [&'static str],
}

/// Keyword categories in priority order (first match wins).
const MOOD_KEYWORDS: &[MoodKeywords] = &[
    MoodKeywords {
        mood: Mood::Emergency,
        keywords: &[
            "suicide",
            "suicidal",
            "kill myself",
            "hurt myself",
            "end my life",
            "want to die",
            "self harm",
            "self-harm",
            "आत्महत्या",
            "মৃত্যু",
            "చంపు",
            "मरायचे",
            "தற்கொலை",
            "આત્મહત્યા",
            "ಆತ್ಮಹತ್ಯೆ",
            "ആത്മഹത്യ",
            "ଆତ୍ମହତ୍ୟା",
            "ਖੁਦਕੁਸ਼ੀ",
            "আত্মহত্যা",
            "خودکشی",
        ],
    },
    MoodKeywords {
        mood: Mood::Stressed,
        keywords: &[
            "stress",
            "pressure",
            "तनाव",
            "परीक्षा",
            "চাপ",
            "ఒత్తిడి",
            "तणाव",
            "மன அழுத்தம்",
            "તાણ",
            "ಒತ್ತಡ",
            "സമ്മർദ്ദം",
            "ଚାପ",
            "ਤਣਾਅ",
        ],
    },
    MoodKeywords {
        mood: Mood::Anxious,
        keywords: &[
            "anxious",
            "worried",
            "चिंता",
            "चिंतित",
            "উদ্বিগ্ন",
            "ఆందోళన",
            "चिंतेत",
            "கவலை",
            "ચિંતા",
            "ಚಿಂತೆ",
            "ആകുലത",
            "ଚିନ୍ତା",
            "ਚਿੰਤਾ",
            "উদ্বেগ",
            "فکر",
        ],
    },
    MoodKeywords {
        mood: Mood::Depressed,
        keywords: &[
            "sad",
            "depressed",
            "उदास",
            "दुखी",
            "দুঃখিত",
            "విచారం",
            "दुःखी",
            "சோகம்",
            "ઉદાસ",
            "ದುಃಖ",
            "ദുഃഖം",
            "ଦୁଃଖ",
            "ਉਦਾਸ",
            "দুঃখী",
            "اداس",
        ],
    },
    MoodKeywords {
        mood: Mood::Happy,
        keywords: &[
            "happy",
            "good",
            "खुश",
            "अच्छा",
            "খুশি",
            "సంతోషం",
            "आनंदी",
            "மகிழ்ச்சி",
            "ખુશ",
            "ಸಂತೋಷ",
            "സന്തോഷം",
            "ଖୁସି",
            "ਖੁਸ਼",
            "আনন্দিত",
            "خوش",
        ],
    },
];

/// Classify the mood of a message by keyword; returns the mood and the emergency flag.
pub fn detect_mood(message: &str) -> (Mood, bool) {
    let lowered = message.to_lowercase();
    let mood = MOOD_KEYWORDS
        .iter()
        .find(|category| category.keywords.iter().any(|k| lowered.contains(k)))
        .map(|category| category.mood)
        .unwrap_or(Mood::Normal);
    (mood, mood == Mood::Emergency)
}

/// Full fallback classification: script-based language plus keyword mood.
pub fn classify(message: &str) -> ClassificationResult {
    let (mood, emergency) = detect_mood(message);
    ClassificationResult {
        mood,
        emergency,
        language: detect_language(message),
    }
}
