//! Coarse language detection from Unicode script ranges.
//!
//! Rules are evaluated in table order and the first match wins. A rule
//! matches when any character of the message falls inside its letter range
//! and, if the rule lists markers, at least one marker occurs in the message.
//! Ranges cover independent vowels through consonants only, so punctuation
//! shared between scripts (the danda, digits) never decides the language.
//!
//! Scripts shared by several languages are split by marker rules placed
//! ahead of the plain script rule: Marathi before Hindi (Devanagari), and
//! Assamese before Bengali (the Assamese-only letters ৰ and ৱ). Other
//! languages written in Devanagari (Maithili, Nepali, Konkani, ...) are
//! reported as Hindi.

use std::ops::RangeInclusive;

/// Returned when no script rule matches
pub const DEFAULT_DETECTED_LANGUAGE: &str = "en";

/// Used by canned replies and by the normalizer when the language is missing
pub const DEFAULT_REPLY_LANGUAGE: &str = "hi";

/// A script rule: a letter range, optional marker strings, and the language it maps to.
struct ScriptRule {
    letters: RangeInclusive<char>,
    markers: &'static [&'static str],
    language: &'static str,
}

impl ScriptRule {
    fn matches(&self, text: &str) -> bool {
        text.chars().any(|c| self.letters.contains(&c))
            && (self.markers.is_empty() || self.markers.iter().any(|m| text.contains(m)))
    }
}

const DEVANAGARI: RangeInclusive<char> = '\u{0905}'..='\u{0939}';
const BENGALI_ASSAMESE: RangeInclusive<char> = '\u{0985}'..='\u{09B9}';

const MARATHI_MARKERS: &[&str] = &["आहे", "नाही"];
const ASSAMESE_MARKERS: &[&str] = &["ৰ", "ৱ"];

/// Script rules in priority order (first match wins).
const SCRIPT_RULES: &[ScriptRule] = &[
    ScriptRule {
        letters: DEVANAGARI,
        markers: MARATHI_MARKERS,
        language: "mr",
    },
    ScriptRule {
        letters: DEVANAGARI,
        markers: &[],
        language: "hi",
    },
    ScriptRule {
        letters: BENGALI_ASSAMESE,
        markers: ASSAMESE_MARKERS,
        language: "as",
    },
    ScriptRule {
        letters: BENGALI_ASSAMESE,
        markers: &[],
        language: "bn",
    },
    // Telugu
    ScriptRule {
        letters: '\u{0C05}'..='\u{0C39}',
        markers: &[],
        language: "te",
    },
    // Tamil
    ScriptRule {
        letters: '\u{0B85}'..='\u{0BB9}',
        markers: &[],
        language: "ta",
    },
    // Arabic letters alef..farsi yeh
    ScriptRule {
        letters: '\u{0627}'..='\u{06CC}',
        markers: &[],
        language: "ur",
    },
    // Gujarati
    ScriptRule {
        letters: '\u{0A85}'..='\u{0AB9}',
        markers: &[],
        language: "gu",
    },
    // Kannada
    ScriptRule {
        letters: '\u{0C85}'..='\u{0CB9}',
        markers: &[],
        language: "kn",
    },
    // Malayalam
    ScriptRule {
        letters: '\u{0D05}'..='\u{0D39}',
        markers: &[],
        language: "ml",
    },
    // Odia
    ScriptRule {
        letters: '\u{0B05}'..='\u{0B39}',
        markers: &[],
        language: "or",
    },
    // Gurmukhi
    ScriptRule {
        letters: '\u{0A05}'..='\u{0A39}',
        markers: &[],
        language: "pa",
    },
];

/// Detect the language of `text` from its script; `en` when nothing matches.
pub fn detect_language(text: &str) -> &'static str {
    SCRIPT_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.language)
        .unwrap_or(DEFAULT_DETECTED_LANGUAGE)
}

/// English language names a model may return instead of a code.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("hindi", "hi"),
    ("english", "en"),
    ("bengali", "bn"),
    ("bangla", "bn"),
    ("telugu", "te"),
    ("marathi", "mr"),
    ("tamil", "ta"),
    ("gujarati", "gu"),
    ("kannada", "kn"),
    ("malayalam", "ml"),
    ("odia", "or"),
    ("oriya", "or"),
    ("punjabi", "pa"),
    ("assamese", "as"),
    ("urdu", "ur"),
    ("maithili", "mai"),
    ("santali", "sat"),
    ("kashmiri", "ks"),
    ("nepali", "ne"),
    ("sindhi", "sd"),
    ("dogri", "doi"),
    ("manipuri", "mni"),
    ("bodo", "brx"),
    ("konkani", "kok"),
];

/// Lowercase and trim a language value; known English names map to their codes.
/// Returns `None` for blank input.
pub fn normalize_language_code(value: &str) -> Option<String> {
    let lowered = value.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let code = LANGUAGE_NAMES
        .iter()
        .find(|(name, _)| lowered == *name || lowered.starts_with(&format!("{} ", name)))
        .map(|(_, code)| code.to_string())
        .unwrap_or(lowered);
    Some(code)
}

/// Display names reported by the health endpoint.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "Hindi",
    "English (Indian)",
    "Bengali",
    "Telugu",
    "Marathi",
    "Tamil",
    "Gujarati",
    "Kannada",
    "Malayalam",
    "Odia",
    "Punjabi",
    "Assamese",
    "Urdu",
    "Maithili",
    "Santali",
    "Kashmiri",
    "Nepali",
    "Sindhi",
    "Dogri",
    "Manipuri",
    "Bodo",
    "Konkani",
];
