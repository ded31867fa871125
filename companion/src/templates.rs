//! Multilingual reply templates for the fallback chain.
//!
//! Lookup order in [`resolve_template`]:
//! 1. the mood's template in the requested language,
//! 2. the mood's language-neutral default,
//! 3. the `normal` template in the requested language,
//! 4. the `normal` default.

use crate::types::{ClassificationResult, Mood, ResponsePayload};

/// Templates for one mood: per-language text plus a language-neutral default.
struct MoodTemplates {
    mood: Mood,
    by_language: &'static [(&'static str, &'static str)],
    default: &'static str,
}

impl MoodTemplates {
    fn for_language(&self, language: &str) -> Option<&'static str> {
        self.by_language
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(_, text)| *text)
    }
}

const TEMPLATES: &[MoodTemplates] = &[
    MoodTemplates {
        mood: Mood::Stressed,
        by_language: &[
            ("hi", "मैं समझ सकता हूँ कि आप तनाव में हैं। यह बिल्कुल सामान्य है। गहरी सांस लें और याद रखें कि यह समय भी गुजर जाएगा। आप जितना सोचते हैं उससे कहीं मजबूत हैं। 💙 क्या आपने कोई विश्राम तकनीक आजमाई है?"),
            ("en", "I can sense you're feeling stressed. That's completely understandable for students. Remember to take deep breaths and know that this feeling will pass. You're stronger than you think. 💙 Have you tried any relaxation techniques?"),
            ("bn", "আমি বুঝতে পারছি আপনি চাপে আছেন। এটা একদম স্বাভাবিক। গভীর শ্বাস নিন এবং মনে রাখবেন এই অনুভূতি কেটে যাবে। আপনি যতটা ভাবেন তার চেয়ে অনেক শক্তিশালী। 💙"),
            ("te", "మీరు ఒత్తిడిలో ఉన్నారని నేను అర్థం చేసుకోగలుగుతున్నాను. ఇది పూర్తిగా అర్థమయ్యే విషయం. లోతుగా శ్వాస తీసుకోండి మరియు ఈ అనుభవం గడిచిపోతుందని గుర్తుంచుకోండి. మీరు అనుకున్నదానికంటే చాలా బలంగా ఉన్నారు. 💙"),
            ("mr", "तुम्ही तणावात आहात हे मला समजते. हे अगदी स्वाभाविक आहे. दीर्घ श्वास घ्या आणि लक्षात ठेवा की ही वेळही निघून जाईल. तुम्हाला वाटते त्यापेक्षा तुम्ही खूप खंबीर आहात. 💙"),
            ("ta", "நீங்கள் மன அழுத்தத்தில் இருப்பதை நான் புரிந்துகொள்கிறேன். இது முற்றிலும் இயல்பானது. ஆழமாக மூச்சு விடுங்கள், இந்த உணர்வு கடந்து போகும் என்பதை நினைவில் கொள்ளுங்கள். நீங்கள் நினைப்பதை விட வலிமையானவர். 💙"),
        ],
        default: "I can sense you're feeling stressed. Take deep breaths. You're stronger than you think. 💙",
    },
    MoodTemplates {
        mood: Mood::Anxious,
        by_language: &[
            ("hi", "चिंता बहुत परेशान करने वाली हो सकती है, लेकिन आप इसमें अकेले नहीं हैं। अपनी सांस पर ध्यान दें - 4 तक सांस लें, 4 तक रोकें, 4 तक छोड़ें। अभी आप सुरक्षित हैं। 🫂 क्या आप बताना चाहेंगे कि किस बात की चिंता हो रही है?"),
            ("en", "Anxiety can be overwhelming, but you're not alone in this. Try to focus on your breathing - in for 4, hold for 4, out for 4. You're safe right now. 🫂 Would you like to talk about what's causing the anxiety?"),
            ("bn", "উদ্বেগ খুবই কষ্টকর হতে পারে, কিন্তু আপনি এতে একা নন। আপনার শ্বাসের উপর মনোযোগ দিন - ৪ পর্যন্ত নিশ্বাস নিন, ৪ পর্যন্ত ধরে রাখুন, ৪ পর্যন্ত ছাড়ুন। এখন আপনি নিরাপদ। 🫂"),
        ],
        default: "Anxiety can be overwhelming, but you're not alone. Focus on your breathing. You're safe right now. 🫂",
    },
    MoodTemplates {
        mood: Mood::Depressed,
        by_language: &[
            ("hi", "मैं आपकी बात सुन रहा हूँ, और मैं चाहता हूँ कि आप जानें कि आपकी भावनाएं सही हैं। अंधेरे क्षणों में भी उम्मीद होती है। आपका महत्व है, और मदद मांगना अविश्वसनीय साहस दिखाता है। 💙 क्या आप किसी भरोसेमंद व्यक्ति से बात कर पाए हैं?"),
            ("en", "I hear you, and I want you to know that your feelings are valid. Even in dark moments, there's hope. You matter, and reaching out shows incredible strength. 💙 Have you been able to talk to someone you trust?"),
            ("bn", "আমি আপনার কথা শুনছি, এবং আমি চাই আপনি জানুন যে আপনার অনুভূতিগুলো সঠিক। অন্ধকার মুহূর্তেও আশা আছে। আপনি গুরুত্বপূর্ণ। 💙"),
        ],
        default: "I hear you. Your feelings are valid. Even in dark moments, there's hope. You matter. 💙",
    },
    MoodTemplates {
        mood: Mood::Happy,
        by_language: &[
            ("hi", "यह सुनकर बहुत अच्छा लगा कि आप अच्छा महसूस कर रहे हैं! 😊 ये सकारात्मक क्षण बहुत महत्वपूर्ण हैं। आज आपके लिए क्या अच्छा रहा है?"),
            ("en", "It's wonderful to hear you're feeling good! 😊 Those positive moments are so important. What's been going well for you today?"),
            ("bn", "আপনি ভালো অনুভব করছেন শুনে খুব ভালো লাগল! 😊 এই ইতিবাচক মুহূর্তগুলো খুবই গুরুত্বপূর্ণ। আজ আপনার জন্য কী ভালো হয়েছে?"),
        ],
        default: "It's wonderful to hear you're feeling good! 😊 What's been going well for you today?",
    },
    MoodTemplates {
        mood: Mood::Emergency,
        by_language: &[
            ("hi", "मुझे आपकी बात से बहुत चिंता हो रही है। आपका जीवन मूल्यवान और अर्थपूर्ण है। कृपया तुरंत किसी भरोसेमंद व्यक्ति से संपर्क करें - दोस्त, परिवार, काउंसलर, या iCall (9152987821) जैसी हेल्पलाइन। आपको अकेले इससे नहीं गुजरना है। 🆘"),
            ("en", "I'm really concerned about what you're sharing. Your life has value and meaning. Please reach out to someone you trust right now - a friend, family member, counselor, or crisis helpline like iCall (9152987821) or AASRA (9820466726). You don't have to go through this alone. 🆘"),
            ("mr", "तुम्ही जे सांगत आहात त्याची मला खूप काळजी वाटते. तुमचे आयुष्य मौल्यवान आहे. कृपया आत्ताच एखाद्या विश्वासू व्यक्तीशी बोला - मित्र, कुटुंब, समुपदेशक, किंवा iCall (9152987821) किंवा AASRA (9820466726) सारखी हेल्पलाइन. तुम्हाला यातून एकट्याने जावे लागणार नाही. 🆘"),
            ("ta", "நீங்கள் பகிர்வதைக் கேட்டு நான் மிகவும் கவலைப்படுகிறேன். உங்கள் வாழ்க்கை மதிப்புமிக்கது. தயவுசெய்து இப்போதே நீங்கள் நம்பும் ஒருவரிடம் பேசுங்கள் - நண்பர், குடும்பத்தினர், ஆலோசகர், அல்லது iCall (9152987821) அல்லது AASRA (9820466726) போன்ற உதவி எண். நீங்கள் இதைத் தனியாகக் கடக்க வேண்டியதில்லை. 🆘"),
        ],
        default: "I'm really concerned. Your life has value. Please reach out to someone you trust or call iCall (9152987821). You don't have to go through this alone. 🆘",
    },
    MoodTemplates {
        mood: Mood::Normal,
        by_language: &[
            ("hi", "मेरे साथ साझा करने के लिए धन्यवाद। मैं यहाँ हूँ जो भी तरीके से मैं आपका साथ दे सकूं। आपका दिन कैसा रहा? 😊"),
            ("en", "Thank you for sharing with me. I'm here to listen and support you in whatever way I can. How has your day been going? 😊"),
            ("bn", "আমার সাথে শেয়ার করার জন্য ধন্যবাদ। আমি এখানে আছি যেভাবেই আপনাকে সাহায্য করতে পারি। আপনার দিন কেমন কাটছে? 😊"),
        ],
        default: "Thank you for sharing with me. I'm here to support you. How has your day been? 😊",
    },
];

/// Last-resort text if the table ever lacks a `normal` entry.
const NORMAL_DEFAULT: &str =
    "Thank you for sharing with me. I'm here to support you. How has your day been? 😊";

fn templates_for(mood: Mood) -> Option<&'static MoodTemplates> {
    TEMPLATES.iter().find(|entry| entry.mood == mood)
}

/// Pick the reply text for a mood and language using the 4-step fallback order.
pub fn resolve_template(mood: Mood, language: &str) -> &'static str {
    let mood_entry = templates_for(mood);
    let normal_entry = templates_for(Mood::Normal);

    mood_entry
        .and_then(|entry| entry.for_language(language))
        .or_else(|| mood_entry.map(|entry| entry.default))
        .or_else(|| normal_entry.and_then(|entry| entry.for_language(language)))
        .or_else(|| normal_entry.map(|entry| entry.default))
        .unwrap_or(NORMAL_DEFAULT)
}

/// Compose the fallback reply for a classified message.
pub fn compose_fallback(classification: &ClassificationResult) -> ResponsePayload {
    ResponsePayload {
        response: resolve_template(classification.mood, classification.language).to_string(),
        mood: classification.mood,
        emergency: classification.emergency,
        language: classification.language.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_template() {
        let text = resolve_template(Mood::Stressed, "te");
        assert!(text.contains("ఒత్తిడి"));
    }

    #[test]
    fn test_marathi_and_tamil_templates() {
        assert!(resolve_template(Mood::Stressed, "mr").contains("तणाव"));
        assert!(resolve_template(Mood::Emergency, "mr").contains("AASRA"));
        assert!(resolve_template(Mood::Emergency, "ta").contains("உதவி"));
    }

    #[test]
    fn test_falls_back_to_mood_default() {
        assert_eq!(
            resolve_template(Mood::Emergency, "bn"),
            templates_for(Mood::Emergency).unwrap().default
        );
        assert!(resolve_template(Mood::Anxious, "ta").starts_with("Anxiety"));
    }

    #[test]
    fn test_every_pair_resolves_to_text() {
        for mood in Mood::ALL {
            for language in ["hi", "en", "bn", "te", "mr", "ta", "as", "ur", "xx", ""] {
                assert!(
                    !resolve_template(mood, language).trim().is_empty(),
                    "{} / {}",
                    mood,
                    language
                );
            }
        }
    }

    #[test]
    fn test_every_mood_has_a_default() {
        for mood in Mood::ALL {
            let entry = templates_for(mood).expect("missing templates");
            assert!(!entry.default.is_empty());
        }
    }

    #[test]
    fn test_emergency_templates_name_a_helpline() {
        for language in ["hi", "en", "mr", "ta", "gu"] {
            assert!(resolve_template(Mood::Emergency, language).contains("9152987821"));
        }
    }

    #[test]
    fn test_compose_fallback_copies_classification() {
        let payload = compose_fallback(&ClassificationResult {
            mood: Mood::Emergency,
            emergency: true,
            language: "en",
        });
        assert_eq!(payload.mood, Mood::Emergency);
        assert!(payload.emergency);
        assert_eq!(payload.language, "en");
        assert!(payload.response.contains("AASRA"));
    }
}
