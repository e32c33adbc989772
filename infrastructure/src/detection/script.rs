//! Offline language detection from Unicode scripts and stopwords.
//!
//! Non-Latin scripts identify the language directly (Devanagari → `hi`,
//! Hangul → `ko`, kana → `ja`, ...). Latin text is scored against small
//! stopword lists plus diacritic hints for English, Spanish, French and
//! German; with no signal it defaults to English.
//!
//! Deterministic: counts are kept in fixed-order arrays and ties resolve to
//! the earlier entry.

use async_trait::async_trait;
use lingua_application::ports::language_detector::{DetectionError, LanguageDetector};
use lingua_domain::LanguageCode;

/// Writing systems the detector recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Arabic,
    Hebrew,
    Cyrillic,
    Greek,
    Thai,
    Hangul,
    Kana,
    Han,
}

impl Script {
    const ALL: [Script; 17] = [
        Script::Latin,
        Script::Devanagari,
        Script::Bengali,
        Script::Gurmukhi,
        Script::Gujarati,
        Script::Tamil,
        Script::Telugu,
        Script::Kannada,
        Script::Malayalam,
        Script::Arabic,
        Script::Hebrew,
        Script::Cyrillic,
        Script::Greek,
        Script::Thai,
        Script::Hangul,
        Script::Kana,
        Script::Han,
    ];

    /// Unicode blocks belonging to this script
    fn ranges(&self) -> &'static [(u32, u32)] {
        match self {
            Script::Latin => &[(0x0041, 0x024F), (0x1E00, 0x1EFF)],
            Script::Devanagari => &[(0x0900, 0x097F)],
            Script::Bengali => &[(0x0980, 0x09FF)],
            Script::Gurmukhi => &[(0x0A00, 0x0A7F)],
            Script::Gujarati => &[(0x0A80, 0x0AFF)],
            Script::Tamil => &[(0x0B80, 0x0BFF)],
            Script::Telugu => &[(0x0C00, 0x0C7F)],
            Script::Kannada => &[(0x0C80, 0x0CFF)],
            Script::Malayalam => &[(0x0D00, 0x0D7F)],
            Script::Arabic => &[(0x0600, 0x06FF), (0x0750, 0x077F)],
            Script::Hebrew => &[(0x0590, 0x05FF)],
            Script::Cyrillic => &[(0x0400, 0x04FF)],
            Script::Greek => &[(0x0370, 0x03FF)],
            Script::Thai => &[(0x0E00, 0x0E7F)],
            Script::Hangul => &[(0x1100, 0x11FF), (0x3130, 0x318F), (0xAC00, 0xD7AF)],
            Script::Kana => &[(0x3040, 0x30FF), (0x31F0, 0x31FF)],
            Script::Han => &[(0x3400, 0x4DBF), (0x4E00, 0x9FFF), (0xF900, 0xFAFF)],
        }
    }

    pub fn of(c: char) -> Option<Script> {
        // Latin blocks include punctuation and symbols; count letters only
        if !c.is_alphabetic() && (c.is_ascii() || ('\u{00A0}'..='\u{00BF}').contains(&c)) {
            return None;
        }
        let code = c as u32;
        Script::ALL.into_iter().find(|script| {
            script
                .ranges()
                .iter()
                .any(|(start, end)| (*start..=*end).contains(&code))
        })
    }

    /// Language a script maps to when it is not Latin
    fn language(&self) -> Option<&'static str> {
        match self {
            Script::Latin => None,
            Script::Devanagari => Some("hi"),
            Script::Bengali => Some("bn"),
            Script::Gurmukhi => Some("pa"),
            Script::Gujarati => Some("gu"),
            Script::Tamil => Some("ta"),
            Script::Telugu => Some("te"),
            Script::Kannada => Some("kn"),
            Script::Malayalam => Some("ml"),
            Script::Arabic => Some("ar"),
            Script::Hebrew => Some("he"),
            Script::Cyrillic => Some("ru"),
            Script::Greek => Some("el"),
            Script::Thai => Some("th"),
            Script::Hangul => Some("ko"),
            Script::Kana => Some("ja"),
            Script::Han => Some("zh"),
        }
    }
}

struct LatinProfile {
    code: &'static str,
    stopwords: &'static [&'static str],
    /// Characters that only (or mostly) occur in this language
    marks: &'static [char],
}

const LATIN_PROFILES: [LatinProfile; 4] = [
    LatinProfile {
        code: "en",
        stopwords: &[
            "the", "is", "are", "was", "were", "what", "who", "where", "when", "how", "why",
            "which", "of", "and", "a", "an", "to", "does", "do", "did", "in", "on", "with",
        ],
        marks: &[],
    },
    LatinProfile {
        code: "es",
        stopwords: &[
            "el", "la", "los", "las", "es", "son", "de", "del", "qué", "que", "cuál", "cual",
            "quién", "quien", "dónde", "donde", "cómo", "como", "por", "un", "una", "y", "fue",
        ],
        marks: &['¿', '¡', 'ñ', 'á', 'í', 'ó', 'ú'],
    },
    LatinProfile {
        code: "fr",
        stopwords: &[
            "le", "la", "les", "est", "sont", "de", "des", "du", "qui", "quel", "quelle", "où",
            "comment", "pourquoi", "un", "une", "et", "au", "aux", "c'est", "qu'est",
        ],
        marks: &['ç', 'è', 'ê', 'à', 'ù', 'û', 'î', 'ô', 'œ'],
    },
    LatinProfile {
        code: "de",
        stopwords: &[
            "der", "die", "das", "ist", "sind", "und", "wer", "was", "wo", "wie", "warum",
            "welche", "ein", "eine", "von", "zu", "den", "dem", "des", "im", "nicht",
        ],
        marks: &['ß', 'ä', 'ö', 'ü'],
    },
];

/// Weight of one distinctive character relative to one stopword
const MARK_WEIGHT: usize = 2;

fn classify_latin(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphabetic() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect();

    let mut best = (LATIN_PROFILES[0].code, 0usize);
    for profile in &LATIN_PROFILES {
        let stopword_hits = words
            .iter()
            .filter(|w| profile.stopwords.contains(w))
            .count();
        let mark_hits = lowered.chars().filter(|c| profile.marks.contains(c)).count();
        let score = stopword_hits + MARK_WEIGHT * mark_hits;
        if score > best.1 {
            best = (profile.code, score);
        }
    }
    best.0
}

/// Classify `text` without any I/O.
pub fn classify(text: &str) -> Result<LanguageCode, DetectionError> {
    if text.trim().is_empty() {
        return Err(DetectionError::EmptyText);
    }

    let mut counts = [0usize; Script::ALL.len()];
    for c in text.chars() {
        if let Some(script) = Script::of(c)
            && let Some(index) = Script::ALL.iter().position(|s| *s == script)
        {
            counts[index] += 1;
        }
    }

    let kana = counts[Script::ALL.len() - 2];
    let mut dominant: Option<(Script, usize)> = None;
    for (script, count) in Script::ALL.into_iter().zip(counts) {
        if count > 0 && dominant.is_none_or(|(_, best)| count > best) {
            dominant = Some((script, count));
        }
    }

    let code = match dominant {
        None => return Err(DetectionError::Undetectable(text.trim().to_string())),
        Some((Script::Latin, _)) => classify_latin(text),
        // Japanese mixes kanji with kana; Chinese has no kana at all
        Some((Script::Han, _)) if kana > 0 => "ja",
        Some((script, _)) => script.language().unwrap_or(LanguageCode::ENGLISH),
    };

    LanguageCode::new(code).map_err(|e| DetectionError::Service(e.to_string()))
}

/// [`LanguageDetector`] backed by [`classify`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptLanguageDetector;

#[async_trait]
impl LanguageDetector for ScriptLanguageDetector {
    async fn detect(&self, text: &str) -> Result<LanguageCode, DetectionError> {
        classify(text)
    }

    fn name(&self) -> &str {
        "script"
    }
}
