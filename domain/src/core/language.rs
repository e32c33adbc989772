//! Language code value object and the catalogue of supported output languages

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated language identifier (Value Object)
///
/// ISO-639-1 style: a 2–3 letter primary subtag, optionally followed by a
/// region or script subtag (`zh-cn`, `pt-br`). Codes are normalized to
/// lowercase with `-` as separator, so `"zh_CN"` and `"zh-cn"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// The pivot language used for retrieval queries
    pub const ENGLISH: &'static str = "en";

    /// Parse and normalize a language code
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = code.as_ref().trim();
        let normalized = raw.replace('_', "-").to_ascii_lowercase();

        let mut parts = normalized.split('-');
        let primary = parts.next().unwrap_or_default();
        let primary_ok =
            (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_lowercase());
        let subtags_ok = parts.all(|part| {
            (2..=4).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if primary_ok && subtags_ok {
            Ok(Self(normalized))
        } else {
            Err(DomainError::InvalidLanguageCode(raw.to_string()))
        }
    }

    /// English (`en`)
    pub fn english() -> Self {
        Self(Self::ENGLISH.to_string())
    }

    /// Resolve user input that may be either a code (`"es"`) or a
    /// catalogue name (`"Spanish"`, case-insensitive)
    pub fn resolve(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if let Some(lang) = SUPPORTED_LANGUAGES
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(Self(lang.code.to_string()));
        }
        Self::new(trimmed).map_err(|_| DomainError::UnknownLanguage(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag (`"zh"` for `"zh-cn"`)
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Whether text in `self` needs no translation to be read as `other`.
    ///
    /// Equal codes match, and so does a regional variant against its bare
    /// primary (`en-gb` and `en`). Two different regions (`zh-cn`, `zh-tw`)
    /// do not.
    pub fn same_language(&self, other: &LanguageCode) -> bool {
        if self == other {
            return true;
        }
        let bare = |code: &LanguageCode| code.primary() == code.as_str();
        self.primary() == other.primary() && (bare(self) || bare(other))
    }

    pub fn is_english(&self) -> bool {
        self.same_language(&Self::english())
    }

    /// Display name from the catalogue, if this is a supported output language
    pub fn display_name(&self) -> Option<&'static str> {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|l| l.code == self.0)
            .map(|l| l.name)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for LanguageCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LanguageCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

/// An output language offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLanguage {
    pub name: &'static str,
    pub code: &'static str,
}

/// Output languages offered by the front end, in menu order
pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage { name: "English", code: "en" },
    SupportedLanguage { name: "Telugu", code: "te" },
    SupportedLanguage { name: "Hindi", code: "hi" },
    SupportedLanguage { name: "Tamil", code: "ta" },
    SupportedLanguage { name: "Kannada", code: "kn" },
    SupportedLanguage { name: "Malayalam", code: "ml" },
    SupportedLanguage { name: "French", code: "fr" },
    SupportedLanguage { name: "Spanish", code: "es" },
    SupportedLanguage { name: "German", code: "de" },
    // Mandarin (Simplified)
    SupportedLanguage { name: "Chinese", code: "zh" },
    SupportedLanguage { name: "Japanese", code: "ja" },
    SupportedLanguage { name: "Korean", code: "ko" },
];
