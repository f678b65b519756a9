//! Language reference data and ISO 639-1 code helpers
//!
//! The offered languages are static; nothing here is persisted.

use anyhow::{Result, anyhow};
use isolang::Language as IsoLanguage;
use serde::Serialize;

/// A language the user can pick as source or target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO 639-1 code sent to providers
    pub code: &'static str,
    /// Name shown to the user
    pub display_name: &'static str,
}

const SUPPORTED_LANGUAGES: [Language; 10] = [
    Language { code: "ru", display_name: "Russian" },
    Language { code: "en", display_name: "English" },
    Language { code: "es", display_name: "Spanish" },
    Language { code: "fr", display_name: "French" },
    Language { code: "de", display_name: "German" },
    Language { code: "it", display_name: "Italian" },
    Language { code: "ja", display_name: "Japanese" },
    Language { code: "ko", display_name: "Korean" },
    Language { code: "zh", display_name: "Chinese" },
    Language { code: "ar", display_name: "Arabic" },
];

/// All languages offered for selection, in display order
pub fn supported_languages() -> &'static [Language] {
    &SUPPORTED_LANGUAGES
}

/// Find a supported language by code (case-insensitive)
pub fn find_by_code(code: &str) -> Option<Language> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .copied()
}

/// Find a supported language by display name (case-insensitive)
pub fn find_by_name(name: &str) -> Option<Language> {
    let name = name.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.display_name.eq_ignore_ascii_case(name))
        .copied()
}

/// Resolve user input that may be either a code or a display name
pub fn resolve(input: &str) -> Result<Language> {
    find_by_code(input)
        .or_else(|| find_by_name(input))
        .ok_or_else(|| anyhow!("Unsupported language: {}", input))
}

/// Check that a code is a valid ISO 639-1 code and return it normalized
pub fn validate_language_code(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && IsoLanguage::from_639_1(&normalized_code).is_some() {
        return Ok(normalized_code);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for any valid ISO 639-1 code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = validate_language_code(code)?;
    let lang = IsoLanguage::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Source and target language selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Exchange source and target
    pub fn swapped(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl Default for LanguagePair {
    /// Russian to English
    fn default() -> Self {
        Self::new("ru", "en")
    }
}
