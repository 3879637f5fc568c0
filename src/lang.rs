use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use whatlang::{detect, Lang};

use crate::error::{Result, TerjemahError};

/// A validated language identifier.
///
/// Codes are lowercase two- or three-letter ASCII identifiers (`en`, `id`,
/// `ms`, `th`, ...). The sentinel `unknown` stands in when language
/// identification fails. Anything else is rejected at the boundary, so the
/// rest of the pipeline never sees a malformed code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageId(String);

impl LanguageId {
    /// The sentinel used when identification fails.
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == "unknown"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageId {
    type Err = TerjemahError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        if code == "unknown" {
            return Ok(Self::unknown());
        }
        let valid = (2..=3).contains(&code.len())
            && code.chars().all(|c| c.is_ascii_lowercase());
        if valid {
            Ok(Self(code.to_string()))
        } else {
            Err(TerjemahError::Language(s.to_string()))
        }
    }
}

impl TryFrom<String> for LanguageId {
    type Error = TerjemahError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LanguageId> for String {
    fn from(id: LanguageId) -> Self {
        id.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered (source, target) pair identifying a trained classifier or a
/// backend request. `(a, b)` and `(b, a)` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub source: LanguageId,
    pub target: LanguageId,
}

impl LanguagePair {
    pub fn new(source: LanguageId, target: LanguageId) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Identify the language of a text with whatlang.
///
/// Identification failure is recovered locally by substituting the `unknown`
/// sentinel; callers never have to abort on short or ambiguous input.
pub fn identify(text: &str) -> LanguageId {
    match detect(text) {
        Some(info) => lang_to_code(info.lang())
            .parse()
            .unwrap_or_else(|_| LanguageId::unknown()),
        None => LanguageId::unknown(),
    }
}

/// Convert a whatlang language to its ISO 639-1 code.
fn lang_to_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Ind => "id",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Rus => "ru",
        Lang::Jpn => "ja",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Ben => "bn",
        Lang::Vie => "vi",
        Lang::Tha => "th",
        Lang::Tur => "tr",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Ukr => "uk",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Fin => "fi",
        Lang::Ell => "el",
        Lang::Ces => "cs",
        Lang::Heb => "he",
        Lang::Tgl => "tl",
        Lang::Jav => "jv",
        _ => "unknown",
    }
}
