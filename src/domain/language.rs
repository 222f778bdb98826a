//! Language codes and the configured language set.
//!
//! There is no process-wide "active language": every resolution call receives
//! the caller's language and the [`LanguageSettings`] explicitly.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors raised for language codes outside the configured set or for an
/// inconsistent language configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("`{0}` is not a valid language code")]
    Malformed(String),
    #[error("language `{0}` is not supported")]
    Unsupported(String),
    #[error("language `{0}` is the default language and cannot carry a translation")]
    DefaultLanguage(String),
    #[error("language `{0}` has no storage column")]
    NoStorageSlot(String),
    #[error("at least one language must be configured")]
    NoLanguages,
    #[error("language `{0}` is configured more than once")]
    Duplicate(String),
    #[error("default language `{0}` is not in the supported list")]
    DefaultNotSupported(String),
    #[error("storage column for `{0}` exists but the language is not configured")]
    UnconfiguredSlot(String),
}

/// Lowercase language code such as `en`, `fr` or `pt-br`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const MAX_LEN: usize = 7;

    /// Trims and lowercases the input, then checks its shape.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, LanguageError> {
        let raw = value.into();
        let code = raw.trim().to_ascii_lowercase();
        if Self::is_well_formed(&code) {
            Ok(Self(code))
        } else {
            Err(LanguageError::Malformed(raw))
        }
    }

    fn is_well_formed(code: &str) -> bool {
        if code.len() > Self::MAX_LEN {
            return false;
        }
        let mut parts = code.splitn(2, '-');
        let primary = parts.next().unwrap_or_default();
        let primary_ok =
            (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_lowercase());
        let region_ok = parts.next().is_none_or(|region| {
            (2..=4).contains(&region.len()) && region.chars().all(|c| c.is_ascii_alphanumeric())
        });
        primary_ok && region_ok
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = LanguageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered list of supported languages plus the designated default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSettings {
    default: LanguageCode,
    supported: Vec<LanguageCode>,
}

impl LanguageSettings {
    /// Validates the configured language list.
    pub fn new(default: LanguageCode, supported: Vec<LanguageCode>) -> Result<Self, LanguageError> {
        if supported.is_empty() {
            return Err(LanguageError::NoLanguages);
        }
        for (index, code) in supported.iter().enumerate() {
            if supported[..index].contains(code) {
                return Err(LanguageError::Duplicate(code.to_string()));
            }
        }
        if !supported.contains(&default) {
            return Err(LanguageError::DefaultNotSupported(default.to_string()));
        }
        Ok(Self { default, supported })
    }

    /// Builds settings from raw configuration strings.
    pub fn from_codes<S: AsRef<str>>(
        default: &str,
        supported: &[S],
    ) -> Result<Self, LanguageError> {
        let supported = supported
            .iter()
            .map(|code| LanguageCode::new(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(LanguageCode::new(default)?, supported)
    }

    pub fn default_language(&self) -> &LanguageCode {
        &self.default
    }

    pub fn supported(&self) -> &[LanguageCode] {
        &self.supported
    }

    pub fn is_default(&self, code: &LanguageCode) -> bool {
        &self.default == code
    }

    pub fn is_supported(&self, code: &LanguageCode) -> bool {
        self.supported.contains(code)
    }

    /// Parses a caller-supplied code and checks it against the supported set.
    pub fn parse(&self, code: &str) -> Result<LanguageCode, LanguageError> {
        let code = LanguageCode::new(code)?;
        if self.is_supported(&code) {
            Ok(code)
        } else {
            Err(LanguageError::Unsupported(code.into()))
        }
    }

    /// Like [`Self::parse`] but also rejects the default language, which only
    /// lives in the canonical fields.
    pub fn translation_language(&self, code: &str) -> Result<LanguageCode, LanguageError> {
        let code = self.parse(code)?;
        if self.is_default(&code) {
            Err(LanguageError::DefaultLanguage(code.into()))
        } else {
            Ok(code)
        }
    }

    /// Languages a translation may be written in, in configured order.
    pub fn translation_languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.supported.iter().filter(|code| !self.is_default(code))
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> LanguageSettings {
    LanguageSettings::from_codes("en", &["en", "ru", "fr", "de"]).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_language_codes() {
        assert_eq!(LanguageCode::new(" FR ").unwrap(), "fr");
        assert_eq!(LanguageCode::new("pt-BR").unwrap(), "pt-br");
        assert!(LanguageCode::new("english").is_err());
        assert!(LanguageCode::new("e").is_err());
        assert!(LanguageCode::new("").is_err());
    }

    #[test]
    fn settings_require_default_in_supported_list() {
        assert_eq!(
            LanguageSettings::from_codes("es", &["en", "fr"]).unwrap_err(),
            LanguageError::DefaultNotSupported("es".into())
        );
        assert_eq!(
            LanguageSettings::from_codes("en", &["en", "fr", "en"]).unwrap_err(),
            LanguageError::Duplicate("en".into())
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            LanguageSettings::from_codes("en", &empty).unwrap_err(),
            LanguageError::NoLanguages
        );
    }

    #[test]
    fn translation_language_rejects_default_and_unsupported() {
        let settings = test_settings();
        assert_eq!(settings.translation_language("fr").unwrap(), "fr");
        assert_eq!(
            settings.translation_language("en").unwrap_err(),
            LanguageError::DefaultLanguage("en".into())
        );
        assert_eq!(
            settings.translation_language("es").unwrap_err(),
            LanguageError::Unsupported("es".into())
        );
    }

    #[test]
    fn translation_languages_skip_default() {
        let settings = test_settings();
        let codes: Vec<&str> = settings
            .translation_languages()
            .map(LanguageCode::as_str)
            .collect();
        assert_eq!(codes, vec!["ru", "fr", "de"]);
    }
}
