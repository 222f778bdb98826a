//! Text stored as one column per language on the owning row.
//!
//! The set of columns is fixed at compile time by [`SchemaLanguage`]; adding a
//! language means a migration plus a new variant. [`MultilingualSchema`]
//! checks the runtime language configuration against that set once, at
//! start-up.

use serde::{Deserialize, Serialize};

use crate::domain::language::{LanguageCode, LanguageError, LanguageSettings};

/// Languages that have a physical storage column.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SchemaLanguage {
    En,
    Ru,
    Fr,
    De,
}

impl SchemaLanguage {
    pub const COUNT: usize = 4;
    pub const ALL: [SchemaLanguage; Self::COUNT] = [Self::En, Self::Ru, Self::Fr, Self::De];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    pub fn from_code(code: &LanguageCode) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code.as_str())
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One optional value per [`SchemaLanguage`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultilingualText {
    slots: [Option<String>; SchemaLanguage::COUNT],
}

impl MultilingualText {
    /// Builds the value from slots ordered as [`SchemaLanguage::ALL`].
    pub fn from_slots(slots: [Option<String>; SchemaLanguage::COUNT]) -> Self {
        Self {
            slots: slots.map(normalize),
        }
    }

    /// Raw slot content for a language, without fallback.
    pub fn slot(&self, language: SchemaLanguage) -> Option<&str> {
        self.slots[language.index()].as_deref()
    }

    /// Overwrites a slot. Blank values clear it.
    pub fn set_slot(&mut self, language: SchemaLanguage, value: Option<String>) {
        self.slots[language.index()] = normalize(value);
    }

    pub fn into_slots(self) -> [Option<String>; SchemaLanguage::COUNT] {
        self.slots
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Language configuration validated against the compiled storage columns.
#[derive(Clone, Debug)]
pub struct MultilingualSchema {
    settings: LanguageSettings,
    default: SchemaLanguage,
}

impl MultilingualSchema {
    /// Fails when a storage column belongs to a language that is not
    /// configured, or when the default language has no column to fall back to.
    pub fn new(settings: &LanguageSettings) -> Result<Self, LanguageError> {
        for language in SchemaLanguage::ALL {
            let code = LanguageCode::new(language.code())?;
            if !settings.is_supported(&code) {
                return Err(LanguageError::UnconfiguredSlot(code.into()));
            }
        }
        let default = SchemaLanguage::from_code(settings.default_language())
            .ok_or_else(|| LanguageError::NoStorageSlot(settings.default_language().to_string()))?;

        Ok(Self {
            settings: settings.clone(),
            default,
        })
    }

    pub fn settings(&self) -> &LanguageSettings {
        &self.settings
    }

    pub fn default_slot(&self) -> SchemaLanguage {
        self.default
    }

    /// `Ok(None)` means the language is configured but has no column.
    fn slot_for(&self, language: &str) -> Result<Option<SchemaLanguage>, LanguageError> {
        let code = self.settings.parse(language)?;
        Ok(SchemaLanguage::from_code(&code))
    }

    /// Value for `language`, falling back to the default language.
    ///
    /// Only an unknown language is an error; a missing value, including a
    /// missing default, yields `None`.
    pub fn get<'a>(
        &self,
        field: &'a MultilingualText,
        language: &str,
    ) -> Result<Option<&'a str>, LanguageError> {
        let own = self.slot_for(language)?.and_then(|slot| field.slot(slot));
        Ok(own.or_else(|| field.slot(self.default)))
    }

    /// Writes the slot for `language`.
    pub fn set(
        &self,
        field: &mut MultilingualText,
        language: &str,
        value: Option<String>,
    ) -> Result<(), LanguageError> {
        let slot = self
            .slot_for(language)?
            .ok_or_else(|| LanguageError::NoStorageSlot(language.trim().to_ascii_lowercase()))?;
        field.set_slot(slot, value);
        Ok(())
    }

    /// [`Self::get`] for the language of the caller's request.
    pub fn resolve_for_current_context<'a>(
        &self,
        field: &'a MultilingualText,
        active_language: &LanguageCode,
    ) -> Result<Option<&'a str>, LanguageError> {
        self.get(field, active_language.as_str())
    }

    /// Physical column names backing `base`, e.g. `title_en`.
    pub fn field_names(base: &str) -> Vec<String> {
        SchemaLanguage::ALL
            .iter()
            .map(|language| format!("{base}_{}", language.code()))
            .collect()
    }
}
