use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::article::{ArticleThemes, ThemeChoice};
use crate::domain::language::{LanguageError, LanguageSettings};
use crate::domain::types::TypeConstraintError;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Configured languages; the default must be one of `supported`.
#[derive(Clone, Debug, Deserialize)]
pub struct LanguagesConfig {
    pub default: String,
    pub supported: Vec<String>,
}

/// Magazine section settings.
#[derive(Clone, Debug, Deserialize)]
pub struct MagazineConfig {
    pub themes: Vec<ThemeChoice>,
}

/// Configuration options for the ideas platform.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Items per listing page.
    pub page_size: usize,
    pub languages: LanguagesConfig,
    pub magazine: MagazineConfig,
}

impl ServerConfig {
    /// Load the configuration from an optional YAML file overlaid by
    /// `APP__`-prefixed environment variables (`APP__DATABASE_URL`, ...).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let default_themes = ArticleThemes::default()
            .choices()
            .iter()
            .map(|choice| {
                config::Map::from([
                    ("value".to_string(), config::Value::from(choice.value.as_str())),
                    ("label".to_string(), config::Value::from(choice.label.as_str())),
                ])
            })
            .collect::<Vec<_>>();

        Config::builder()
            .set_default("database_url", "ideas.db")?
            .set_default("page_size", DEFAULT_ITEMS_PER_PAGE as u64)?
            .set_default("languages.default", "en")?
            .set_default("languages.supported", vec!["en", "ru", "fr", "de"])?
            .set_default("magazine.themes", default_themes)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validated language settings.
    pub fn language_settings(&self) -> Result<LanguageSettings, LanguageError> {
        LanguageSettings::from_codes(&self.languages.default, &self.languages.supported)
    }

    /// Validated magazine themes.
    pub fn article_themes(&self) -> Result<ArticleThemes, TypeConstraintError> {
        ArticleThemes::new(self.magazine.themes.clone())
    }
}
