use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ArticleBody, ArticleId, ArticleTitle, TypeConstraintError};

/// Theme value picked from the configured magazine themes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ArticleTheme(String);

impl ArticleTheme {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A selectable theme with its display label.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeChoice {
    pub value: String,
    pub label: String,
}

/// Ordered theme choices. Kept out of the schema so that changing them needs
/// no migration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleThemes(Vec<ThemeChoice>);

impl ArticleThemes {
    pub fn new(choices: Vec<ThemeChoice>) -> Result<Self, TypeConstraintError> {
        if choices.is_empty() {
            return Err(TypeConstraintError::EmptyString("themes"));
        }
        for (index, choice) in choices.iter().enumerate() {
            if choice.value.trim().is_empty() {
                return Err(TypeConstraintError::EmptyString("theme"));
            }
            if choices[..index].iter().any(|c| c.value == choice.value) {
                return Err(TypeConstraintError::InvalidValue(format!(
                    "theme `{}` is configured more than once",
                    choice.value
                )));
            }
        }
        Ok(Self(choices))
    }

    pub fn choices(&self) -> &[ThemeChoice] {
        &self.0
    }

    /// Accepts only configured theme values.
    pub fn theme(&self, value: &str) -> Result<ArticleTheme, TypeConstraintError> {
        let value = value.trim();
        self.0
            .iter()
            .find(|choice| choice.value == value)
            .map(|choice| ArticleTheme(choice.value.clone()))
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("theme: {value}")))
    }

    pub fn label(&self, theme: &ArticleTheme) -> Option<&str> {
        self.0
            .iter()
            .find(|choice| choice.value == theme.0)
            .map(|choice| choice.label.as_str())
    }
}

impl Default for ArticleThemes {
    fn default() -> Self {
        let choice = |value: &str, label: &str| ThemeChoice {
            value: value.to_string(),
            label: label.to_string(),
        };
        Self(vec![
            choice("futurism", "Futurism"),
            choice("nostalgia", "Nostalgia"),
            choice("sustainability", "Sustainability"),
            choice("wonder", "Wonder"),
        ])
    }
}

/// Magazine news article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsArticle {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub body: ArticleBody,
    /// Stored theme value; it may have been removed from the configuration
    /// since the article was written.
    pub theme: String,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`NewsArticle`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewNewsArticle {
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub theme: ArticleTheme,
    pub created_at: NaiveDateTime,
}
