use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::language::{LanguageCode, LanguageError};
use crate::domain::multilingual::MultilingualSchema;

/// Category with its title resolved for one language.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: i32,
    pub slug: String,
    /// `None` when neither the language nor the default has a title.
    pub title: Option<String>,
}

impl CategoryDto {
    pub fn resolve(
        category: &Category,
        schema: &MultilingualSchema,
        language: &LanguageCode,
    ) -> Result<Self, LanguageError> {
        Ok(Self {
            id: category.id.get(),
            slug: category.slug.as_str().to_string(),
            title: schema
                .resolve_for_current_context(&category.title, language)?
                .map(str::to_string),
        })
    }
}

/// Every title slot of a category, for the edit surface.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTitlesDto {
    pub id: i32,
    pub slug: String,
    /// `(language, title)` in schema column order.
    pub titles: Vec<(String, Option<String>)>,
}

impl From<&Category> for CategoryTitlesDto {
    fn from(category: &Category) -> Self {
        use crate::domain::multilingual::SchemaLanguage;

        Self {
            id: category.id.get(),
            slug: category.slug.as_str().to_string(),
            titles: SchemaLanguage::ALL
                .iter()
                .map(|language| {
                    (
                        language.code().to_string(),
                        category.title.slot(*language).map(str::to_string),
                    )
                })
                .collect(),
        }
    }
}
