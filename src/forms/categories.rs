use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::language::LanguageCode;
use crate::domain::multilingual::{MultilingualSchema, MultilingualText};
use crate::domain::types::{CategorySlug, CategoryTitle};
use crate::forms::FieldErrors;

/// Title of a category in one language.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryTitleForm {
    #[validate(length(max = 7))]
    pub language: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub title: String,
}

/// Create/edit form for a category. Titles are stored one column per
/// language, so only languages with a column are accepted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 50))]
    pub slug: String,
    #[serde(default)]
    pub titles: Vec<CategoryTitleForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub slug: CategorySlug,
    pub title: MultilingualText,
}

impl CategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            slug: self.slug,
            title: self.title,
        }
    }
}

impl CategoryForm {
    /// Validates the slug and every title; the default-language title is
    /// required because other languages fall back to it.
    pub fn into_payload(
        self,
        schema: &MultilingualSchema,
    ) -> Result<CategoryFormPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            errors.extend_validation("", &e);
        }

        let slug = errors.check("slug", CategorySlug::new(self.slug));

        let mut title = MultilingualText::default();
        let mut seen: Vec<LanguageCode> = Vec::new();

        for (index, form) in self.titles.into_iter().enumerate() {
            let prefix = format!("titles-{index}-");
            let field = |name: &str| format!("{prefix}{name}");

            if let Err(e) = form.validate() {
                errors.extend_validation(&prefix, &e);
            }

            let Some(language) =
                errors.check(&field("language"), schema.settings().parse(&form.language))
            else {
                continue;
            };
            if seen.contains(&language) {
                errors.add(
                    field("language"),
                    format!("language `{language}` is submitted more than once"),
                );
                continue;
            }
            seen.push(language.clone());

            // A blank title leaves the column unset.
            if form.title.trim().is_empty() {
                continue;
            }
            if let Some(value) = errors.check(&field("title"), CategoryTitle::new(form.title)) {
                errors.check(
                    &field("language"),
                    schema.set(&mut title, language.as_str(), Some(value.into_inner())),
                );
            }
        }

        if title.slot(schema.default_slot()).is_none() {
            errors.add(
                "titles",
                format!(
                    "a title in the default language `{}` is required",
                    schema.settings().default_language()
                ),
            );
        }

        errors.into_result()?;

        match slug {
            Some(slug) => Ok(CategoryFormPayload { slug, title }),
            None => {
                let mut errors = FieldErrors::new();
                errors.add("slug", "slug cannot be empty");
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::language::{LanguageSettings, test_settings};
    use crate::domain::multilingual::SchemaLanguage;

    fn title(language: &str, title: &str) -> CategoryTitleForm {
        CategoryTitleForm {
            language: language.into(),
            title: title.into(),
        }
    }

    #[test]
    fn builds_multilingual_title() {
        let schema = MultilingualSchema::new(&test_settings()).unwrap();
        let form = CategoryForm {
            slug: "urban-life".into(),
            titles: vec![title("en", " Urban life "), title("fr", "Vie urbaine"), title("de", "")],
        };
        let payload = form.into_payload(&schema).unwrap();
        assert_eq!(payload.slug, "urban-life");
        assert_eq!(payload.title.slot(SchemaLanguage::En), Some("Urban life"));
        assert_eq!(payload.title.slot(SchemaLanguage::Fr), Some("Vie urbaine"));
        assert_eq!(payload.title.slot(SchemaLanguage::De), None);
    }

    #[test]
    fn default_title_is_required() {
        let schema = MultilingualSchema::new(&test_settings()).unwrap();
        let form = CategoryForm {
            slug: "urban-life".into(),
            titles: vec![title("fr", "Vie urbaine")],
        };
        let errors = form.into_payload(&schema).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["titles"]);
    }

    #[test]
    fn rejects_bad_slug_and_languages_without_column() {
        let settings =
            LanguageSettings::from_codes("en", &["en", "ru", "fr", "de", "es"]).unwrap();
        let schema = MultilingualSchema::new(&settings).unwrap();
        let form = CategoryForm {
            slug: "Urban Life".into(),
            titles: vec![
                title("en", "Urban life"),
                title("es", "Vida urbana"),
                title("it", "Vita urbana"),
                title("en", "Again"),
            ],
        };
        let errors = form.into_payload(&schema).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                "slug",
                "titles-1-language",
                "titles-2-language",
                "titles-3-language"
            ]
        );
    }
}
