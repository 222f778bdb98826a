use std::num::IntErrorKind;

use serde::Deserialize;
use validator::Validate;

use crate::domain::facets::{FacetKind, FacetValues, IdeaFilter};
use crate::domain::language::{LanguageCode, LanguageSettings};
use crate::domain::translation::NewIdeaTranslation;
use crate::domain::types::{
    CategoryId, IdeaContent, IdeaTitle, Rating, TranslationContent, TranslationTitle, UserId,
};
use crate::forms::FieldErrors;

/// Per-language sub-form of [`IdeaForm`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TranslationForm {
    #[validate(length(max = 7))]
    pub language: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Remove the stored translation for `language`.
    #[serde(default)]
    pub delete: bool,
}

impl TranslationForm {
    fn is_blank(&self) -> bool {
        !self.delete
            && self.language.trim().is_empty()
            && self.title.trim().is_empty()
            && self.content.trim().is_empty()
    }
}

/// Create/edit form for an idea: the canonical text plus any number of
/// translations, validated as one unit.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IdeaForm {
    #[validate(length(max = 200))]
    pub title: String,
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    pub categories: Vec<i32>,
    #[serde(default)]
    pub translations: Vec<TranslationForm>,
}

/// Validated content of an [`IdeaForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaFormPayload {
    pub title: IdeaTitle,
    pub content: IdeaContent,
    pub rating: Option<Rating>,
    /// Ascending and without duplicates.
    pub category_ids: Vec<CategoryId>,
    pub translations: Vec<NewIdeaTranslation>,
    pub removed_languages: Vec<LanguageCode>,
}

impl IdeaForm {
    /// Validates every field and sub-form, collecting all problems.
    ///
    /// Checks that need the store, such as title uniqueness, are left to the
    /// service.
    pub fn into_payload(
        self,
        languages: &LanguageSettings,
    ) -> Result<IdeaFormPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            errors.extend_validation("", &e);
        }

        let title = errors.check("title", IdeaTitle::new(self.title));
        let content = errors.check("content", IdeaContent::new(self.content));
        let rating = match self.rating {
            Some(value) => errors.check("rating", Rating::new(value)),
            None => None,
        };

        let mut category_ids = Vec::with_capacity(self.categories.len());
        for value in self.categories {
            if let Some(id) = errors.check("categories", CategoryId::new(value)) {
                category_ids.push(id);
            }
        }
        category_ids.sort();
        category_ids.dedup();

        let mut translations = Vec::new();
        let mut removed_languages = Vec::new();
        let mut seen: Vec<LanguageCode> = Vec::new();

        for (index, form) in self.translations.into_iter().enumerate() {
            if form.is_blank() {
                continue;
            }
            let prefix = format!("translations-{index}-");
            let field = |name: &str| format!("{prefix}{name}");

            if let Err(e) = form.validate() {
                errors.extend_validation(&prefix, &e);
            }

            let language = errors.check(
                &field("language"),
                languages.translation_language(&form.language),
            );
            if let Some(language) = &language {
                if seen.contains(language) {
                    errors.add(
                        field("language"),
                        format!("language `{language}` is submitted more than once"),
                    );
                } else {
                    seen.push(language.clone());
                }
            }

            if form.delete {
                if let Some(language) = language {
                    removed_languages.push(language);
                }
                continue;
            }

            let title = errors.check(&field("title"), TranslationTitle::new(form.title));
            let content = errors.check(&field("content"), TranslationContent::new(form.content));
            if let (Some(language), Some(title), Some(content)) = (language, title, content) {
                translations.push(NewIdeaTranslation {
                    language,
                    title,
                    content,
                });
            }
        }

        errors.into_result()?;

        match (title, content) {
            (Some(title), Some(content)) => Ok(IdeaFormPayload {
                title,
                content,
                rating,
                category_ids,
                translations,
                removed_languages,
            }),
            // Unreachable: a missing value always leaves an error behind.
            _ => {
                let mut errors = FieldErrors::new();
                errors.add("title", "title cannot be empty");
                Err(errors)
            }
        }
    }
}

/// Raw query-string values of the idea list.
///
/// Values that do not parse are treated as absent, so a stale or hand-edited
/// link still lists ideas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeaFilterForm {
    pub author: Option<String>,
    pub category: Option<String>,
    pub rating: Option<String>,
    /// Comma-separated facet names giving the order criteria are applied and
    /// reported in.
    pub order: Option<String>,
    pub page: Option<String>,
}

fn parse_facet<T, E: std::fmt::Display>(
    facet: FacetKind,
    raw: Option<&str>,
    parse: impl Fn(i32) -> Result<T, E>,
) -> Option<T> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    match raw.parse::<i32>() {
        Ok(value) => match parse(value) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring {} filter `{raw}`: {e}", facet.as_str());
                None
            }
        },
        Err(e) => {
            log::warn!("Ignoring {} filter `{raw}`: {e}", facet.as_str());
            None
        }
    }
}

impl IdeaFilterForm {
    pub fn values(&self) -> FacetValues {
        FacetValues {
            author: parse_facet(FacetKind::Author, self.author.as_deref(), UserId::new),
            category: parse_facet(FacetKind::Category, self.category.as_deref(), CategoryId::new),
            rating: parse_facet(FacetKind::Rating, self.rating.as_deref(), Rating::new),
        }
    }

    /// Requested facet order; unknown names are skipped and facets left out
    /// follow in their default order.
    pub fn facet_order(&self) -> Vec<FacetKind> {
        let mut order: Vec<FacetKind> = Vec::new();
        if let Some(raw) = &self.order {
            for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                match FacetKind::DEFAULT_ORDER.iter().find(|k| k.as_str() == name) {
                    Some(kind) if !order.contains(kind) => order.push(*kind),
                    Some(_) => {}
                    None => log::warn!("Ignoring unknown facet `{name}`"),
                }
            }
        }
        for kind in FacetKind::DEFAULT_ORDER {
            if !order.contains(&kind) {
                order.push(kind);
            }
        }
        order
    }

    pub fn filter(&self) -> IdeaFilter {
        IdeaFilter::from_order(&self.facet_order(), self.values())
    }

    /// Requested page. A non-numeric value means the first page and a
    /// number too large to represent means the last.
    pub fn page(&self) -> usize {
        let Some(raw) = self.page.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) else {
            return 1;
        };
        match raw.parse::<usize>() {
            Ok(page) => page,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => usize::MAX,
            Err(e) => {
                log::warn!("Ignoring page `{raw}`: {e}");
                1
            }
        }
    }
}
