use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::facets::SelectedFacet;
use crate::domain::idea::Idea;
use crate::domain::translation::{IdeaTranslation, TranslatableAttribute, resolve_attribute};
use crate::dto::categories::CategoryDto;
use crate::pagination::Paginated;

/// Idea with its text resolved for one language.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IdeaDto {
    pub id: i32,
    pub author_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub rating: Option<i32>,
    pub rating_label: Option<&'static str>,
    pub category_ids: Vec<i32>,
    /// Whether the text comes from a translation rather than the canonical
    /// fields.
    pub translated: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl IdeaDto {
    pub fn new(idea: &Idea, translation: Option<&IdeaTranslation>) -> Self {
        let translation = translation.filter(|t| t.idea_id == idea.id);
        Self {
            id: idea.id.get(),
            author_id: idea.author_id.map(|id| id.get()),
            title: resolve_attribute(idea, translation, TranslatableAttribute::Title).to_string(),
            content: resolve_attribute(idea, translation, TranslatableAttribute::Content)
                .to_string(),
            rating: idea.rating.map(|r| r.get()),
            rating_label: idea.rating.map(|r| r.label()),
            category_ids: idea.category_ids.iter().map(|id| id.get()).collect(),
            translated: translation.is_some(),
            created_at: idea.created_at,
            updated_at: idea.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RatingOptionDto {
    pub value: i32,
    pub label: &'static str,
}

/// Facet state of an idea listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetsDto {
    /// Applied criteria in application order.
    pub selected: Vec<SelectedFacet>,
    /// Selectable values, computed over every idea regardless of the filter.
    pub authors: Vec<i32>,
    pub categories: Vec<CategoryDto>,
    pub ratings: Vec<RatingOptionDto>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IdeaListing {
    pub ideas: Paginated<IdeaDto>,
    pub facets: FacetsDto,
}

/// Idea detail page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IdeaDetailDto {
    pub idea: IdeaDto,
    pub categories: Vec<CategoryDto>,
    pub likes: usize,
}

/// Stored translation as shown in listings of an idea's translations.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslationDto {
    pub language: String,
    pub title: String,
    pub content: String,
}

impl From<IdeaTranslation> for TranslationDto {
    fn from(value: IdeaTranslation) -> Self {
        Self {
            language: value.language.into(),
            title: value.title.into_inner(),
            content: value.content.into_inner(),
        }
    }
}

/// One translation sub-form of the edit surface, pre-filled when a
/// translation exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslationSlotDto {
    pub language: String,
    pub title: String,
    pub content: String,
    pub exists: bool,
}
