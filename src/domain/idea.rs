use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::translation::NewIdeaTranslation;
use crate::domain::language::LanguageCode;
use crate::domain::types::{CategoryId, IdeaContent, IdeaId, IdeaTitle, Rating, UserId};

/// An idea with its canonical, default-language text.
///
/// Translations live in their own table and are resolved on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: IdeaId,
    /// Weak reference to the author; the user may no longer exist.
    pub author_id: Option<UserId>,
    pub title: IdeaTitle,
    pub content: IdeaContent,
    pub rating: Option<Rating>,
    /// Linked categories in ascending id order, without duplicates.
    pub category_ids: Vec<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Everything written by a single run of the idea edit workflow.
///
/// `id` is `None` when creating. The repository applies the canonical row,
/// then `translations`, then `removed_languages`, then the category links,
/// inside one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaChanges {
    pub id: Option<IdeaId>,
    pub author_id: Option<UserId>,
    pub title: IdeaTitle,
    pub content: IdeaContent,
    pub rating: Option<Rating>,
    pub category_ids: Vec<CategoryId>,
    pub translations: Vec<NewIdeaTranslation>,
    pub removed_languages: Vec<LanguageCode>,
    pub timestamp: NaiveDateTime,
}
