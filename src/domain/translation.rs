//! Per-language overrides of an idea's canonical text.

use serde::{Deserialize, Serialize};

use crate::domain::idea::Idea;
use crate::domain::language::LanguageCode;
use crate::domain::types::{IdeaId, TranslationContent, TranslationId, TranslationTitle};

/// A stored translation row. At most one exists per (idea, language) and its
/// language is never the default one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdeaTranslation {
    pub id: TranslationId,
    pub idea_id: IdeaId,
    pub language: LanguageCode,
    pub title: TranslationTitle,
    pub content: TranslationContent,
}

/// Values written by an upsert of the (idea, language) row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIdeaTranslation {
    pub language: LanguageCode,
    pub title: TranslationTitle,
    pub content: TranslationContent,
}

/// Idea attributes that can be translated.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TranslatableAttribute {
    Title,
    Content,
}

impl IdeaTranslation {
    pub fn value(&self, attribute: TranslatableAttribute) -> &str {
        match attribute {
            TranslatableAttribute::Title => self.title.as_str(),
            TranslatableAttribute::Content => self.content.as_str(),
        }
    }
}

impl Idea {
    pub fn canonical_value(&self, attribute: TranslatableAttribute) -> &str {
        match attribute {
            TranslatableAttribute::Title => self.title.as_str(),
            TranslatableAttribute::Content => self.content.as_str(),
        }
    }
}

/// Displayed value of `attribute`: the translation's when one is given,
/// otherwise the canonical one.
pub fn resolve_attribute<'a>(
    idea: &'a Idea,
    translation: Option<&'a IdeaTranslation>,
    attribute: TranslatableAttribute,
) -> &'a str {
    match translation {
        Some(translation) if translation.idea_id == idea.id => translation.value(attribute),
        _ => idea.canonical_value(attribute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{IdeaContent, IdeaTitle};
    use chrono::DateTime;

    fn idea(id: i32) -> Idea {
        Idea {
            id: IdeaId::new(id).unwrap(),
            author_id: None,
            title: IdeaTitle::new("Rooftop gardens").unwrap(),
            content: IdeaContent::new("Grow food on roofs.").unwrap(),
            rating: None,
            category_ids: vec![],
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn french(idea_id: i32) -> IdeaTranslation {
        IdeaTranslation {
            id: TranslationId::new(1).unwrap(),
            idea_id: IdeaId::new(idea_id).unwrap(),
            language: LanguageCode::new("fr").unwrap(),
            title: TranslationTitle::new("Jardins sur les toits").unwrap(),
            content: TranslationContent::new("Cultiver sur les toits.").unwrap(),
        }
    }

    #[test]
    fn prefers_translation_when_present() {
        let idea = idea(1);
        let translation = french(1);
        assert_eq!(
            resolve_attribute(&idea, Some(&translation), TranslatableAttribute::Title),
            "Jardins sur les toits"
        );
        assert_eq!(
            resolve_attribute(&idea, Some(&translation), TranslatableAttribute::Content),
            "Cultiver sur les toits."
        );
    }

    #[test]
    fn falls_back_to_canonical_value() {
        let idea = idea(1);
        assert_eq!(
            resolve_attribute(&idea, None, TranslatableAttribute::Title),
            "Rooftop gardens"
        );
    }

    #[test]
    fn ignores_translation_of_another_idea() {
        let idea = idea(1);
        let translation = french(2);
        assert_eq!(
            resolve_attribute(&idea, Some(&translation), TranslatableAttribute::Title),
            "Rooftop gardens"
        );
    }
}
