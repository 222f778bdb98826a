use diesel::prelude::*;

use crate::domain::language::LanguageCode;
use crate::domain::translation::{
    IdeaTranslation as DomainIdeaTranslation, NewIdeaTranslation as DomainNewIdeaTranslation,
};
use crate::domain::types::{TranslationContent, TranslationTitle};
use crate::repository::errors::RepositoryError;

/// Diesel model representing the `idea_translations` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::idea_translations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IdeaTranslation {
    pub id: i32,
    pub idea_id: i32,
    pub language: String,
    pub title: String,
    pub content: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::idea_translations)]
pub struct NewIdeaTranslation<'a> {
    pub idea_id: i32,
    pub language: &'a str,
    pub title: &'a str,
    pub content: &'a str,
}

impl TryFrom<IdeaTranslation> for DomainIdeaTranslation {
    type Error = RepositoryError;

    fn try_from(translation: IdeaTranslation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: translation.id.try_into()?,
            idea_id: translation.idea_id.try_into()?,
            language: LanguageCode::new(translation.language)?,
            title: TranslationTitle::new(translation.title)?,
            content: TranslationContent::new(translation.content)?,
        })
    }
}

impl<'a> NewIdeaTranslation<'a> {
    pub fn new(idea_id: i32, translation: &'a DomainNewIdeaTranslation) -> Self {
        Self {
            idea_id,
            language: translation.language.as_str(),
            title: translation.title.as_str(),
            content: translation.content.as_str(),
        }
    }
}
