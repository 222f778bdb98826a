use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::idea::{Idea as DomainIdea, IdeaChanges};
use crate::domain::types::{
    CategoryId, IdeaContent, IdeaTitle, Rating, TypeConstraintError, UserId,
};

/// Diesel model representing the `ideas` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::ideas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Idea {
    pub id: i32,
    pub author_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub rating: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ideas)]
pub struct NewIdea<'a> {
    pub author_id: Option<i32>,
    pub title: &'a str,
    pub content: &'a str,
    pub rating: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Canonical columns overwritten by an update. The author is set once, at
/// creation.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::ideas)]
#[diesel(treat_none_as_null = true)]
pub struct IdeaChangeset<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub rating: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::idea_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IdeaCategory {
    pub idea_id: i32,
    pub category_id: i32,
}

impl Idea {
    /// Converts the row, attaching the category ids loaded separately.
    pub fn into_domain(self, category_ids: Vec<i32>) -> Result<DomainIdea, TypeConstraintError> {
        let mut category_ids = category_ids
            .into_iter()
            .map(CategoryId::new)
            .collect::<Result<Vec<_>, _>>()?;
        category_ids.sort();
        category_ids.dedup();

        Ok(DomainIdea {
            id: self.id.try_into()?,
            author_id: self.author_id.map(UserId::new).transpose()?,
            title: IdeaTitle::new(self.title)?,
            content: IdeaContent::new(self.content)?,
            rating: self.rating.map(Rating::new).transpose()?,
            category_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl<'a> From<&'a IdeaChanges> for NewIdea<'a> {
    fn from(changes: &'a IdeaChanges) -> Self {
        Self {
            author_id: changes.author_id.map(UserId::get),
            title: changes.title.as_str(),
            content: changes.content.as_str(),
            rating: changes.rating.map(Rating::get),
            created_at: changes.timestamp,
            updated_at: changes.timestamp,
        }
    }
}

impl<'a> From<&'a IdeaChanges> for IdeaChangeset<'a> {
    fn from(changes: &'a IdeaChanges) -> Self {
        Self {
            title: changes.title.as_str(),
            content: changes.content.as_str(),
            rating: changes.rating.map(Rating::get),
            updated_at: changes.timestamp,
        }
    }
}
