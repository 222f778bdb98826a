use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::multilingual::MultilingualText;
use crate::domain::types::{CategorySlug, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    pub id: i32,
    pub slug: String,
    pub title_en: Option<String>,
    pub title_ru: Option<String>,
    pub title_fr: Option<String>,
    pub title_de: Option<String>,
}

/// Insertable/patchable form of [`Category`].
///
/// `treat_none_as_null` so that clearing a language slot clears the column.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct NewCategory {
    pub slug: String,
    pub title_en: Option<String>,
    pub title_ru: Option<String>,
    pub title_fr: Option<String>,
    pub title_de: Option<String>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            slug: CategorySlug::new(category.slug)?,
            title: MultilingualText::from_slots([
                category.title_en,
                category.title_ru,
                category.title_fr,
                category.title_de,
            ]),
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        let [title_en, title_ru, title_fr, title_de] = category.title.into_slots();
        Self {
            slug: category.slug.into_inner(),
            title_en,
            title_ru,
            title_fr,
            title_de,
        }
    }
}
