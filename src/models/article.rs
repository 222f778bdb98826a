use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{
    NewNewsArticle as DomainNewNewsArticle, NewsArticle as DomainNewsArticle,
};
use crate::domain::types::{ArticleBody, ArticleTitle, TypeConstraintError};

/// Diesel model representing the `news_articles` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::news_articles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewsArticle {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub theme: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::news_articles)]
pub struct NewNewsArticle<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub theme: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<NewsArticle> for DomainNewsArticle {
    type Error = TypeConstraintError;

    fn try_from(article: NewsArticle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: article.id.try_into()?,
            title: ArticleTitle::new(article.title)?,
            body: ArticleBody::new(article.body)?,
            theme: article.theme,
            created_at: article.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewNewsArticle> for NewNewsArticle<'a> {
    fn from(article: &'a DomainNewNewsArticle) -> Self {
        Self {
            title: article.title.as_str(),
            body: article.body.as_str(),
            theme: article.theme.as_str(),
            created_at: article.created_at,
        }
    }
}
