use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::article::{ArticleThemes, NewsArticle};
use crate::domain::content::Comment;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewsArticleDto {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub theme: String,
    /// `None` when the stored theme is no longer configured.
    pub theme_label: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewsArticleDto {
    pub fn new(article: NewsArticle, themes: &ArticleThemes) -> Self {
        let theme_label = themes
            .choices()
            .iter()
            .find(|choice| choice.value == article.theme)
            .map(|choice| choice.label.clone());
        Self {
            id: article.id.get(),
            title: article.title.into_inner(),
            body: article.body.into_inner(),
            theme: article.theme,
            theme_label,
            created_at: article.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentDto {
    pub id: i32,
    pub commentator_id: i32,
    pub text: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Comment> for CommentDto {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id.get(),
            commentator_id: value.commentator_id.get(),
            text: value.text.map(|t| t.into_inner()),
            created_at: value.created_at,
        }
    }
}
