use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::article::{ArticleTheme, ArticleThemes, NewNewsArticle};
use crate::domain::types::{ArticleBody, ArticleTitle};
use crate::forms::FieldErrors;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewsArticleForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticleFormPayload {
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub theme: ArticleTheme,
}

impl NewsArticleFormPayload {
    pub fn into_new_article(self) -> NewNewsArticle {
        NewNewsArticle {
            title: self.title,
            body: self.body,
            theme: self.theme,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl NewsArticleForm {
    /// The theme must be one of the configured choices.
    pub fn into_payload(
        self,
        themes: &ArticleThemes,
    ) -> Result<NewsArticleFormPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            errors.extend_validation("", &e);
        }

        let title = errors.check("title", ArticleTitle::new(self.title));
        let body = errors.check("body", ArticleBody::new(self.body));
        let theme = errors.check("theme", themes.theme(&self.theme));

        match (title, body, theme) {
            (Some(title), Some(body), Some(theme)) if errors.is_empty() => {
                Ok(NewsArticleFormPayload { title, body, theme })
            }
            _ => Err(errors),
        }
    }
}
