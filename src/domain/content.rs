//! Polymorphic targets for likes and comments.
//!
//! Instead of a generic (type, id) foreign key, the set of attachable kinds is
//! enumerated and each kind is resolved by its own repository.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::article::NewsArticle;
use crate::domain::category::Category;
use crate::domain::idea::Idea;
use crate::domain::types::{CommentId, CommentText, LikeId, TypeConstraintError, UserId};

/// Kinds of records that likes and comments can attach to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Idea,
    Category,
    NewsArticle,
}

impl ContentKind {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Category => "category",
            Self::NewsArticle => "news_article",
        }
    }

    /// Comments are limited to ideas and news articles.
    pub const fn accepts_comments(self) -> bool {
        matches!(self, Self::Idea | Self::NewsArticle)
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ContentKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "idea" => Ok(Self::Idea),
            "category" => Ok(Self::Category),
            "news_article" => Ok(Self::NewsArticle),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "content kind: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for ContentKind {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Reference to a concrete record of a given kind.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: i32,
}

impl ContentRef {
    pub fn new(kind: ContentKind, id: i32) -> Result<Self, TypeConstraintError> {
        if id > 0 {
            Ok(Self { kind, id })
        } else {
            Err(TypeConstraintError::NonPositiveId("object_id"))
        }
    }
}

impl Display for ContentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// A resolved [`ContentRef`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentObject {
    Idea(Idea),
    Category(Category),
    NewsArticle(NewsArticle),
}

impl ContentObject {
    pub fn content_ref(&self) -> ContentRef {
        match self {
            Self::Idea(idea) => ContentRef {
                kind: ContentKind::Idea,
                id: idea.id.get(),
            },
            Self::Category(category) => ContentRef {
                kind: ContentKind::Category,
                id: category.id.get(),
            },
            Self::NewsArticle(article) => ContentRef {
                kind: ContentKind::NewsArticle,
                id: article.id.get(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Like {
    pub id: LikeId,
    pub owner_id: UserId,
    pub target: ContentRef,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLike {
    pub owner_id: UserId,
    pub target: ContentRef,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub commentator_id: UserId,
    pub target: ContentRef,
    pub text: Option<CommentText>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub commentator_id: UserId,
    pub target: ContentRef,
    pub text: Option<CommentText>,
    pub created_at: NaiveDateTime,
}
