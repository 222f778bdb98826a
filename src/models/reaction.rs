use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::content::{
    Comment as DomainComment, ContentKind, ContentRef, Like as DomainLike,
    NewComment as DomainNewComment, NewLike as DomainNewLike,
};
use crate::domain::types::{CommentText, TypeConstraintError, UserId};

/// Diesel model representing the `likes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::likes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Like {
    pub id: i32,
    pub owner_id: i32,
    pub content_kind: String,
    pub object_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::likes)]
pub struct NewLike {
    pub owner_id: i32,
    pub content_kind: &'static str,
    pub object_id: i32,
    pub created_at: NaiveDateTime,
}

/// Diesel model representing the `comments` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Comment {
    pub id: i32,
    pub commentator_id: i32,
    pub content_kind: String,
    pub object_id: i32,
    pub text: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub commentator_id: i32,
    pub content_kind: &'static str,
    pub object_id: i32,
    pub text: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Like> for DomainLike {
    type Error = TypeConstraintError;

    fn try_from(like: Like) -> Result<Self, Self::Error> {
        Ok(Self {
            id: like.id.try_into()?,
            owner_id: UserId::new(like.owner_id)?,
            target: ContentRef::new(ContentKind::try_from(like.content_kind)?, like.object_id)?,
            created_at: like.created_at,
        })
    }
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(comment: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: comment.id.try_into()?,
            commentator_id: UserId::new(comment.commentator_id)?,
            target: ContentRef::new(
                ContentKind::try_from(comment.content_kind)?,
                comment.object_id,
            )?,
            text: comment.text.map(CommentText::new).transpose()?,
            created_at: comment.created_at,
        })
    }
}

impl From<&DomainNewLike> for NewLike {
    fn from(like: &DomainNewLike) -> Self {
        Self {
            owner_id: like.owner_id.get(),
            content_kind: like.target.kind.as_str(),
            object_id: like.target.id,
            created_at: like.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(comment: &'a DomainNewComment) -> Self {
        Self {
            commentator_id: comment.commentator_id.get(),
            content_kind: comment.target.kind.as_str(),
            object_id: comment.target.id,
            text: comment.text.as_ref().map(CommentText::as_str),
            created_at: comment.created_at,
        }
    }
}
