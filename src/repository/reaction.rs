use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::content::{Comment, ContentKind, ContentRef, Like, NewComment, NewLike};
use crate::domain::types::UserId;
use crate::models::reaction::{
    Comment as DbComment, Like as DbLike, NewComment as DbNewComment, NewLike as DbNewLike,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ReactionReader, ReactionWriter};

/// Remove likes and comments attached to a record that is being deleted.
/// Polymorphic targets carry no foreign key, so nothing cascades on its own.
pub(crate) fn delete_reactions(
    conn: &mut SqliteConnection,
    kind: ContentKind,
    object_id: i32,
) -> QueryResult<usize> {
    use crate::schema::{comments, likes};

    let likes = diesel::delete(
        likes::table
            .filter(likes::content_kind.eq(kind.as_str()))
            .filter(likes::object_id.eq(object_id)),
    )
    .execute(conn)?;
    let comments = diesel::delete(
        comments::table
            .filter(comments::content_kind.eq(kind.as_str()))
            .filter(comments::object_id.eq(object_id)),
    )
    .execute(conn)?;

    Ok(likes + comments)
}

impl ReactionReader for DieselRepository {
    fn count_likes(&self, target: ContentRef) -> RepositoryResult<usize> {
        use crate::schema::likes;

        let mut conn = self.conn()?;

        let count = likes::table
            .filter(likes::content_kind.eq(target.kind.as_str()))
            .filter(likes::object_id.eq(target.id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }

    fn get_like(&self, owner_id: UserId, target: ContentRef) -> RepositoryResult<Option<Like>> {
        use crate::schema::likes;

        let mut conn = self.conn()?;

        let like = likes::table
            .filter(likes::owner_id.eq(owner_id.get()))
            .filter(likes::content_kind.eq(target.kind.as_str()))
            .filter(likes::object_id.eq(target.id))
            .first::<DbLike>(&mut conn)
            .optional()?;

        let like = like.map(TryInto::try_into).transpose()?;
        Ok(like)
    }

    fn list_comments(&self, target: ContentRef) -> RepositoryResult<Vec<Comment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let items = comments::table
            .filter(comments::content_kind.eq(target.kind.as_str()))
            .filter(comments::object_id.eq(target.id))
            .order((comments::created_at.asc(), comments::id.asc()))
            .load::<DbComment>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Comment>, _>>()?;

        Ok(items)
    }
}

impl ReactionWriter for DieselRepository {
    fn create_like(&self, like: &NewLike) -> RepositoryResult<usize> {
        use crate::schema::likes;

        let mut conn = self.conn()?;

        let affected = diesel::insert_into(likes::table)
            .values(DbNewLike::from(like))
            .on_conflict((likes::owner_id, likes::content_kind, likes::object_id))
            .do_nothing()
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_like(&self, owner_id: UserId, target: ContentRef) -> RepositoryResult<usize> {
        use crate::schema::likes;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            likes::table
                .filter(likes::owner_id.eq(owner_id.get()))
                .filter(likes::content_kind.eq(target.kind.as_str()))
                .filter(likes::object_id.eq(target.id)),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let affected = diesel::insert_into(comments::table)
            .values(DbNewComment::from(comment))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
