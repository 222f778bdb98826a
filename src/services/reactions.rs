//! Likes and comments on ideas, categories and news articles.

use chrono::Utc;

use crate::domain::content::{ContentKind, ContentObject, ContentRef, NewComment, NewLike};
use crate::domain::types::{ArticleId, CategoryId, IdeaId, UserId};
use crate::dto::articles::CommentDto;
use crate::forms::reactions::{CommentForm, CommentFormPayload};
use crate::repository::{
    ArticleReader, CategoryReader, IdeaReader, ReactionReader, ReactionWriter,
};

use super::{ServiceError, ServiceResult};

/// Loads the record a reference points to, asking the reader of its kind.
pub fn resolve_content<R>(target: ContentRef, repo: &R) -> ServiceResult<ContentObject>
where
    R: IdeaReader + CategoryReader + ArticleReader,
{
    let found = match target.kind {
        ContentKind::Idea => repo
            .get_idea_by_id(IdeaId::new(target.id)?)
            .map(|idea| idea.map(ContentObject::Idea)),
        ContentKind::Category => repo
            .get_category_by_id(CategoryId::new(target.id)?)
            .map(|category| category.map(ContentObject::Category)),
        ContentKind::NewsArticle => repo
            .get_article_by_id(ArticleId::new(target.id)?)
            .map(|article| article.map(ContentObject::NewsArticle)),
    };

    match found {
        Ok(Some(object)) => Ok(object),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to resolve {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Likes a record. Liking it again changes nothing.
pub fn like<R>(owner_id: UserId, target: ContentRef, repo: &R) -> ServiceResult<()>
where
    R: IdeaReader + CategoryReader + ArticleReader + ReactionWriter,
{
    resolve_content(target, repo)?;

    let like = NewLike {
        owner_id,
        target,
        created_at: Utc::now().naive_utc(),
    };
    match repo.create_like(&like) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to like {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Removes a like if there is one.
pub fn unlike<R>(owner_id: UserId, target: ContentRef, repo: &R) -> ServiceResult<()>
where
    R: ReactionWriter,
{
    match repo.delete_like(owner_id, target) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to unlike {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn count_likes<R>(target: ContentRef, repo: &R) -> ServiceResult<usize>
where
    R: ReactionReader,
{
    repo.count_likes(target).map_err(|e| {
        log::error!("Failed to count likes of {target}: {e}");
        ServiceError::Internal
    })
}

/// Whether `owner_id` currently likes the record.
pub fn has_liked<R>(owner_id: UserId, target: ContentRef, repo: &R) -> ServiceResult<bool>
where
    R: ReactionReader,
{
    match repo.get_like(owner_id, target) {
        Ok(like) => Ok(like.is_some()),
        Err(e) => {
            log::error!("Failed to get like of {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Comments on an idea or a news article.
pub fn add_comment<R>(
    commentator_id: UserId,
    target: ContentRef,
    form: CommentForm,
    repo: &R,
) -> ServiceResult<()>
where
    R: IdeaReader + CategoryReader + ArticleReader + ReactionWriter,
{
    if !target.kind.accepts_comments() {
        return Err(ServiceError::Form(format!(
            "{} does not accept comments",
            target.kind
        )));
    }
    let payload = CommentFormPayload::try_from(form)?;
    resolve_content(target, repo)?;

    let comment = NewComment {
        commentator_id,
        target,
        text: payload.text,
        created_at: Utc::now().naive_utc(),
    };
    match repo.create_comment(&comment) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to comment on {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Comments on a record, oldest first.
pub fn list_comments<R>(target: ContentRef, repo: &R) -> ServiceResult<Vec<CommentDto>>
where
    R: ReactionReader,
{
    match repo.list_comments(target) {
        Ok(comments) => Ok(comments.into_iter().map(CommentDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list comments of {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::facets::tests::sample_idea;
    use crate::domain::multilingual::MultilingualText;
    use crate::domain::types::CategorySlug;
    use crate::repository::test::TestRepository;

    fn repo() -> TestRepository {
        TestRepository::new(vec![sample_idea(1, 1, &[], 3)], vec![]).with_categories(vec![
            Category {
                id: CategoryId::new(1).unwrap(),
                slug: CategorySlug::new("cities").unwrap(),
                title: MultilingualText::default(),
            },
        ])
    }

    fn idea_ref(id: i32) -> ContentRef {
        ContentRef::new(ContentKind::Idea, id).unwrap()
    }

    #[test]
    fn resolves_each_kind() {
        let repo = repo();
        assert!(matches!(
            resolve_content(idea_ref(1), &repo).unwrap(),
            ContentObject::Idea(_)
        ));
        let category = ContentRef::new(ContentKind::Category, 1).unwrap();
        assert_eq!(
            resolve_content(category, &repo).unwrap().content_ref(),
            category
        );
        let article = ContentRef::new(ContentKind::NewsArticle, 1).unwrap();
        assert_eq!(
            resolve_content(article, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn likes_are_idempotent() {
        let repo = repo();
        let owner = UserId::new(5).unwrap();

        like(owner, idea_ref(1), &repo).unwrap();
        like(owner, idea_ref(1), &repo).unwrap();
        assert_eq!(count_likes(idea_ref(1), &repo).unwrap(), 1);
        assert!(has_liked(owner, idea_ref(1), &repo).unwrap());
        assert!(!has_liked(UserId::new(6).unwrap(), idea_ref(1), &repo).unwrap());

        unlike(owner, idea_ref(1), &repo).unwrap();
        unlike(owner, idea_ref(1), &repo).unwrap();
        assert_eq!(count_likes(idea_ref(1), &repo).unwrap(), 0);
        assert!(!has_liked(owner, idea_ref(1), &repo).unwrap());

        assert_eq!(
            like(owner, idea_ref(2), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn comments_only_on_ideas_and_articles() {
        let repo = repo();
        let author = UserId::new(5).unwrap();

        add_comment(
            author,
            idea_ref(1),
            CommentForm {
                text: "Lovely".into(),
            },
            &repo,
        )
        .unwrap();
        add_comment(author, idea_ref(1), CommentForm::default(), &repo).unwrap();

        let comments = list_comments(idea_ref(1), &repo).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text.as_deref(), Some("Lovely"));
        assert_eq!(comments[1].text, None);

        let category = ContentRef::new(ContentKind::Category, 1).unwrap();
        let err = add_comment(author, category, CommentForm::default(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
        assert_eq!(repo.comments().len(), 2);
    }
}
