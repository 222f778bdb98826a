use crate::db::{DbConnection, DbPool};
use crate::domain::article::{NewNewsArticle, NewsArticle};
use crate::domain::category::{Category, NewCategory};
use crate::domain::content::{Comment, ContentRef, Like, NewComment, NewLike};
use crate::domain::facets::{FacetOptions, IdeaFilter};
use crate::domain::idea::{Idea, IdeaChanges};
use crate::domain::language::LanguageCode;
use crate::domain::translation::{IdeaTranslation, NewIdeaTranslation};
use crate::domain::types::{ArticleId, CategoryId, IdeaId, IdeaTitle, UserId};
use crate::pagination::Pagination;

pub use errors::{RepositoryError, RepositoryResult};

pub mod article;
pub mod category;
pub mod errors;
pub mod idea;
pub mod reaction;
pub mod translation;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing ideas.
#[derive(Debug, Clone, Default)]
pub struct IdeaListQuery {
    /// Facet criteria, applied in order.
    pub filter: IdeaFilter,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl IdeaListQuery {
    pub fn filter(mut self, filter: IdeaFilter) -> Self {
        self.filter = filter;
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Restrict to these identifiers.
    pub ids: Option<Vec<CategoryId>>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn ids(mut self, ids: Vec<CategoryId>) -> Self {
        self.ids = Some(ids);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing news articles.
#[derive(Debug, Clone, Default)]
pub struct ArticleListQuery {
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ArticleListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for idea entities.
pub trait IdeaReader {
    /// List ideas newest first, narrowed by the query's facet criteria.
    fn list_ideas(&self, query: IdeaListQuery) -> RepositoryResult<(usize, Vec<Idea>)>;
    /// Retrieve an idea by its identifier.
    fn get_idea_by_id(&self, id: IdeaId) -> RepositoryResult<Option<Idea>>;
    /// Whether `author_id` already has another idea titled `title`.
    fn idea_title_taken(
        &self,
        author_id: UserId,
        title: &IdeaTitle,
        exclude: Option<IdeaId>,
    ) -> RepositoryResult<bool>;
    /// Distinct facet values over all ideas, ignoring any filter.
    fn list_facet_options(&self) -> RepositoryResult<FacetOptions>;
}

/// Write operations for idea entities.
pub trait IdeaWriter {
    /// Apply the result of the edit workflow atomically and return the id.
    fn save_idea(&self, changes: &IdeaChanges) -> RepositoryResult<IdeaId>;
    /// Delete an idea with its translations, category links, likes and
    /// comments.
    fn delete_idea(&self, id: IdeaId) -> RepositoryResult<usize>;
}

/// Read-only operations for idea translations.
pub trait TranslationReader {
    /// Retrieve the translation of an idea into `language`.
    fn get_translation(
        &self,
        idea_id: IdeaId,
        language: &LanguageCode,
    ) -> RepositoryResult<Option<IdeaTranslation>>;
    /// All translations of an idea ordered by language code.
    fn list_translations(&self, idea_id: IdeaId) -> RepositoryResult<Vec<IdeaTranslation>>;
    /// Translations into `language` for several ideas at once.
    fn list_translations_in(
        &self,
        idea_ids: &[IdeaId],
        language: &LanguageCode,
    ) -> RepositoryResult<Vec<IdeaTranslation>>;
}

/// Write operations for idea translations.
pub trait TranslationWriter {
    /// Create or overwrite the single row for (idea, language).
    fn upsert_translation(
        &self,
        idea_id: IdeaId,
        translation: &NewIdeaTranslation,
    ) -> RepositoryResult<usize>;
    /// Remove the row for (idea, language) if present.
    fn delete_translation(&self, idea_id: IdeaId, language: &LanguageCode)
    -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryId>;
    /// Overwrite slug and every title column.
    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize>;
    /// Delete a category, unlinking it from ideas.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for news articles.
pub trait ArticleReader {
    /// List articles newest first.
    fn list_articles(&self, query: ArticleListQuery) -> RepositoryResult<(usize, Vec<NewsArticle>)>;
    /// Retrieve an article by its identifier.
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<NewsArticle>>;
}

/// Write operations for news articles.
pub trait ArticleWriter {
    /// Persist a new article.
    fn create_article(&self, article: &NewNewsArticle) -> RepositoryResult<ArticleId>;
    /// Delete an article together with its likes and comments.
    fn delete_article(&self, id: ArticleId) -> RepositoryResult<usize>;
}

/// Read-only operations for likes and comments.
pub trait ReactionReader {
    /// Number of likes on a target.
    fn count_likes(&self, target: ContentRef) -> RepositoryResult<usize>;
    /// Like of `owner_id` on a target, if any.
    fn get_like(&self, owner_id: UserId, target: ContentRef) -> RepositoryResult<Option<Like>>;
    /// Comments on a target, oldest first.
    fn list_comments(&self, target: ContentRef) -> RepositoryResult<Vec<Comment>>;
}

/// Write operations for likes and comments.
pub trait ReactionWriter {
    /// Record a like; liking twice is a no-op returning 0.
    fn create_like(&self, like: &NewLike) -> RepositoryResult<usize>;
    /// Remove a like if present.
    fn delete_like(&self, owner_id: UserId, target: ContentRef) -> RepositoryResult<usize>;
    /// Persist a comment.
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize>;
}
