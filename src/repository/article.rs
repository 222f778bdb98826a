use diesel::prelude::*;

use crate::domain::article::{NewNewsArticle, NewsArticle};
use crate::domain::content::ContentKind;
use crate::domain::types::ArticleId;
use crate::models::article::{NewNewsArticle as DbNewNewsArticle, NewsArticle as DbNewsArticle};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::reaction::delete_reactions;
use crate::repository::{ArticleListQuery, ArticleReader, ArticleWriter, DieselRepository};

impl ArticleReader for DieselRepository {
    fn list_articles(
        &self,
        query: ArticleListQuery,
    ) -> RepositoryResult<(usize, Vec<NewsArticle>)> {
        use crate::schema::news_articles;

        let mut conn = self.conn()?;

        let total = news_articles::table
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = news_articles::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((news_articles::created_at.desc(), news_articles::id.desc()))
            .load::<DbNewsArticle>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<NewsArticle>, _>>()?;

        Ok((total, items))
    }

    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<NewsArticle>> {
        use crate::schema::news_articles;

        let mut conn = self.conn()?;

        let article = news_articles::table
            .find(id.get())
            .first::<DbNewsArticle>(&mut conn)
            .optional()?;

        let article = article.map(TryInto::try_into).transpose()?;
        Ok(article)
    }
}

impl ArticleWriter for DieselRepository {
    fn create_article(&self, article: &NewNewsArticle) -> RepositoryResult<ArticleId> {
        use crate::schema::news_articles;

        let mut conn = self.conn()?;

        let id = diesel::insert_into(news_articles::table)
            .values(DbNewNewsArticle::from(article))
            .returning(news_articles::id)
            .get_result::<i32>(&mut conn)?;

        Ok(ArticleId::new(id)?)
    }

    fn delete_article(&self, id: ArticleId) -> RepositoryResult<usize> {
        use crate::schema::news_articles;

        let mut conn = self.conn()?;

        let affected = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            delete_reactions(conn, ContentKind::NewsArticle, id.get())?;
            Ok(diesel::delete(news_articles::table.find(id.get())).execute(conn)?)
        })?;

        Ok(affected)
    }
}
