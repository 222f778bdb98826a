use crate::domain::article::ArticleThemes;
use crate::domain::types::ArticleId;
use crate::dto::articles::NewsArticleDto;
use crate::forms::articles::NewsArticleForm;
use crate::pagination::{Paginated, clamp_page, page_count};
use crate::repository::{ArticleListQuery, ArticleReader, ArticleWriter};

use super::{ServiceError, ServiceResult};

/// Magazine articles, newest first.
pub fn show_articles<R>(
    page: usize,
    per_page: usize,
    themes: &ArticleThemes,
    repo: &R,
) -> ServiceResult<Paginated<NewsArticleDto>>
where
    R: ArticleReader,
{
    let per_page = per_page.max(1);
    let list = |page: usize| {
        repo.list_articles(ArticleListQuery::default().paginate(page, per_page))
            .map_err(|e| {
                log::error!("Failed to list articles: {e}");
                ServiceError::Internal
            })
    };

    let mut page = page.max(1);
    let (mut total, mut articles) = list(page)?;
    if page > page_count(total, per_page) {
        page = clamp_page(page, page_count(total, per_page));
        (total, articles) = list(page)?;
    }

    Ok(Paginated::new(articles, page, page_count(total, per_page))
        .map(|article| NewsArticleDto::new(article, themes)))
}

pub fn show_article<R>(
    id: ArticleId,
    themes: &ArticleThemes,
    repo: &R,
) -> ServiceResult<NewsArticleDto>
where
    R: ArticleReader,
{
    match repo.get_article_by_id(id) {
        Ok(Some(article)) => Ok(NewsArticleDto::new(article, themes)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get article: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_article<R>(
    form: NewsArticleForm,
    themes: &ArticleThemes,
    repo: &R,
) -> ServiceResult<ArticleId>
where
    R: ArticleWriter,
{
    let article = form.into_payload(themes)?.into_new_article();

    repo.create_article(&article).map_err(|e| {
        log::error!("Failed to create article: {e}");
        ServiceError::Internal
    })
}

/// Deletes an article with its likes and comments.
pub fn delete_article<R>(id: ArticleId, repo: &R) -> ServiceResult<()>
where
    R: ArticleReader + ArticleWriter,
{
    match repo.get_article_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get article: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_article(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete article: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::NewsArticle;
    use crate::domain::types::{ArticleBody, ArticleTitle};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn article(id: i32, theme: &str) -> NewsArticle {
        NewsArticle {
            id: ArticleId::new(id).unwrap(),
            title: ArticleTitle::new(format!("Article {id}")).unwrap(),
            body: ArticleBody::new("Body").unwrap(),
            theme: theme.to_string(),
            created_at: DateTime::from_timestamp(i64::from(id), 0)
                .unwrap()
                .naive_utc(),
        }
    }

    #[test]
    fn lists_newest_first_with_theme_labels() {
        let repo = TestRepository::default().with_articles(vec![
            article(1, "wonder"),
            article(2, "retired"),
            article(3, "futurism"),
        ]);
        let themes = ArticleThemes::default();

        let page = show_articles(0, 2, &themes, &repo).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 2);
        let ids: Vec<i32> = page.items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(page.items[0].theme_label.as_deref(), Some("Futurism"));
        assert_eq!(page.items[1].theme_label, None);

        let last = show_articles(5, 2, &themes, &repo).unwrap();
        assert_eq!(last.page, 2);
        assert_eq!(last.items[0].id, 1);

        let huge = show_articles(usize::MAX, 2, &themes, &repo).unwrap();
        assert_eq!(huge.page, 2);
        assert_eq!(huge.items.len(), 1);
    }

    #[test]
    fn add_validates_theme() {
        let repo = TestRepository::default();
        let themes = ArticleThemes::default();
        let form = NewsArticleForm {
            title: "Tidal clocks".into(),
            body: "Clocks driven by tides.".into(),
            theme: "horror".into(),
        };
        let err = add_article(form, &themes, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("theme")));

        let form = NewsArticleForm {
            title: "Tidal clocks".into(),
            body: "Clocks driven by tides.".into(),
            theme: "nostalgia".into(),
        };
        let id = add_article(form, &themes, &repo).unwrap();
        assert_eq!(show_article(id, &themes, &repo).unwrap().theme, "nostalgia");

        delete_article(id, &repo).unwrap();
        assert_eq!(
            show_article(id, &themes, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }
}
