use crate::domain::multilingual::MultilingualSchema;
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryTitlesDto};
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// All categories with titles resolved for `language`.
pub fn show_categories<R>(
    language: &str,
    schema: &MultilingualSchema,
    repo: &R,
) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    let language = schema.settings().parse(language)?;

    match repo.list_categories(CategoryListQuery::default()) {
        Ok((_total, categories)) => categories
            .iter()
            .map(|category| {
                CategoryDto::resolve(category, schema, &language).map_err(ServiceError::from)
            })
            .collect(),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Every stored title of a category, for the edit surface.
pub fn show_category<R>(id: CategoryId, repo: &R) -> ServiceResult<CategoryTitlesDto>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(CategoryTitlesDto::from(&category)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(
    form: CategoryForm,
    schema: &MultilingualSchema,
    repo: &R,
) -> ServiceResult<CategoryId>
where
    R: CategoryWriter,
{
    let category = form.into_payload(schema)?.into_new_category();

    repo.create_category(&category).map_err(|e| {
        log::error!("Failed to create category: {e}");
        ServiceError::Internal
    })
}

/// Overwrites the slug and every title column.
pub fn update_category<R>(
    id: CategoryId,
    form: CategoryForm,
    schema: &MultilingualSchema,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    let category = form.into_payload(schema)?.into_new_category();

    match repo.get_category_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_category(id, &category) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a category. Ideas linked to it are kept and lose the link.
pub fn delete_category<R>(id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::facets::tests::sample_idea;
    use crate::domain::language::test_settings;
    use crate::domain::multilingual::MultilingualText;
    use crate::domain::types::CategorySlug;
    use crate::forms::categories::CategoryTitleForm;
    use crate::repository::test::TestRepository;

    fn schema() -> MultilingualSchema {
        MultilingualSchema::new(&test_settings()).unwrap()
    }

    fn sample_category() -> Category {
        Category {
            id: CategoryId::new(1).unwrap(),
            slug: CategorySlug::new("cities").unwrap(),
            title: MultilingualText::from_slots([
                Some("Cities".into()),
                Some("Города".into()),
                None,
                None,
            ]),
        }
    }

    fn form(slug: &str, titles: &[(&str, &str)]) -> CategoryForm {
        CategoryForm {
            slug: slug.into(),
            titles: titles
                .iter()
                .map(|(language, title)| CategoryTitleForm {
                    language: language.to_string(),
                    title: title.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn shows_titles_with_default_fallback() {
        let repo = TestRepository::default().with_categories(vec![sample_category()]);

        let ru = show_categories("ru", &schema(), &repo).unwrap();
        assert_eq!(ru[0].title.as_deref(), Some("Города"));
        let fr = show_categories("fr", &schema(), &repo).unwrap();
        assert_eq!(fr[0].title.as_deref(), Some("Cities"));

        let err = show_categories("es", &schema(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidLanguage(_)));
    }

    #[test]
    fn add_then_update_category() {
        let repo = TestRepository::default();
        let id = add_category(form("energy", &[("en", "Energy")]), &schema(), &repo).unwrap();

        update_category(
            id,
            form("energy", &[("en", "Energy"), ("de", "Energie")]),
            &schema(),
            &repo,
        )
        .unwrap();

        let titles = show_category(id, &repo).unwrap();
        assert_eq!(titles.titles[3], ("de".to_string(), Some("Energie".to_string())));
    }

    #[test]
    fn add_requires_default_title() {
        let repo = TestRepository::default();
        let err = add_category(form("energy", &[("de", "Energie")]), &schema(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("titles")));
        assert!(repo.categories().is_empty());
    }

    #[test]
    fn delete_keeps_ideas_and_clears_links() {
        let repo = TestRepository::new(vec![sample_idea(1, 1, &[1], 3)], vec![])
            .with_categories(vec![sample_category()]);

        delete_category(CategoryId::new(1).unwrap(), &repo).unwrap();

        let ideas = repo.ideas();
        assert_eq!(ideas.len(), 1);
        assert!(ideas[0].category_ids.is_empty());
        assert_eq!(
            delete_category(CategoryId::new(1).unwrap(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }
}
