//! Idea listing, detail and the create/update workflow.

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::content::{ContentKind, ContentRef};
use crate::domain::idea::{Idea, IdeaChanges};
use crate::domain::language::{LanguageCode, LanguageSettings};
use crate::domain::multilingual::MultilingualSchema;
use crate::domain::translation::{IdeaTranslation, TranslatableAttribute, resolve_attribute};
use crate::domain::types::{CategoryId, IdeaId, UserId};
use crate::dto::categories::CategoryDto;
use crate::dto::ideas::{
    FacetsDto, IdeaDetailDto, IdeaDto, IdeaListing, RatingOptionDto, TranslationSlotDto,
};
use crate::forms::FieldErrors;
use crate::forms::ideas::{IdeaFilterForm, IdeaForm};
use crate::pagination::{Paginated, clamp_page, page_count};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CategoryListQuery, CategoryReader, IdeaListQuery, IdeaReader, IdeaWriter, ReactionReader,
    TranslationReader,
};

use super::{ServiceError, ServiceResult};

/// State of the edit workflow: creating a new idea or updating a loaded one.
#[derive(Debug, Clone, PartialEq)]
pub enum IdeaEditState {
    Create,
    Update(Idea),
}

impl IdeaEditState {
    /// `None` starts a creation; an id loads the idea to update.
    pub fn load<R>(id: Option<IdeaId>, repo: &R) -> ServiceResult<Self>
    where
        R: IdeaReader,
    {
        let Some(id) = id else {
            return Ok(Self::Create);
        };
        match repo.get_idea_by_id(id) {
            Ok(Some(idea)) => Ok(Self::Update(idea)),
            Ok(None) => Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to get idea: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    pub fn idea_id(&self) -> Option<IdeaId> {
        match self {
            Self::Create => None,
            Self::Update(idea) => Some(idea.id),
        }
    }
}

/// Translations of `ideas` into `language`, keyed by idea. Empty for the
/// default language, whose text is the canonical one.
fn translations_for<R>(
    ideas: &[Idea],
    language: &LanguageCode,
    languages: &LanguageSettings,
    repo: &R,
) -> ServiceResult<HashMap<IdeaId, IdeaTranslation>>
where
    R: TranslationReader,
{
    if languages.is_default(language) || ideas.is_empty() {
        return Ok(HashMap::new());
    }
    let ids: Vec<IdeaId> = ideas.iter().map(|idea| idea.id).collect();
    let translations = repo.list_translations_in(&ids, language).map_err(|e| {
        log::error!("Failed to list translations: {e}");
        ServiceError::Internal
    })?;
    Ok(translations.into_iter().map(|t| (t.idea_id, t)).collect())
}

fn categories_for<R>(
    ids: Vec<CategoryId>,
    language: &LanguageCode,
    schema: &MultilingualSchema,
    repo: &R,
) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let (_total, categories) = repo
        .list_categories(CategoryListQuery::default().ids(ids))
        .map_err(|e| {
            log::error!("Failed to list categories: {e}");
            ServiceError::Internal
        })?;
    categories
        .iter()
        .map(|category| CategoryDto::resolve(category, schema, language).map_err(Into::into))
        .collect()
}

/// One page of ideas, newest first, narrowed by the form's facets and
/// resolved for `language`.
///
/// A page below the first yields the first page, one past the end the last.
pub fn list_ideas<R>(
    form: &IdeaFilterForm,
    language: &str,
    schema: &MultilingualSchema,
    per_page: usize,
    repo: &R,
) -> ServiceResult<IdeaListing>
where
    R: IdeaReader + TranslationReader + CategoryReader,
{
    let languages = schema.settings();
    let language = languages.parse(language)?;
    let filter = form.filter();
    let per_page = per_page.max(1);

    let query = |page: usize| {
        IdeaListQuery::default()
            .filter(filter.clone())
            .paginate(page, per_page)
    };

    let mut page = form.page().max(1);
    let (mut total, mut ideas) = repo.list_ideas(query(page)).map_err(|e| {
        log::error!("Failed to list ideas: {e}");
        ServiceError::Internal
    })?;
    let mut pages = page_count(total, per_page);
    if page > pages {
        page = clamp_page(page, pages);
        (total, ideas) = repo.list_ideas(query(page)).map_err(|e| {
            log::error!("Failed to list ideas: {e}");
            ServiceError::Internal
        })?;
        pages = page_count(total, per_page);
    }

    let translations = translations_for(&ideas, &language, languages, repo)?;
    let ideas = Paginated::new(ideas, page, pages)
        .map(|idea| IdeaDto::new(&idea, translations.get(&idea.id)));

    let options = repo.list_facet_options().map_err(|e| {
        log::error!("Failed to list facet options: {e}");
        ServiceError::Internal
    })?;

    let facets = FacetsDto {
        selected: filter.selected(),
        authors: options.authors.iter().map(|id| id.get()).collect(),
        categories: categories_for(options.categories, &language, schema, repo)?,
        ratings: options
            .ratings
            .iter()
            .map(|rating| RatingOptionDto {
                value: rating.get(),
                label: rating.label(),
            })
            .collect(),
    };

    Ok(IdeaListing {
        ideas,
        facets,
    })
}

/// Idea detail resolved for `language`.
pub fn show_idea<R>(
    id: IdeaId,
    language: &str,
    schema: &MultilingualSchema,
    repo: &R,
) -> ServiceResult<IdeaDetailDto>
where
    R: IdeaReader + TranslationReader + CategoryReader + ReactionReader,
{
    let language = schema.settings().parse(language)?;

    let idea = match repo.get_idea_by_id(id) {
        Ok(Some(idea)) => idea,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get idea: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let translations =
        translations_for(std::slice::from_ref(&idea), &language, schema.settings(), repo)?;
    let categories = categories_for(idea.category_ids.clone(), &language, schema, repo)?;

    let target = ContentRef::new(ContentKind::Idea, idea.id.get())?;
    let likes = repo.count_likes(target).map_err(|e| {
        log::error!("Failed to count likes: {e}");
        ServiceError::Internal
    })?;

    Ok(IdeaDetailDto {
        idea: IdeaDto::new(&idea, translations.get(&idea.id)),
        categories,
        likes,
    })
}

/// Runs the edit workflow.
///
/// The form is validated as a unit, then checks that need the store are
/// made. Only when everything passes is the idea written, with its
/// translations and categories, in one transaction. On any failure nothing is
/// written and the collected field errors are returned.
///
/// `author_id` is attached on creation; updates keep the stored author.
pub fn save_idea<R>(
    state: &IdeaEditState,
    form: IdeaForm,
    author_id: Option<UserId>,
    languages: &LanguageSettings,
    repo: &R,
) -> ServiceResult<IdeaId>
where
    R: IdeaReader + IdeaWriter + CategoryReader,
{
    let payload = form.into_payload(languages)?;

    let author_id = match state {
        IdeaEditState::Create => author_id,
        IdeaEditState::Update(idea) => idea.author_id,
    };

    let mut errors = FieldErrors::new();

    if let Some(author_id) = author_id {
        let taken = repo
            .idea_title_taken(author_id, &payload.title, state.idea_id())
            .map_err(|e| {
                log::error!("Failed to check idea title: {e}");
                ServiceError::Internal
            })?;
        if taken {
            errors.add("title", "you already have an idea with this title");
        }
    }

    if !payload.category_ids.is_empty() {
        let (found, _) = repo
            .list_categories(CategoryListQuery::default().ids(payload.category_ids.clone()))
            .map_err(|e| {
                log::error!("Failed to list categories: {e}");
                ServiceError::Internal
            })?;
        if found != payload.category_ids.len() {
            errors.add("categories", "select existing categories only");
        }
    }

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    let changes = IdeaChanges {
        id: state.idea_id(),
        author_id,
        title: payload.title,
        content: payload.content,
        rating: payload.rating,
        category_ids: payload.category_ids,
        translations: payload.translations,
        removed_languages: payload.removed_languages,
        timestamp: Utc::now().naive_utc(),
    };

    match repo.save_idea(&changes) {
        Ok(id) => Ok(id),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        // Lost a race with a concurrent save of the same title.
        Err(RepositoryError::Duplicate(e)) => {
            log::warn!("Rejected duplicate idea title: {e}");
            let mut errors = FieldErrors::new();
            errors.add("title", "you already have an idea with this title");
            Err(ServiceError::Validation(errors))
        }
        Err(e) => {
            log::error!("Failed to save idea: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes an idea with its translations, category links, likes and comments.
pub fn delete_idea<R>(id: IdeaId, repo: &R) -> ServiceResult<()>
where
    R: IdeaReader + IdeaWriter,
{
    match repo.get_idea_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get idea: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_idea(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete idea: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// One sub-form per translatable language, in configured order, filled with
/// the stored translation where there is one.
pub fn idea_translations<R>(
    id: IdeaId,
    languages: &LanguageSettings,
    repo: &R,
) -> ServiceResult<Vec<TranslationSlotDto>>
where
    R: IdeaReader + TranslationReader,
{
    match repo.get_idea_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get idea: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let stored = repo.list_translations(id).map_err(|e| {
        log::error!("Failed to list translations: {e}");
        ServiceError::Internal
    })?;

    Ok(languages
        .translation_languages()
        .map(|language| match stored.iter().find(|t| &t.language == language) {
            Some(t) => TranslationSlotDto {
                language: language.to_string(),
                title: t.title.as_str().to_string(),
                content: t.content.as_str().to_string(),
                exists: true,
            },
            None => TranslationSlotDto {
                language: language.to_string(),
                title: String::new(),
                content: String::new(),
                exists: false,
            },
        })
        .collect())
}

/// Text indexed for search in `language`: title, content and category
/// titles, one per line.
pub fn idea_search_text<R>(
    id: IdeaId,
    language: &str,
    schema: &MultilingualSchema,
    repo: &R,
) -> ServiceResult<String>
where
    R: IdeaReader + TranslationReader + CategoryReader,
{
    let language = schema.settings().parse(language)?;

    let idea = match repo.get_idea_by_id(id) {
        Ok(Some(idea)) => idea,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get idea: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let translations =
        translations_for(std::slice::from_ref(&idea), &language, schema.settings(), repo)?;
    let translation = translations.get(&idea.id);

    let mut lines = vec![
        resolve_attribute(&idea, translation, TranslatableAttribute::Title).to_string(),
        resolve_attribute(&idea, translation, TranslatableAttribute::Content).to_string(),
    ];
    lines.extend(
        categories_for(idea.category_ids.clone(), &language, schema, repo)?
            .into_iter()
            .filter_map(|category| category.title),
    );

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::facets::SelectedFacet;
    use crate::domain::facets::tests::sample_idea;
    use crate::domain::language::test_settings;
    use crate::domain::multilingual::MultilingualText;
    use crate::domain::types::{CategorySlug, TranslationContent, TranslationId, TranslationTitle};
    use crate::forms::ideas::TranslationForm;
    use crate::repository::test::TestRepository;

    fn schema() -> MultilingualSchema {
        MultilingualSchema::new(&test_settings()).unwrap()
    }

    fn category(id: i32, en: &str, fr: Option<&str>) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            slug: CategorySlug::new(format!("c{id}")).unwrap(),
            title: MultilingualText::from_slots([
                Some(en.to_string()),
                None,
                fr.map(str::to_string),
                None,
            ]),
        }
    }

    fn french(id: i32, idea_id: i32, title: &str) -> IdeaTranslation {
        IdeaTranslation {
            id: TranslationId::new(id).unwrap(),
            idea_id: IdeaId::new(idea_id).unwrap(),
            language: LanguageCode::new("fr").unwrap(),
            title: TranslationTitle::new(title).unwrap(),
            content: TranslationContent::new("Contenu").unwrap(),
        }
    }

    fn scenario_repo() -> TestRepository {
        TestRepository::new(
            vec![
                sample_idea(1, 1, &[1], 3),
                sample_idea(2, 1, &[2], 5),
                sample_idea(3, 2, &[1], 3),
            ],
            vec![french(1, 1, "Idée 1")],
        )
        .with_categories(vec![
            category(1, "Cities", Some("Villes")),
            category(2, "Energy", None),
        ])
    }

    fn form() -> IdeaForm {
        IdeaForm {
            title: "Rooftop gardens".into(),
            content: "Grow food on roofs.".into(),
            rating: Some(4),
            categories: vec![1],
            translations: vec![TranslationForm {
                language: "fr".into(),
                title: "Jardins sur les toits".into(),
                content: "Cultiver sur les toits.".into(),
                delete: false,
            }],
        }
    }

    #[test]
    fn category_facet_narrows_list_but_not_options() {
        let repo = scenario_repo();
        let filter = IdeaFilterForm {
            category: Some("1".into()),
            ..Default::default()
        };

        let listing = list_ideas(&filter, "en", &schema(), 24, &repo).unwrap();

        let ids: Vec<i32> = listing.ideas.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(
            listing.facets.selected,
            vec![SelectedFacet::Category {
                id: CategoryId::new(1).unwrap()
            }]
        );
        assert_eq!(listing.facets.authors, vec![1, 2]);
        let ratings: Vec<i32> = listing.facets.ratings.iter().map(|r| r.value).collect();
        assert_eq!(ratings, vec![3, 5]);
        assert_eq!(listing.facets.categories.len(), 2);
    }

    #[test]
    fn list_resolves_translations_for_language() {
        let repo = scenario_repo();
        let listing =
            list_ideas(&IdeaFilterForm::default(), "fr", &schema(), 24, &repo).unwrap();

        let first = listing.ideas.items.iter().find(|i| i.id == 1).unwrap();
        assert_eq!(first.title, "Idée 1");
        assert!(first.translated);
        let second = listing.ideas.items.iter().find(|i| i.id == 2).unwrap();
        assert_eq!(second.title, "Idea 2");
        assert!(!second.translated);
        let cities = &listing.facets.categories[0];
        assert_eq!(cities.title.as_deref(), Some("Villes"));
    }

    #[test]
    fn list_rejects_unsupported_language() {
        let repo = scenario_repo();
        let err = list_ideas(&IdeaFilterForm::default(), "es", &schema(), 24, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidLanguage(_)));
    }

    #[test]
    fn list_clamps_page_past_the_end() {
        let repo = scenario_repo();
        let filter = IdeaFilterForm {
            page: Some("9".into()),
            ..Default::default()
        };
        let listing = list_ideas(&filter, "en", &schema(), 2, &repo).unwrap();
        assert_eq!(listing.ideas.page, 2);
        assert_eq!(listing.ideas.pages, 2);
        let ids: Vec<i32> = listing.ideas.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn list_resolves_huge_page_to_last() {
        let repo = scenario_repo();
        let filter = IdeaFilterForm {
            page: Some(usize::MAX.to_string()),
            ..Default::default()
        };
        let listing = list_ideas(&filter, "en", &schema(), 2, &repo).unwrap();
        assert_eq!(listing.ideas.page, 2);
        assert_eq!(listing.ideas.pages, 2);
        assert_eq!(listing.ideas.items.len(), 1);
    }

    #[test]
    fn creates_idea_with_translation() {
        let repo = scenario_repo();
        let author = UserId::new(7).unwrap();

        let id = save_idea(
            &IdeaEditState::Create,
            form(),
            Some(author),
            &test_settings(),
            &repo,
        )
        .unwrap();

        let idea = repo.get_idea_by_id(id).unwrap().unwrap();
        assert_eq!(idea.author_id, Some(author));
        assert_eq!(idea.category_ids, vec![CategoryId::new(1).unwrap()]);
        let translations = repo.list_translations(id).unwrap();
        assert_eq!(translations.len(), 1);
        assert_eq!(translations[0].title, "Jardins sur les toits");
    }

    #[test]
    fn padded_title_writes_nothing() {
        let repo = scenario_repo();
        let mut form = form();
        form.title = "  Bad Title  ".into();

        let err = save_idea(&IdeaEditState::Create, form, None, &test_settings(), &repo)
            .unwrap_err();

        match err {
            ServiceError::Validation(errors) => assert!(errors.contains("title")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.ideas().len(), 3);
        assert_eq!(repo.translations().len(), 1);
    }

    #[test]
    fn invalid_translation_aborts_update() {
        let repo = scenario_repo();
        let state = IdeaEditState::load(Some(IdeaId::new(1).unwrap()), &repo).unwrap();
        let before_idea = repo.get_idea_by_id(IdeaId::new(1).unwrap()).unwrap();
        let before_translations = repo.translations();

        let mut form = form();
        form.translations.push(TranslationForm {
            language: "de".into(),
            title: "Dachgärten".into(),
            content: String::new(),
            delete: false,
        });

        let err = save_idea(&state, form, None, &test_settings(), &repo).unwrap_err();

        assert!(
            matches!(err, ServiceError::Validation(ref e) if e.contains("translations-1-content"))
        );
        assert_eq!(repo.get_idea_by_id(IdeaId::new(1).unwrap()).unwrap(), before_idea);
        assert_eq!(repo.translations(), before_translations);
    }

    #[test]
    fn update_keeps_author_and_enforces_title_per_author() {
        let repo = scenario_repo();
        let state = IdeaEditState::load(Some(IdeaId::new(1).unwrap()), &repo).unwrap();

        let mut form = form();
        form.title = "Idea 2".into();
        let err = save_idea(&state, form, UserId::new(9).ok(), &test_settings(), &repo)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("title")));

        // Another author's title is free to reuse.
        let mut form = self::form();
        form.title = "Idea 3".into();
        let id = save_idea(&state, form, UserId::new(9).ok(), &test_settings(), &repo).unwrap();
        let idea = repo.get_idea_by_id(id).unwrap().unwrap();
        assert_eq!(idea.author_id, Some(UserId::new(1).unwrap()));
        assert_eq!(idea.title, "Idea 3");
    }

    #[test]
    fn update_removes_marked_translations() {
        let repo = scenario_repo();
        let state = IdeaEditState::load(Some(IdeaId::new(1).unwrap()), &repo).unwrap();
        let mut form = form();
        form.translations = vec![TranslationForm {
            language: "fr".into(),
            delete: true,
            ..Default::default()
        }];

        save_idea(&state, form, None, &test_settings(), &repo).unwrap();
        assert!(repo.list_translations(IdeaId::new(1).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn unknown_category_is_a_field_error() {
        let repo = scenario_repo();
        let mut form = form();
        form.categories = vec![1, 42];
        let err = save_idea(&IdeaEditState::Create, form, None, &test_settings(), &repo)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("categories")));
        assert_eq!(repo.ideas().len(), 3);
    }

    #[test]
    fn loading_missing_idea_is_not_found() {
        let repo = scenario_repo();
        let err = IdeaEditState::load(Some(IdeaId::new(99).unwrap()), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
        assert_eq!(IdeaEditState::load(None, &repo).unwrap(), IdeaEditState::Create);
    }

    #[test]
    fn repository_failure_is_internal() {
        let repo = scenario_repo().with_failing_writes();
        let err = save_idea(&IdeaEditState::Create, form(), None, &test_settings(), &repo)
            .unwrap_err();
        assert_eq!(err, ServiceError::Internal);
    }

    #[test]
    fn duplicate_title_from_write_is_a_field_error() {
        let repo = scenario_repo().with_stale_title_check();
        let author = repo.ideas()[0].author_id;
        let mut form = form();
        form.title = repo.ideas()[0].title.as_str().to_string();

        let err = save_idea(&IdeaEditState::Create, form, author, &test_settings(), &repo)
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("title")));
        assert_eq!(repo.ideas().len(), scenario_repo().ideas().len());
    }

    #[test]
    fn delete_cascades_to_translations() {
        let repo = scenario_repo();
        delete_idea(IdeaId::new(1).unwrap(), &repo).unwrap();
        assert!(repo.translations().is_empty());
        assert_eq!(
            delete_idea(IdeaId::new(1).unwrap(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn translation_slots_cover_every_translatable_language() {
        let repo = scenario_repo();
        let slots = idea_translations(IdeaId::new(1).unwrap(), &test_settings(), &repo).unwrap();
        let languages: Vec<&str> = slots.iter().map(|s| s.language.as_str()).collect();
        assert_eq!(languages, vec!["ru", "fr", "de"]);
        assert!(slots[1].exists);
        assert_eq!(slots[1].title, "Idée 1");
        assert!(!slots[0].exists);
    }

    #[test]
    fn search_text_joins_translated_fields_and_categories() {
        let repo = scenario_repo();
        let text = idea_search_text(IdeaId::new(1).unwrap(), "fr", &schema(), &repo).unwrap();
        assert_eq!(text, "Idée 1\nContenu\nVilles");
    }

    #[test]
    fn detail_counts_likes() {
        let repo = scenario_repo();
        let detail = show_idea(IdeaId::new(3).unwrap(), "en", &schema(), &repo).unwrap();
        assert_eq!(detail.idea.title, "Idea 3");
        assert_eq!(detail.categories[0].title.as_deref(), Some("Cities"));
        assert_eq!(detail.likes, 0);
    }
}
