//! Reading and writing single idea translations.
//!
//! The default language is never stored as a translation: reads in it return
//! the canonical value without a lookup and writes in it are rejected.

use crate::domain::idea::Idea;
use crate::domain::language::LanguageSettings;
use crate::domain::translation::{NewIdeaTranslation, TranslatableAttribute, resolve_attribute};
use crate::domain::types::{IdeaId, TranslationContent, TranslationTitle};
use crate::dto::ideas::TranslationDto;
use crate::repository::{IdeaReader, TranslationReader, TranslationWriter};

use super::{ServiceError, ServiceResult};

/// Value of `attribute` in `language`: the translation's if one is stored,
/// otherwise the canonical value.
pub fn translated_value<R>(
    idea: &Idea,
    attribute: TranslatableAttribute,
    language: &str,
    languages: &LanguageSettings,
    repo: &R,
) -> ServiceResult<String>
where
    R: TranslationReader,
{
    let language = languages.parse(language)?;
    if languages.is_default(&language) {
        return Ok(idea.canonical_value(attribute).to_string());
    }

    let translation = repo.get_translation(idea.id, &language).map_err(|e| {
        log::error!("Failed to get translation: {e}");
        ServiceError::Internal
    })?;

    Ok(resolve_attribute(idea, translation.as_ref(), attribute).to_string())
}

fn require_idea<R: IdeaReader>(idea_id: IdeaId, repo: &R) -> ServiceResult<()> {
    match repo.get_idea_by_id(idea_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get idea: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Creates or overwrites the translation of an idea into `language`.
///
/// Concurrent calls for the same pair leave exactly one row holding one of
/// the submitted values.
pub fn upsert_translation<R>(
    idea_id: IdeaId,
    language: &str,
    title: &str,
    content: &str,
    languages: &LanguageSettings,
    repo: &R,
) -> ServiceResult<()>
where
    R: IdeaReader + TranslationWriter,
{
    let translation = NewIdeaTranslation {
        language: languages.translation_language(language)?,
        title: TranslationTitle::new(title)?,
        content: TranslationContent::new(content)?,
    };

    require_idea(idea_id, repo)?;

    repo.upsert_translation(idea_id, &translation)
        .map(|_| ())
        .map_err(|e| {
            log::error!("Failed to upsert translation: {e}");
            ServiceError::Internal
        })
}

/// Removes the translation of an idea into `language`. Removing a missing
/// translation succeeds.
pub fn delete_translation<R>(
    idea_id: IdeaId,
    language: &str,
    languages: &LanguageSettings,
    repo: &R,
) -> ServiceResult<()>
where
    R: TranslationWriter,
{
    let language = languages.translation_language(language)?;

    repo.delete_translation(idea_id, &language)
        .map(|_| ())
        .map_err(|e| {
            log::error!("Failed to delete translation: {e}");
            ServiceError::Internal
        })
}

/// Stored translations of an idea, ordered by language code.
pub fn list_translations<R>(idea_id: IdeaId, repo: &R) -> ServiceResult<Vec<TranslationDto>>
where
    R: TranslationReader,
{
    match repo.list_translations(idea_id) {
        Ok(translations) => Ok(translations.into_iter().map(TranslationDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list translations: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::facets::tests::sample_idea;
    use crate::domain::language::test_settings;
    use crate::repository::test::TestRepository;

    fn repo() -> TestRepository {
        TestRepository::new(vec![sample_idea(1, 1, &[], 3)], vec![])
    }

    #[test]
    fn every_supported_language_resolves() {
        let repo = repo();
        let settings = test_settings();
        let idea = repo.ideas().remove(0);
        upsert_translation(idea.id, "fr", "Idée", "Contenu", &settings, &repo).unwrap();

        for language in settings.supported() {
            let value = translated_value(
                &idea,
                TranslatableAttribute::Title,
                language.as_str(),
                &settings,
                &repo,
            )
            .unwrap();
            let expected = if language == &"fr" { "Idée" } else { "Idea 1" };
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn unsupported_language_is_rejected() {
        let repo = repo();
        let settings = test_settings();
        let idea = repo.ideas().remove(0);

        let err = translated_value(&idea, TranslatableAttribute::Title, "es", &settings, &repo)
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidLanguage(_)));

        let err = upsert_translation(idea.id, "es", "Idea", "Contenido", &settings, &repo)
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidLanguage(_)));
    }

    #[test]
    fn default_language_cannot_be_written() {
        let repo = repo();
        let settings = test_settings();
        let id = IdeaId::new(1).unwrap();
        let err = upsert_translation(id, "en", "Idea", "Content", &settings, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidLanguage(_)));
        assert!(repo.translations().is_empty());
    }

    #[test]
    fn upsert_overwrites_and_delete_is_idempotent() {
        let repo = repo();
        let settings = test_settings();
        let id = IdeaId::new(1).unwrap();

        upsert_translation(id, "de", "Erste", "Inhalt", &settings, &repo).unwrap();
        upsert_translation(id, "de", "Zweite", "Inhalt", &settings, &repo).unwrap();
        let stored = list_translations(id, &repo).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Zweite");

        delete_translation(id, "de", &settings, &repo).unwrap();
        delete_translation(id, "de", &settings, &repo).unwrap();
        assert!(list_translations(id, &repo).unwrap().is_empty());
    }

    #[test]
    fn upsert_for_missing_idea_is_not_found() {
        let repo = repo();
        let err = upsert_translation(
            IdeaId::new(5).unwrap(),
            "fr",
            "Idée",
            "Contenu",
            &test_settings(),
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
