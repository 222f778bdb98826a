use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;

use crate::domain::language::LanguageCode;
use crate::domain::translation::{IdeaTranslation, NewIdeaTranslation};
use crate::domain::types::IdeaId;
use crate::models::translation::{
    IdeaTranslation as DbIdeaTranslation, NewIdeaTranslation as DbNewIdeaTranslation,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, TranslationReader, TranslationWriter};

/// Insert or overwrite the (idea, language) row in a single statement, so a
/// concurrent writer of the same pair updates instead of duplicating it.
pub(crate) fn upsert_translation_row(
    conn: &mut SqliteConnection,
    idea_id: i32,
    translation: &NewIdeaTranslation,
) -> QueryResult<usize> {
    use crate::schema::idea_translations;

    diesel::insert_into(idea_translations::table)
        .values(DbNewIdeaTranslation::new(idea_id, translation))
        .on_conflict((idea_translations::idea_id, idea_translations::language))
        .do_update()
        .set((
            idea_translations::title.eq(excluded(idea_translations::title)),
            idea_translations::content.eq(excluded(idea_translations::content)),
        ))
        .execute(conn)
}

impl TranslationReader for DieselRepository {
    fn get_translation(
        &self,
        idea_id: IdeaId,
        language: &LanguageCode,
    ) -> RepositoryResult<Option<IdeaTranslation>> {
        use crate::schema::idea_translations;

        let mut conn = self.conn()?;

        let translation = idea_translations::table
            .filter(idea_translations::idea_id.eq(idea_id.get()))
            .filter(idea_translations::language.eq(language.as_str()))
            .first::<DbIdeaTranslation>(&mut conn)
            .optional()?;

        translation
            .map(IdeaTranslation::try_from)
            .transpose()
    }

    fn list_translations(&self, idea_id: IdeaId) -> RepositoryResult<Vec<IdeaTranslation>> {
        use crate::schema::idea_translations;

        let mut conn = self.conn()?;

        idea_translations::table
            .filter(idea_translations::idea_id.eq(idea_id.get()))
            .order(idea_translations::language.asc())
            .load::<DbIdeaTranslation>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<IdeaTranslation>, _>>()
    }

    fn list_translations_in(
        &self,
        idea_ids: &[IdeaId],
        language: &LanguageCode,
    ) -> RepositoryResult<Vec<IdeaTranslation>> {
        use crate::schema::idea_translations;

        if idea_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let ids: Vec<i32> = idea_ids.iter().map(|id| id.get()).collect();

        idea_translations::table
            .filter(idea_translations::idea_id.eq_any(ids))
            .filter(idea_translations::language.eq(language.as_str()))
            .load::<DbIdeaTranslation>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<IdeaTranslation>, _>>()
    }
}

impl TranslationWriter for DieselRepository {
    fn upsert_translation(
        &self,
        idea_id: IdeaId,
        translation: &NewIdeaTranslation,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(upsert_translation_row(&mut conn, idea_id.get(), translation)?)
    }

    fn delete_translation(
        &self,
        idea_id: IdeaId,
        language: &LanguageCode,
    ) -> RepositoryResult<usize> {
        use crate::schema::idea_translations;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            idea_translations::table
                .filter(idea_translations::idea_id.eq(idea_id.get()))
                .filter(idea_translations::language.eq(language.as_str())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
