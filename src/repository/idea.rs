use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::content::ContentKind;
use crate::domain::facets::{FacetCriterion, FacetOptions};
use crate::domain::idea::{Idea, IdeaChanges};
use crate::domain::language::LanguageCode;
use crate::domain::types::{CategoryId, IdeaId, IdeaTitle, Rating, UserId};
use crate::models::idea::{Idea as DbIdea, IdeaCategory, IdeaChangeset, NewIdea};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::reaction::delete_reactions;
use crate::repository::translation::upsert_translation_row;
use crate::repository::{DieselRepository, IdeaListQuery, IdeaReader, IdeaWriter};

/// Category ids linked to each of `idea_ids`.
fn load_category_ids(
    conn: &mut SqliteConnection,
    idea_ids: Vec<i32>,
) -> QueryResult<HashMap<i32, Vec<i32>>> {
    use crate::schema::idea_categories;

    let links = idea_categories::table
        .filter(idea_categories::idea_id.eq_any(idea_ids))
        .select((idea_categories::idea_id, idea_categories::category_id))
        .order(idea_categories::category_id.asc())
        .load::<(i32, i32)>(conn)?;

    let mut by_idea: HashMap<i32, Vec<i32>> = HashMap::new();
    for (idea_id, category_id) in links {
        by_idea.entry(idea_id).or_default().push(category_id);
    }
    Ok(by_idea)
}

fn into_domain(conn: &mut SqliteConnection, rows: Vec<DbIdea>) -> RepositoryResult<Vec<Idea>> {
    let mut category_ids = load_category_ids(conn, rows.iter().map(|row| row.id).collect())?;
    let ideas = rows
        .into_iter()
        .map(|row| {
            let links = category_ids.remove(&row.id).unwrap_or_default();
            row.into_domain(links)
        })
        .collect::<Result<Vec<Idea>, _>>()?;
    Ok(ideas)
}

impl IdeaReader for DieselRepository {
    fn list_ideas(&self, query: IdeaListQuery) -> RepositoryResult<(usize, Vec<Idea>)> {
        use crate::schema::{idea_categories, ideas};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = ideas::table.into_boxed::<Sqlite>();

            for criterion in query.filter.criteria() {
                items = match criterion {
                    FacetCriterion::Author(author_id) => {
                        items.filter(ideas::author_id.eq(author_id.get()))
                    }
                    // Sub-select keeps an idea once however many categories match.
                    FacetCriterion::Category(category_id) => items.filter(
                        ideas::id.eq_any(
                            idea_categories::table
                                .filter(idea_categories::category_id.eq(category_id.get()))
                                .select(idea_categories::idea_id),
                        ),
                    ),
                    FacetCriterion::Rating(rating) => items.filter(ideas::rating.eq(rating.get())),
                };
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items
            .order((ideas::created_at.desc(), ideas::id.desc()))
            .load::<DbIdea>(&mut conn)?;

        Ok((total, into_domain(&mut conn, rows)?))
    }

    fn get_idea_by_id(&self, id: IdeaId) -> RepositoryResult<Option<Idea>> {
        use crate::schema::ideas;

        let mut conn = self.conn()?;

        let row = ideas::table
            .find(id.get())
            .first::<DbIdea>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(into_domain(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn idea_title_taken(
        &self,
        author_id: UserId,
        title: &IdeaTitle,
        exclude: Option<IdeaId>,
    ) -> RepositoryResult<bool> {
        use crate::schema::ideas;

        let mut conn = self.conn()?;

        let mut items = ideas::table
            .filter(ideas::author_id.eq(author_id.get()))
            .filter(ideas::title.eq(title.as_str()))
            .into_boxed::<Sqlite>();
        if let Some(exclude) = exclude {
            items = items.filter(ideas::id.ne(exclude.get()));
        }

        let count = items.count().get_result::<i64>(&mut conn)?;
        Ok(count > 0)
    }

    fn list_facet_options(&self) -> RepositoryResult<FacetOptions> {
        use crate::schema::{idea_categories, ideas};

        let mut conn = self.conn()?;

        let authors = ideas::table
            .filter(ideas::author_id.is_not_null())
            .select(ideas::author_id)
            .distinct()
            .order(ideas::author_id.asc())
            .load::<Option<i32>>(&mut conn)?
            .into_iter()
            .flatten()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?;

        let categories = idea_categories::table
            .select(idea_categories::category_id)
            .distinct()
            .order(idea_categories::category_id.asc())
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(CategoryId::new)
            .collect::<Result<Vec<_>, _>>()?;

        let ratings = ideas::table
            .filter(ideas::rating.is_not_null())
            .select(ideas::rating)
            .distinct()
            .order(ideas::rating.asc())
            .load::<Option<i32>>(&mut conn)?
            .into_iter()
            .flatten()
            .map(Rating::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FacetOptions {
            authors,
            categories,
            ratings,
        })
    }
}

impl IdeaWriter for DieselRepository {
    fn save_idea(&self, changes: &IdeaChanges) -> RepositoryResult<IdeaId> {
        use crate::schema::{idea_categories, idea_translations, ideas};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let idea_id = match changes.id {
                Some(id) => {
                    let affected = diesel::update(ideas::table.find(id.get()))
                        .set(IdeaChangeset::from(changes))
                        .execute(conn)?;
                    if affected == 0 {
                        return Err(RepositoryError::NotFound);
                    }
                    id.get()
                }
                None => diesel::insert_into(ideas::table)
                    .values(NewIdea::from(changes))
                    .returning(ideas::id)
                    .get_result::<i32>(conn)?,
            };

            for translation in &changes.translations {
                upsert_translation_row(conn, idea_id, translation)?;
            }

            if !changes.removed_languages.is_empty() {
                let languages: Vec<&str> = changes
                    .removed_languages
                    .iter()
                    .map(LanguageCode::as_str)
                    .collect();
                diesel::delete(
                    idea_translations::table
                        .filter(idea_translations::idea_id.eq(idea_id))
                        .filter(idea_translations::language.eq_any(languages)),
                )
                .execute(conn)?;
            }

            diesel::delete(idea_categories::table.filter(idea_categories::idea_id.eq(idea_id)))
                .execute(conn)?;

            let links: Vec<IdeaCategory> = changes
                .category_ids
                .iter()
                .map(|category_id| IdeaCategory {
                    idea_id,
                    category_id: category_id.get(),
                })
                .collect();
            if !links.is_empty() {
                diesel::insert_into(idea_categories::table)
                    .values(&links)
                    .execute(conn)?;
            }

            Ok(IdeaId::new(idea_id)?)
        })
    }

    fn delete_idea(&self, id: IdeaId) -> RepositoryResult<usize> {
        use crate::schema::{idea_categories, idea_translations, ideas};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(idea_translations::table.filter(idea_translations::idea_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(idea_categories::table.filter(idea_categories::idea_id.eq(id.get())))
                .execute(conn)?;
            delete_reactions(conn, ContentKind::Idea, id.get())?;

            let affected = diesel::delete(ideas::table.find(id.get())).execute(conn)?;
            Ok(affected)
        })
    }
}
