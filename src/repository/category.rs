use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::content::ContentKind;
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::reaction::delete_reactions;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(ids) = &query.ids {
                let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
                items = items.filter(categories::id.eq_any(ids));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((categories::slug.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryId> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let id = diesel::insert_into(categories::table)
            .values(db_category)
            .returning(categories::id)
            .get_result::<i32>(&mut conn)?;

        Ok(CategoryId::new(id)?)
    }

    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let affected = diesel::update(categories::table.find(id.get()))
            .set(db_category)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categories, idea_categories};

        let mut conn = self.conn()?;

        let affected = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                idea_categories::table.filter(idea_categories::category_id.eq(id.get())),
            )
            .execute(conn)?;
            delete_reactions(conn, ContentKind::Category, id.get())?;

            Ok(diesel::delete(categories::table.find(id.get())).execute(conn)?)
        })?;

        Ok(affected)
    }
}
