use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{Movie, MovieInput, SearchField},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_desc(movie::Column::Year)
            .all(&self.db)
            .await
            .map_err(AppError::storage("list", None))?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<movie::Model>> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::storage("find", Some(id)))
    }

    pub async fn get(&self, id: i32) -> AppResult<Movie> {
        self.find(id).await?.map(Movie::from).ok_or_else(|| AppError::not_found(id))
    }

    pub async fn search(&self, field: SearchField, term: &str) -> AppResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .filter(field.column().contains(term))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::storage("search", None))?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn create(&self, input: MovieInput) -> AppResult<Movie> {
        input.validate()?;
        let title = input.title.clone();
        let row = input
            .into_active_model()
            .insert(&self.db)
            .await
            .map_err(AppError::storage_for_title("create", title))?;
        tracing::debug!(id = row.id, "movie created");
        Ok(row.into())
    }

    pub async fn update(&self, existing: movie::Model, input: MovieInput) -> AppResult<Movie> {
        input.validate()?;
        let id = existing.id;
        let mut active: movie::ActiveModel = existing.into();
        input.apply_to(&mut active);
        let row = active.update(&self.db).await.map_err(AppError::storage("update", Some(id)))?;
        tracing::debug!(id, "movie updated");
        Ok(row.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::storage("delete", Some(id)))?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found(id));
        }
        tracing::debug!(id, "movie deleted");
        Ok(())
    }
}
