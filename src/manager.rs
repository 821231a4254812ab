//! Client-side copy of one content collection, kept in step with the store.

use sqlx::{Pool, Sqlite};

use crate::db::{Record, Repository, Selection};
use crate::error::AppError;

/// Holds either the complete collection as last fetched, or that collection
/// minus items whose deletion the store has confirmed.
pub struct ContentManager<'a, T> {
    pool: &'a Pool<Sqlite>,
    items: Vec<T>,
}

impl<'a, T: Record> ContentManager<'a, T> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        Self {
            pool,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Refetch the whole collection. On failure the last fetched list stays.
    pub async fn refresh(&mut self) -> Result<&[T], AppError> {
        match Repository::select::<T>(self.pool, &Selection::all()).await {
            Ok(items) => {
                self.items = items;
                Ok(&self.items)
            }
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", T::TABLE, e);
                Err(e)
            }
        }
    }

    /// The write already succeeded, so a failed refetch only leaves the list
    /// stale; `refresh` has logged it.
    async fn refresh_after_write(&mut self) {
        let _ = self.refresh().await;
    }

    pub async fn create(&mut self, draft: &T::Draft) -> Result<T, AppError> {
        let record = Repository::insert::<T>(self.pool, draft)
            .await
            .inspect_err(|e| tracing::error!("Failed to create {} row: {}", T::TABLE, e))?;
        self.refresh_after_write().await;
        Ok(record)
    }

    pub async fn update(&mut self, id: &str, draft: &T::Draft) -> Result<T, AppError> {
        let record = Repository::update::<T>(self.pool, id, draft)
            .await
            .inspect_err(|e| tracing::error!("Failed to update {} {}: {}", T::TABLE, id, e))?;
        self.refresh_after_write().await;
        Ok(record)
    }

    /// Delete row `id`, then drop it from the local list without refetching.
    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        Repository::delete::<T>(self.pool, id)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete {} {}: {}", T::TABLE, id, e))?;
        self.items.retain(|item| item.id() != id);
        Ok(())
    }
}
