pub mod admin_users;
pub mod models;
pub mod records;

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::Config;
use crate::error::AppError;

pub use admin_users::AdminUserRepository;
pub use models::{
    AdminUser, BlogPost, BlogPostDraft, ContactInfo, ContactInfoDraft, DonationOption,
    DonationOptionDraft, Event, EventDraft, GalleryImage, GalleryImageDraft, PrayerTime,
    PrayerTimeDraft,
};
pub use records::{Draft, Record, Repository, Selection, Value};

/// Open the pool and bring the schema up to date.
pub async fn connect(config: &Config) -> Result<Pool<Sqlite>, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Migrated in-memory database on a single connection.
#[cfg(test)]
pub(crate) async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}
