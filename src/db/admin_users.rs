use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::config::AdminSeed;
use crate::crypto::hash_password;
use crate::db::models::AdminUser;
use crate::db::records::timestamp;
use crate::error::AppError;
use crate::session::ROLE_ADMIN;

pub struct AdminUserRepository;

impl AdminUserRepository {
    /// `password_hash` is a PHC string from [`hash_password`].
    pub async fn create(
        pool: &Pool<Sqlite>,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<AdminUser, AppError> {
        let id = Uuid::new_v4().to_string();
        let now = timestamp();

        let user = sqlx::query_as::<_, AdminUser>(
            r#"
INSERT INTO admin_users (id, username, email, password_hash, role, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Accounts whose username or email equals `identifier`.
    ///
    /// Both columns are unique on their own, but one account's username can be
    /// another's email, so this may return two rows. Username matches first.
    pub async fn find_by_identifier(
        pool: &Pool<Sqlite>,
        identifier: &str,
    ) -> Result<Vec<AdminUser>, AppError> {
        let users = sqlx::query_as::<_, AdminUser>(
            r#"
SELECT * FROM admin_users
WHERE username = ? OR email = ?
ORDER BY username = ? DESC, created_at ASC
            "#,
        )
        .bind(identifier)
        .bind(identifier)
        .bind(identifier)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Create the seed admin unless its username or email is taken.
    /// Returns whether an account was created.
    pub async fn ensure_seed(pool: &Pool<Sqlite>, seed: &AdminSeed) -> Result<bool, AppError> {
        if !Self::find_by_identifier(pool, &seed.username).await?.is_empty()
            || !Self::find_by_identifier(pool, &seed.email).await?.is_empty()
        {
            return Ok(false);
        }

        let hash = hash_password(&seed.password)?;
        Self::create(pool, &seed.username, &seed.email, &hash, ROLE_ADMIN).await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify_password;
    use crate::db::test_pool;

    const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

    #[tokio::test]
    async fn test_lookup_by_username_or_email() {
        let pool = test_pool().await;
        let created = AdminUserRepository::create(&pool, "admin", "admin@example.org", HASH, "admin")
            .await
            .unwrap();

        let by_name = AdminUserRepository::find_by_identifier(&pool, "admin").await.unwrap();
        let by_email = AdminUserRepository::find_by_identifier(&pool, "admin@example.org")
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, created.id);
        assert_eq!(by_email[0].id, created.id);
        assert_eq!(by_name[0].password_hash, HASH);

        assert!(AdminUserRepository::find_by_identifier(&pool, "root")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_lookup_returns_every_colliding_account() {
        let pool = test_pool().await;
        let by_email = AdminUserRepository::create(&pool, "amina", "shared", HASH, "editor")
            .await
            .unwrap();
        let by_name = AdminUserRepository::create(&pool, "shared", "s@example.org", HASH, "admin")
            .await
            .unwrap();

        let found = AdminUserRepository::find_by_identifier(&pool, "shared").await.unwrap();
        let ids: Vec<_> = found.iter().map(|user| user.id.as_str()).collect();
        assert_eq!(ids, vec![by_name.id.as_str(), by_email.id.as_str()]);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let pool = test_pool().await;
        AdminUserRepository::create(&pool, "admin", "a@example.org", HASH, "admin")
            .await
            .unwrap();

        let duplicate =
            AdminUserRepository::create(&pool, "admin", "b@example.org", HASH, "editor").await;
        assert!(matches!(duplicate, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_seed_is_created_once() {
        let pool = test_pool().await;
        let seed = AdminSeed {
            username: "admin".to_string(),
            email: "admin@example.org".to_string(),
            password: "Seed-Pass-1".to_string(),
        };

        assert!(AdminUserRepository::ensure_seed(&pool, &seed).await.unwrap());
        assert!(!AdminUserRepository::ensure_seed(&pool, &seed).await.unwrap());

        let users = AdminUserRepository::find_by_identifier(&pool, "admin").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, ROLE_ADMIN);
        assert!(verify_password("Seed-Pass-1", &users[0].password_hash).unwrap());
    }
}
