use std::future::Future;
use std::sync::Arc;

use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::crypto::{hash_password, verify_password};
use crate::db::AdminUserRepository;
use crate::error::AppError;
use crate::session::{Session, ROLE_ADMIN, ROLE_EDITOR};

/// Checks an identifier (username or email) and secret.
///
/// Returns the identity to store in the session on a match, `None` on a
/// mismatch. `Err` is reserved for the verifier itself failing.
pub trait CredentialVerifier: Send + Sync {
    fn verify(
        &self,
        identifier: &str,
        secret: &str,
    ) -> impl Future<Output = Result<Option<Session>, AppError>> + Send;
}

/// One entry of a [`StaticCredentials`] list.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl CredentialRecord {
    pub fn new(user_id: &str, username: &str, email: &str, password: &str, role: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    fn matches(&self, identifier: &str, secret: &str) -> bool {
        (self.username == identifier || self.email == identifier) && self.password == secret
    }

    fn to_session(&self) -> Session {
        Session {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Fixed in-memory account list with plaintext passwords.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    records: Arc<[CredentialRecord]>,
}

impl StaticCredentials {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Demo accounts shown on the login page.
    pub fn demo() -> Self {
        Self::new(vec![
            CredentialRecord::new("1", "admin", "admin@community.local", "Admin@123", ROLE_ADMIN),
            CredentialRecord::new("2", "editor", "editor@community.local", "Editor@123", ROLE_EDITOR),
        ])
    }
}

impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<Option<Session>, AppError> {
        Ok(self
            .records
            .iter()
            .find(|record| record.matches(identifier, secret))
            .map(CredentialRecord::to_session))
    }
}

/// Accounts in the `admin_users` table, verified against Argon2 hashes.
#[derive(Debug, Clone)]
pub struct DatabaseCredentials {
    pool: Pool<Sqlite>,
    /// Checked when no account matches, so unknown identifiers cost one
    /// Argon2 verification like known ones.
    dummy_hash: Arc<str>,
}

impl DatabaseCredentials {
    pub fn new(pool: Pool<Sqlite>) -> Result<Self, AppError> {
        let dummy_hash = hash_password(&Uuid::new_v4().to_string())?;

        Ok(Self {
            pool,
            dummy_hash: dummy_hash.into(),
        })
    }
}

impl CredentialVerifier for DatabaseCredentials {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<Option<Session>, AppError> {
        let users = AdminUserRepository::find_by_identifier(&self.pool, identifier).await?;

        if users.is_empty() {
            verify_password(secret, &self.dummy_hash)?;
            return Ok(None);
        }

        for user in users {
            if verify_password(secret, &user.password_hash)? {
                return Ok(Some(Session {
                    user_id: user.id,
                    username: user.username,
                    email: user.email,
                    role: user.role,
                }));
            }
        }

        Ok(None)
    }
}

/// Verifier picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum Verifier {
    Static(StaticCredentials),
    Database(DatabaseCredentials),
}

impl CredentialVerifier for Verifier {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<Option<Session>, AppError> {
        match self {
            Verifier::Static(credentials) => credentials.verify(identifier, secret).await,
            Verifier::Database(credentials) => credentials.verify(identifier, secret).await,
        }
    }
}
