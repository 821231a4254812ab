use std::time::Duration;

use crate::error::AppError;
use crate::session::{CredentialVerifier, Session, SessionStorage, SESSION_KEY};

/// Single owner of the session record of one tab.
pub struct SessionGate<S, V> {
    storage: S,
    verifier: V,
    failure_delay: Duration,
}

impl<S: SessionStorage, V: CredentialVerifier> SessionGate<S, V> {
    pub fn new(storage: S, verifier: V, failure_delay: Duration) -> Self {
        Self {
            storage,
            verifier,
            failure_delay,
        }
    }

    /// Verify credentials and persist the session on success.
    ///
    /// A mismatch resolves after `failure_delay` with
    /// [`AppError::InvalidCredentials`] and leaves the storage untouched.
    /// Any previously stored session is replaced on success only.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        match self.verifier.verify(username, password).await? {
            Some(session) => {
                let json = serde_json::to_string(&session)
                    .map_err(|e| AppError::Internal(format!("Session encoding failed: {}", e)))?;
                self.storage.write(SESSION_KEY, json);

                tracing::info!(user = %session.username, role = %session.role, "🔐 logged in");
                Ok(session)
            }
            None => {
                tokio::time::sleep(self.failure_delay).await;
                tracing::info!(identifier = %username, "login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Remove the session record. Calling it without a session is a no-op.
    pub fn logout(&self) {
        if let Some(session) = self.current_user() {
            tracing::info!(user = %session.username, "logged out");
        }
        self.storage.remove(SESSION_KEY);
    }

    /// The stored session, or `None` when absent or unreadable.
    pub fn current_user(&self) -> Option<Session> {
        let raw = self.storage.read(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session record: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn has_role(&self, roles: &[&str]) -> bool {
        self.current_user()
            .map(|session| roles.contains(&session.role.as_str()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, StaticCredentials, ADMIN_ROLES, ROLE_ADMIN};

    fn gate(storage: &MemoryStorage) -> SessionGate<MemoryStorage, StaticCredentials> {
        SessionGate::new(
            storage.clone(),
            StaticCredentials::demo(),
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn test_admin_login_persists_session() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);

        let session = gate.login("admin", "Admin@123").await.unwrap();
        assert_eq!(session.role, ROLE_ADMIN);
        assert_eq!(session.username, "admin");

        // a fresh gate over the same tab sees the session (reload)
        let reloaded = self::gate(&storage);
        assert_eq!(reloaded.current_user(), Some(session));
        assert!(reloaded.is_authenticated());
        assert!(storage.read(SESSION_KEY).unwrap().contains("\"userId\""));
        assert!(!storage.read(SESSION_KEY).unwrap().contains("Admin@123"));
    }

    #[tokio::test]
    async fn test_rejected_login_persists_nothing() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);

        for (username, password) in [
            ("admin", "wrong"),
            ("nobody", "Admin@123"),
            ("ADMIN", "Admin@123"),
            ("admin", ""),
        ] {
            let err = gate.login(username, password).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCredentials));
        }

        assert!(storage.read(SESSION_KEY).is_none());
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_login_waits_for_delay() {
        let storage = MemoryStorage::new();
        let gate = SessionGate::new(
            storage,
            StaticCredentials::demo(),
            Duration::from_millis(50),
        );

        let started = std::time::Instant::now();
        assert!(gate.login("admin", "nope").await.is_err());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_has_role_follows_login_and_logout() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);

        assert!(!gate.has_role(&ADMIN_ROLES));

        gate.login("admin", "Admin@123").await.unwrap();
        assert!(gate.has_role(&ADMIN_ROLES));
        assert!(!gate.has_role(&["viewer"]));

        gate.logout();
        assert!(!gate.has_role(&ADMIN_ROLES));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);
        gate.login("editor", "Editor@123").await.unwrap();

        gate.logout();
        assert!(gate.current_user().is_none());
        gate.logout();
        assert!(gate.current_user().is_none());
        assert!(storage.read(SESSION_KEY).is_none());
    }

    #[test]
    fn test_corrupted_record_reads_as_anonymous() {
        let storage = MemoryStorage::new();
        storage.write(SESSION_KEY, "{not json".to_string());
        let gate = gate(&storage);

        assert!(gate.current_user().is_none());
        assert!(!gate.is_authenticated());
        assert!(!gate.has_role(&ADMIN_ROLES));
    }
}
