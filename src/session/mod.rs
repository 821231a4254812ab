//! Authentication state for the admin area.
//!
//! A [`SessionGate`] owns the session record of one tab: it checks credentials
//! through a [`CredentialVerifier`], writes the record into the tab's
//! [`SessionStorage`] and answers role checks. [`guard::check_admin_access`]
//! builds the admin route decision on top of it.

pub mod credentials;
pub mod gate;
pub mod guard;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use credentials::{
    CredentialRecord, CredentialVerifier, DatabaseCredentials, StaticCredentials, Verifier,
};
pub use gate::SessionGate;
pub use guard::{check_admin_access, GuardDecision};
pub use storage::{MemoryStorage, SessionStorage, TabRegistry};

/// Storage key of the serialized [`Session`].
pub const SESSION_KEY: &str = "admin_session";

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Roles allowed into the admin dashboard.
pub const ADMIN_ROLES: [&str; 2] = [ROLE_ADMIN, ROLE_EDITOR];

/// Identity of the session holder. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wire_format() {
        let session = Session {
            user_id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@example.org".to_string(),
            role: ROLE_ADMIN.to_string(),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": "1",
                "username": "admin",
                "email": "admin@example.org",
                "role": "admin",
            })
        );
    }
}
