use crate::error::Notice;
use crate::session::{CredentialVerifier, Session, SessionGate, SessionStorage, ADMIN_ROLES};

/// Outcome of the admin route guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Session),
    /// No session: send the user to the login view.
    RedirectToLogin(Notice),
    /// Session with a role outside the admin roles. The session has already
    /// been cleared when this is returned.
    ForcedLogout(Notice),
}

pub fn check_admin_access<S, V>(gate: &SessionGate<S, V>) -> GuardDecision
where
    S: SessionStorage,
    V: CredentialVerifier,
{
    let Some(session) = gate.current_user() else {
        return GuardDecision::RedirectToLogin(Notice::info(
            "Authentication required",
            "Please log in to access the admin area",
        ));
    };

    if !ADMIN_ROLES.contains(&session.role.as_str()) {
        tracing::warn!(user = %session.username, role = %session.role, "role not allowed in admin area");
        gate.logout();
        return GuardDecision::ForcedLogout(Notice::destructive(
            "Access denied",
            "You do not have permission to access the admin area",
        ));
    }

    GuardDecision::Allow(session)
}
