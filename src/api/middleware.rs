use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::state::{tab_id, AppState};
use crate::error::AppError;
use crate::session::{check_admin_access, GuardDecision};

/// Admin route guard. Puts the [`Session`](crate::session::Session) into the
/// request extensions when access is allowed.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let tab = tab_id(request.headers()).map(str::to_string);
    let storage = match tab {
        Some(id) => state.tabs.resume(&id).await,
        None => None,
    };
    let Some(storage) = storage else {
        return Err(AppError::Unauthenticated);
    };

    match check_admin_access(&state.gate(storage)) {
        GuardDecision::Allow(session) => {
            request.extensions_mut().insert(session);
            Ok(next.run(request).await)
        }
        GuardDecision::RedirectToLogin(_) => Err(AppError::Unauthenticated),
        GuardDecision::ForcedLogout(notice) => Err(AppError::Forbidden(notice.description)),
    }
}
