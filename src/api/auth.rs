use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::{tab_id, AppState};
use crate::error::AppError;
use crate::session::Session;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub tab_id: String,
    pub session: Session,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let resumed = match tab_id(&headers) {
        Some(id) => state.tabs.resume(id).await.map(|storage| (id.to_string(), storage)),
        None => None,
    };
    let opened = resumed.is_none();
    let (tab_id, storage) = match resumed {
        Some(tab) => tab,
        None => state.tabs.open().await,
    };

    match state.gate(storage).login(&req.username, &req.password).await {
        Ok(session) => Ok(Json(LoginResponse { tab_id, session })),
        Err(e) => {
            // a rejected login never hands out the tab id, so nobody could close it
            if opened {
                state.tabs.close(&tab_id).await;
            }
            Err(e)
        }
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(gate) = state.tab_gate(&headers).await {
        gate.logout();
    }

    Json(serde_json::json!({"success": true}))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Session>, AppError> {
    state
        .tab_gate(&headers)
        .await
        .and_then(|gate| gate.current_user())
        .map(Json)
        .ok_or(AppError::Unauthenticated)
}

/// DELETE /api/tabs/current
pub async fn close_tab(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(id) = tab_id(&headers) {
        state.tabs.close(id).await;
    }

    Json(serde_json::json!({"success": true}))
}
