//! Guarded CRUD over every content table. Each mutation answers with the
//! refreshed collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::state::AppState;
use crate::db::Record;
use crate::error::AppError;
use crate::manager::ContentManager;
use crate::session::Session;

/// GET /api/admin/<entity>
pub async fn list<T: Record>(State(state): State<AppState>) -> Result<Json<Vec<T>>, AppError> {
    let mut manager = ContentManager::<T>::new(&state.db);
    manager.refresh().await?;
    Ok(Json(manager.into_items()))
}

/// POST /api/admin/<entity>
pub async fn create<T: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(draft): Json<T::Draft>,
) -> Result<(StatusCode, Json<Vec<T>>), AppError> {
    let mut manager = ContentManager::<T>::new(&state.db);
    let record = manager.create(&draft).await?;

    tracing::info!(user = %session.username, table = T::TABLE, id = %record.id(), "row created");
    Ok((StatusCode::CREATED, Json(manager.into_items())))
}

/// PUT /api/admin/<entity>/:id
pub async fn update<T: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(draft): Json<T::Draft>,
) -> Result<Json<Vec<T>>, AppError> {
    let mut manager = ContentManager::<T>::new(&state.db);
    manager.update(&id, &draft).await?;

    tracing::info!(user = %session.username, table = T::TABLE, id = %id, "row updated");
    Ok(Json(manager.into_items()))
}

/// DELETE /api/admin/<entity>/:id
pub async fn delete<T: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<Vec<T>>, AppError> {
    let mut manager = ContentManager::<T>::new(&state.db);
    manager.refresh().await?;
    manager.delete(&id).await?;

    tracing::info!(user = %session.username, table = T::TABLE, id = %id, "row deleted");
    Ok(Json(manager.into_items()))
}
