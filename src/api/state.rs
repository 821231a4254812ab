use std::sync::Arc;

use axum::http::HeaderMap;
use sqlx::{Pool, Sqlite};

use crate::config::Config;
use crate::session::{MemoryStorage, SessionGate, TabRegistry, Verifier};

/// Header carrying the tab id returned by login.
pub const TAB_HEADER: &str = "x-tab-id";

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub tabs: TabRegistry,
    pub verifier: Verifier,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn gate(&self, storage: MemoryStorage) -> SessionGate<MemoryStorage, Verifier> {
        SessionGate::new(
            storage,
            self.verifier.clone(),
            self.config.login_failure_delay(),
        )
    }

    /// Gate of the tab named in `headers`, if that tab is open.
    pub async fn tab_gate(&self, headers: &HeaderMap) -> Option<SessionGate<MemoryStorage, Verifier>> {
        let storage = self.tabs.resume(tab_id(headers)?).await?;
        Some(self.gate(storage))
    }
}

pub fn tab_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TAB_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
}
