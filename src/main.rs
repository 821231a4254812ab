use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use community_cms::{
    api::{create_router, AppState},
    config::{AuthBackend, Config},
    db::{self, AdminUserRepository},
    error::AppError,
    session::{DatabaseCredentials, StaticCredentials, TabRegistry, Verifier},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,community_cms=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting community-cms v{}...", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_env()?);
    tracing::info!("✅ Configuration loaded");

    let db = db::connect(&config).await?;
    tracing::info!("✅ Database ready: {}", config.database_url);

    if let Some(seed) = &config.admin_seed {
        if AdminUserRepository::ensure_seed(&db, seed).await? {
            tracing::info!("✅ Seed admin account '{}' created", seed.username);
        }
    }

    let verifier = match config.auth_backend {
        AuthBackend::Database => Verifier::Database(DatabaseCredentials::new(db.clone())?),
        AuthBackend::Demo => {
            tracing::warn!("⚠️  Demo credentials enabled; do not use in production");
            Verifier::Static(StaticCredentials::demo())
        }
    };

    let tabs = TabRegistry::new();

    // Tabs that stop sending requests are treated as closed
    {
        let tabs = tabs.clone();
        let idle = config.tab_idle_timeout();
        let sweep = Duration::from_secs(config.tab_sweep_secs.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(sweep);
            loop {
                interval.tick().await;
                let closed = tabs.cleanup(idle).await;
                if closed > 0 {
                    tracing::debug!("🧹 {} idle tabs closed", closed);
                }
            }
        });
        tracing::info!("✅ Tab cleanup task started");
    }

    let state = AppState {
        db,
        tabs,
        verifier,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.server_address();
    tracing::info!("🌐 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
