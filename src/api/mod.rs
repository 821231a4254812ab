pub mod admin;
pub mod auth;
pub mod content;
pub mod middleware;
pub mod state;

pub use state::{AppState, TAB_HEADER};

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::db::{BlogPost, ContactInfo, DonationOption, Event, GalleryImage, PrayerTime, Record};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .nest("/blog", crud::<BlogPost>())
        .nest("/events", crud::<Event>())
        .nest("/gallery", crud::<GalleryImage>())
        .nest("/prayer-times", crud::<PrayerTime>())
        .nest("/donation-options", crud::<DonationOption>())
        .nest("/contact-info", crud::<ContactInfo>())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/api/health", get(health))
        // Session endpoints
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/tabs/current", delete(auth::close_tab))
        // Public pages
        .route("/api/blog", get(content::blog))
        .route("/api/events", get(content::events))
        .route("/api/gallery", get(content::gallery))
        .route("/api/prayer-times", get(content::prayer_times))
        .route("/api/donation-options", get(content::donation_options))
        .route("/api/contact-info", get(content::contact_info))
        .nest("/api/admin", admin_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn crud<T: Record>() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list::<T>).post(admin::create::<T>))
        .route("/:id", put(admin::update::<T>).delete(admin::delete::<T>))
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
