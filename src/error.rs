use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration failed: {}", err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Transient, user-facing message attached to every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            variant: NoticeVariant::Default,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Crypto(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Notice shown to the user. Store and internal failures never leak details.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::InvalidCredentials => {
                Notice::destructive("Login failed", "Invalid credentials")
            }
            AppError::Unauthenticated => {
                Notice::info("Authentication required", "Please log in to access the admin area")
            }
            AppError::Forbidden(msg) => Notice::destructive("Access denied", msg),
            AppError::NotFound(msg) => Notice::destructive("Not found", msg),
            AppError::Validation(msg) => Notice::destructive("Invalid input", msg),
            AppError::Crypto(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_) => {
                Notice::destructive("Error", "Something went wrong. Please try again.")
            }
        }
    }
}

// Axum IntoResponse implementation for HTTP errors
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "notice": self.notice(),
        });

        (status, axum::Json(body)).into_response()
    }
}
