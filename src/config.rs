use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Where admin credentials are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBackend {
    /// `admin_users` table with Argon2 hashes.
    Database,
    /// Fixed demo accounts compiled into the binary.
    Demo,
}

impl FromStr for AuthBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(AuthBackend::Database),
            "demo" => Ok(AuthBackend::Demo),
            other => Err(AppError::Config(format!("Invalid AUTH_BACKEND: {}", other))),
        }
    }
}

/// Admin account created at startup when it does not exist yet.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout_secs: u64,
    pub login_failure_delay_ms: u64,
    pub tab_idle_minutes: u64,
    pub tab_sweep_secs: u64,
    pub auth_backend: AuthBackend,
    pub admin_seed: Option<AdminSeed>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            database_url: "sqlite://community_cms.db?mode=rwc".to_string(),
            db_max_connections: 10,
            db_min_connections: 1,
            request_timeout_secs: 30,
            login_failure_delay_ms: 1000,
            tab_idle_minutes: 720,
            tab_sweep_secs: 300,
            auth_backend: AuthBackend::Database,
            admin_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Config::default();

        Ok(Config {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", defaults.db_min_connections)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            login_failure_delay_ms: parse_var(
                "LOGIN_FAILURE_DELAY_MS",
                defaults.login_failure_delay_ms,
            )?,
            tab_idle_minutes: parse_var("TAB_IDLE_MINUTES", defaults.tab_idle_minutes)?,
            tab_sweep_secs: parse_var("TAB_SWEEP_SECS", defaults.tab_sweep_secs)?,
            auth_backend: match std::env::var("AUTH_BACKEND") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.auth_backend,
            },
            admin_seed: admin_seed_from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn login_failure_delay(&self) -> Duration {
        Duration::from_millis(self.login_failure_delay_ms)
    }

    pub fn tab_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.tab_idle_minutes.saturating_mul(60))
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

fn admin_seed_from_env() -> Result<Option<AdminSeed>, AppError> {
    let username = std::env::var("ADMIN_SEED_USERNAME").ok();
    let email = std::env::var("ADMIN_SEED_EMAIL").ok();
    let password = std::env::var("ADMIN_SEED_PASSWORD").ok();

    match (username, email, password) {
        (Some(username), Some(email), Some(password)) => Ok(Some(AdminSeed {
            username,
            email,
            password,
        })),
        (None, None, None) => Ok(None),
        _ => Err(AppError::Config(
            "ADMIN_SEED_USERNAME, ADMIN_SEED_EMAIL and ADMIN_SEED_PASSWORD must be set together"
                .to_string(),
        )),
    }
}
