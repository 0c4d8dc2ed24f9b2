//! Server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded once at startup and passed into [`crate::AppState`]
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | - | PostgreSQL URL (required outside development) |
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | USE_TEMPLATE_CACHE | true in production | load templates once at startup |
/// | TEMPLATE_DIR | ./templates | page and layout templates |
/// | STATIC_DIR | ./static | static assets served under /static |
/// | DB_TIMEOUT_MS | 3000 | deadline for a single database call |
/// | DB_MAX_CONNECTIONS | 10 | connection pool size |
/// | REQUEST_TIMEOUT_MS | 30000 | deadline for a whole request |
/// | LOG_LEVEL | info | default tracing filter |
/// | LOG_JSON | false | JSON console output |
/// | LOG_DIR | - | daily rolling log files |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | - | administrator created at startup if missing |
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: Option<String>,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Cached templates (true) or re-read from disk on every render (false)
    pub use_template_cache: bool,
    pub template_dir: String,
    pub static_dir: String,
    /// Deadline applied to each repository call
    pub db_timeout_ms: u64,
    pub db_max_connections: u32,
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Administrator login ensured at startup (both must be set)
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let in_production = environment == "production";

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty());
        if database_url.is_none() && environment != "development" {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        Ok(Self {
            database_url,
            http_port: env_parse("HTTP_PORT").unwrap_or(8080),
            use_template_cache: env_parse("USE_TEMPLATE_CACHE").unwrap_or(in_production),
            template_dir: std::env::var("TEMPLATE_DIR").unwrap_or_else(|_| "./templates".into()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".into()),
            db_timeout_ms: env_parse("DB_TIMEOUT_MS").unwrap_or(3000),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(30_000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Development defaults rooted at `template_dir`, used by tests
    pub fn for_templates(template_dir: impl Into<String>) -> Self {
        Self {
            database_url: None,
            http_port: 0,
            environment: "development".into(),
            use_template_cache: true,
            template_dir: template_dir.into(),
            static_dir: "./static".into(),
            db_timeout_ms: 3000,
            db_max_connections: 1,
            request_timeout_ms: 30_000,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            admin_email: None,
            admin_password: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_millis(self.db_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        Some((self.admin_email.as_deref()?, self.admin_password.as_deref()?))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
