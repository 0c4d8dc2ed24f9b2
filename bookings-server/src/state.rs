//! Application state shared by every handler

use std::sync::Arc;

use crate::config::Config;
use crate::db::DbService;
use crate::db::repository::{DatabaseRepo, MemoryRepo, PostgresRepo};
use crate::render::Renderer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Built once at startup and cloned into each request
#[derive(Clone)]
pub struct AppState {
    /// Persistence capability (Postgres, or in-memory without DATABASE_URL)
    pub repo: Arc<dyn DatabaseRepo>,
    pub renderer: Arc<Renderer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Arc<dyn DatabaseRepo>, renderer: Renderer, config: Config) -> Self {
        Self {
            repo,
            renderer: Arc::new(renderer),
            config: Arc::new(config),
        }
    }

    /// Connect the configured backend and load templates
    pub async fn from_config(config: Config) -> Result<Self, BoxError> {
        let repo: Arc<dyn DatabaseRepo> = match &config.database_url {
            Some(url) => {
                let db =
                    DbService::new(url, config.db_max_connections, config.db_timeout()).await?;
                if let Some((email, password)) = config.admin_credentials() {
                    db.ensure_admin(email, password).await?;
                }
                Arc::new(PostgresRepo::new(db.pool, config.db_timeout()))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using seeded in-memory repository");
                let repo = MemoryRepo::seeded()?;
                if let Some((email, password)) = config.admin_credentials() {
                    repo.add_user("Admin", "User", email, password, 3)?;
                }
                Arc::new(repo)
            }
        };

        let renderer = Renderer::new(&config.template_dir, config.use_template_cache)?;
        tracing::info!(
            dir = %config.template_dir,
            cached = renderer.uses_cache(),
            "Templates ready"
        );

        Ok(Self::new(repo, renderer, config))
    }
}
