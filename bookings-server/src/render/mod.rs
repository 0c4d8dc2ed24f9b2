//! Presentation Layer
//!
//! [`Renderer`] either holds a [`TemplateCache`] built at startup or, with the
//! cache disabled, rebuilds one from disk on every render so template edits
//! show up without a restart.

pub mod cache;
pub mod template_data;

pub use cache::{RenderError, TemplateCache};
pub use template_data::TemplateData;

use axum::response::Html;
use shared::error::AppError;
use std::path::PathBuf;
use tower_sessions::Session;

use crate::session;

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::template(err.to_string())
    }
}

pub struct Renderer {
    dir: PathBuf,
    cache: Option<TemplateCache>,
}

impl Renderer {
    /// With `use_cache` the templates are compiled now and a broken template
    /// fails startup
    pub fn new(dir: impl Into<PathBuf>, use_cache: bool) -> Result<Self, RenderError> {
        let dir = dir.into();
        let cache = if use_cache {
            Some(TemplateCache::build(&dir)?)
        } else {
            None
        };
        Ok(Self { dir, cache })
    }

    pub fn uses_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Render `name` with `td`, after popping flash, warning and error from the session
    pub async fn render(
        &self,
        session: &Session,
        name: &str,
        td: TemplateData,
    ) -> Result<Html<String>, AppError> {
        let td = add_default_data(td, session).await;
        self.render_page(name, &td).map_err(|e| {
            tracing::error!(template = name, error = %e, "Template render failed");
            e.into()
        })
    }

    /// Render `name` with `td` as given, without touching any session
    pub fn render_page(&self, name: &str, td: &TemplateData) -> Result<Html<String>, RenderError> {
        let ctx = minijinja::Value::from_serialize(td);
        let body = match &self.cache {
            Some(cache) => cache.render(name, ctx),
            None => TemplateCache::build(&self.dir).and_then(|cache| cache.render(name, ctx)),
        };
        body.map(Html)
    }
}

async fn add_default_data(mut td: TemplateData, session: &Session) -> TemplateData {
    td.flash = session::pop_string(session, session::FLASH).await;
    td.error = session::pop_string(session, session::ERROR).await;
    td.warning = session::pop_string(session, session::WARNING).await;
    td.is_authenticated = session::is_authenticated(session).await;
    td
}
