//! Template cache
//!
//! Every `*.page.tmpl` and `*.layout.tmpl` under the template directory is
//! loaded into one minijinja environment. Pages extend `base.layout.tmpl`.

use minijinja::{AutoEscape, Environment};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PAGE_SUFFIX: &str = ".page.tmpl";
pub const LAYOUT_SUFFIX: &str = ".layout.tmpl";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read templates from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template {0} not found")]
    NotFound(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Loaded templates, immutable once built
pub struct TemplateCache {
    env: Environment<'static>,
    pages: Vec<String>,
}

impl TemplateCache {
    /// Read and compile every page and layout under `dir`
    pub fn build(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let dir = dir.as_ref();
        let io_err = |source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        let mut pages = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                continue;
            };
            let is_page = name.ends_with(PAGE_SUFFIX);
            if !is_page && !name.ends_with(LAYOUT_SUFFIX) {
                continue;
            }
            let source = fs::read_to_string(&path).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
            env.add_template_owned(name.clone(), source)?;
            if is_page {
                pages.push(name);
            }
        }
        pages.sort();

        tracing::debug!(dir = %dir.display(), pages = pages.len(), "Template cache built");
        Ok(Self { env, pages })
    }

    pub fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, RenderError> {
        if !self.pages.iter().any(|p| p == name) {
            return Err(RenderError::NotFound(name.to_string()));
        }
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    /// Page template names, sorted
    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}
