//! File-backed Handlebars templates.
//!
//! A template named `foo` is read from `<dir>/foo.hbs` the first time it is
//! rendered and kept for the life of the process.

use std::path::PathBuf;

use handlebars::Handlebars;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Template loading and rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template {name} could not be read from {path}: {source}")]
    Load {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {name} is invalid: {message}")]
    Parse { name: String, message: String },

    #[error("Template {name} failed to render: {message}")]
    Render { name: String, message: String },
}

/// Handlebars engine with a lazily filled, process-lifetime cache.
pub struct TemplateEngine {
    dir: PathBuf,
    handlebars: RwLock<Handlebars<'static>>,
}

impl TemplateEngine {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        Self {
            dir: dir.into(),
            handlebars: RwLock::new(handlebars),
        }
    }

    /// Render `name` with `data`, loading the template on first use.
    pub async fn render(&self, name: &str, data: &Value) -> Result<String, RenderError> {
        {
            let handlebars = self.handlebars.read().await;
            if handlebars.has_template(name) {
                return render_with(&handlebars, name, data);
            }
        }

        let path = self.dir.join(format!("{name}.hbs"));
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| RenderError::Load {
                name: name.to_string(),
                path: path.clone(),
                source,
            })?;

        let mut handlebars = self.handlebars.write().await;
        // Another request may have registered it while we were reading
        if !handlebars.has_template(name) {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| RenderError::Parse {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
            tracing::debug!(template = name, path = %path.display(), "Template cached");
        }

        render_with(&handlebars, name, data)
    }
}

fn render_with(handlebars: &Handlebars<'static>, name: &str, data: &Value) -> Result<String, RenderError> {
    handlebars
        .render(name, data)
        .map_err(|e| RenderError::Render {
            name: name.to_string(),
            message: e.to_string(),
        })
}
