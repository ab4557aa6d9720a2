use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Report template '{0}' not found")]
    TemplateNotFound(PathBuf),

    #[error("A custom report template only applies to text reports, not {0}")]
    TemplateFormatMismatch(&'static str),
}

/// Renders report contexts through Handlebars templates.
///
/// File names routinely contain characters such as `&` or `<`, so HTML
/// escaping is disabled.
pub struct ReportEngine {
    handlebars: Handlebars<'static>,
}

impl ReportEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Load a user-supplied report template from disk
    pub fn load_template(template_path: &Path) -> Result<String, ReportError> {
        if template_path.is_file() {
            let content = fs::read_to_string(template_path)?;
            Ok(content)
        } else {
            Err(ReportError::TemplateNotFound(template_path.to_path_buf()))
        }
    }

    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String, ReportError> {
        self.handlebars
            .render_template(template, context)
            .map_err(ReportError::from)
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}
