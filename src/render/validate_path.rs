use super::interface::RenderTemplate;
use crate::error::{Error, Result};
use crate::template::{Content, Template, TemplatePaths};
use log::debug;
use std::path::Path;
use std::rc::Rc;

/// Existence check used before dispatching to a handler.
pub type FileExists = Rc<dyn Fn(&Path) -> bool>;

/// The filesystem existence check.
pub fn default_file_exists() -> FileExists {
    Rc::new(|path: &Path| path.exists())
}

/// Fails with `Error::TemplateNotFound` unless the template's backing file exists.
pub struct ValidatePathRenderTemplate {
    inner: Rc<dyn RenderTemplate>,
    paths: TemplatePaths,
    file_exists: FileExists,
}

impl ValidatePathRenderTemplate {
    pub fn new(
        inner: Rc<dyn RenderTemplate>,
        paths: TemplatePaths,
        file_exists: FileExists,
    ) -> Self {
        Self { inner, paths, file_exists }
    }
}

impl RenderTemplate for ValidatePathRenderTemplate {
    fn render_template(&self, template: &Template) -> Result<Content> {
        let path = self.paths.resolve(template);
        if !(self.file_exists)(&path) {
            debug!("Template '{}' not found at '{}'.", template.name(), path.display());
            return Err(Error::TemplateNotFound { name: template.name().to_string(), path });
        }
        self.inner.render_template(template)
    }
}
