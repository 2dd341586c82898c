use super::interface::RenderTemplate;
use crate::error::Result;
use crate::template::{Content, Template, TemplatePaths};
use log::debug;

/// Returns the backing file's bytes unmodified.
#[derive(Debug, Clone)]
pub struct StaticFileRenderTemplate {
    paths: TemplatePaths,
}

impl StaticFileRenderTemplate {
    pub fn new(paths: TemplatePaths) -> Self {
        Self { paths }
    }
}

impl RenderTemplate for StaticFileRenderTemplate {
    fn render_template(&self, template: &Template) -> Result<Content> {
        let path = self.paths.resolve(template);
        debug!("Reading static file '{}'.", path.display());
        Ok(Content::Bytes(std::fs::read(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::template::Data;

    #[test]
    fn returns_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = vec![0x00, 0xff, b'{', b'{'];
        std::fs::write(dir.path().join("blob.bin"), &bytes).unwrap();

        let handler =
            StaticFileRenderTemplate::new(TemplatePaths::new(Some(dir.path().into()), "phtml"));
        let content = handler
            .render_template(&Template::new("blob.bin", Data::new(), Data::new()))
            .unwrap();
        assert_eq!(content, Content::Bytes(bytes));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let handler =
            StaticFileRenderTemplate::new(TemplatePaths::new(Some(dir.path().into()), "phtml"));
        let result = handler.render_template(&Template::new("nope.txt", Data::new(), Data::new()));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
