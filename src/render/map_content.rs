use super::interface::RenderTemplate;
use crate::error::Result;
use crate::template::{Content, Template};
use base64::Engine;
use std::rc::Rc;

/// Maps the content produced by an inner handler.
pub struct MapContentRenderTemplate {
    inner: Rc<dyn RenderTemplate>,
    map: Rc<dyn Fn(Content) -> Result<Content>>,
}

impl MapContentRenderTemplate {
    pub fn new<F>(inner: Rc<dyn RenderTemplate>, map: F) -> Self
    where
        F: Fn(Content) -> Result<Content> + 'static,
    {
        Self { inner, map: Rc::new(map) }
    }

    /// Encodes the inner handler's output as standard base64 text.
    pub fn base64_encode(inner: Rc<dyn RenderTemplate>) -> Self {
        Self::new(inner, |content: Content| {
            let encoded = base64::engine::general_purpose::STANDARD.encode(content.as_bytes());
            Ok(Content::Text(encoded))
        })
    }
}

impl RenderTemplate for MapContentRenderTemplate {
    fn render_template(&self, template: &Template) -> Result<Content> {
        let content = self.inner.render_template(template)?;
        (self.map)(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Data;

    fn bytes_handler(bytes: &'static [u8]) -> Rc<dyn RenderTemplate> {
        Rc::new(move |_: &Template| -> Result<Content> { Ok(Content::Bytes(bytes.to_vec())) })
    }

    #[test]
    fn base64_encodes_inner_content() {
        let handler = MapContentRenderTemplate::base64_encode(bytes_handler(b"hello"));
        let content = handler
            .render_template(&Template::new("logo.png", Data::new(), Data::new()))
            .unwrap();
        assert_eq!(content, Content::Text("aGVsbG8=".to_string()));
    }

    #[test]
    fn custom_mapping_is_applied() {
        let handler = MapContentRenderTemplate::new(bytes_handler(b"abc"), |content: Content| {
            Ok(Content::Text(content.into_string().to_uppercase()))
        });
        let content = handler
            .render_template(&Template::new("x", Data::new(), Data::new()))
            .unwrap();
        assert_eq!(content.as_text(), Some("ABC"));
    }
}
