use super::interface::{Predicate, RenderTemplate};
use crate::error::{Error, Result};
use crate::template::{Content, Template};
use log::debug;
use std::rc::Rc;

/// Chain of `(predicate, handler)` pairs; the first matching predicate wins.
///
/// The default chain ends with a `match_stub(true)` entry so every request
/// is handled. A chain without such a fallback fails with
/// `Error::NoHandlerMatched` when nothing applies.
#[derive(Clone, Default)]
pub struct FileSystemRenderTemplate {
    handlers: Vec<(Predicate, Rc<dyn RenderTemplate>)>,
}

impl FileSystemRenderTemplate {
    pub fn new(handlers: Vec<(Predicate, Rc<dyn RenderTemplate>)>) -> Self {
        Self { handlers }
    }

    /// Appends a handler after the existing ones.
    pub fn push(&mut self, predicate: Predicate, handler: Rc<dyn RenderTemplate>) {
        self.handlers.push((predicate, handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl RenderTemplate for FileSystemRenderTemplate {
    fn render_template(&self, template: &Template) -> Result<Content> {
        for (index, (predicate, handler)) in self.handlers.iter().enumerate() {
            if predicate(template) {
                debug!("Template '{}' dispatched to handler #{index}.", template.name());
                return handler.render_template(template);
            }
        }
        Err(Error::NoHandlerMatched { name: template.name().to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::interface::match_stub;
    use crate::template::Data;
    use std::cell::Cell;

    fn named(label: &'static str) -> Rc<dyn RenderTemplate> {
        Rc::new(move |_: &Template| -> Result<Content> { Ok(Content::Text(label.to_string())) })
    }

    fn template(name: &str) -> Template {
        Template::new(name, Data::new(), Data::new())
    }

    #[test]
    fn first_match_wins() {
        let is_png: Predicate = Rc::new(|t: &Template| t.name().ends_with(".png"));
        let chain = FileSystemRenderTemplate::new(vec![
            (is_png, named("image")),
            (match_stub(true), named("static")),
            (match_stub(true), named("unreachable")),
        ]);

        let image = chain.render_template(&template("a.png")).unwrap();
        assert_eq!(image.as_text(), Some("image"));
        let other = chain.render_template(&template("a.txt")).unwrap();
        assert_eq!(other.as_text(), Some("static"));
    }

    #[test]
    fn later_handlers_are_not_invoked() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let counting: Rc<dyn RenderTemplate> = Rc::new(move |_: &Template| -> Result<Content> {
            counter.set(counter.get() + 1);
            Ok(Content::Text(String::new()))
        });
        let chain = FileSystemRenderTemplate::new(vec![
            (match_stub(true), named("first")),
            (match_stub(true), counting),
        ]);

        chain.render_template(&template("x")).unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn no_match_is_an_error() {
        let mut chain = FileSystemRenderTemplate::default();
        assert!(chain.is_empty());
        chain.push(match_stub(false), named("never"));
        assert_eq!(chain.len(), 1);

        assert!(matches!(
            chain.render_template(&template("home")),
            Err(Error::NoHandlerMatched { name }) if name == "home"
        ));
    }
}
