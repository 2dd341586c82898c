use crate::error::Result;
use crate::template::{Content, Template, TemplatePaths};
use std::collections::HashSet;
use std::rc::Rc;

/// A handler that turns a [`Template`] into [`Content`].
pub trait RenderTemplate {
    /// Renders `template`.
    ///
    /// # Arguments
    /// * `template` - The render request
    ///
    /// # Returns
    /// * `Result<Content>` - Rendered text or raw bytes
    fn render_template(&self, template: &Template) -> Result<Content>;
}

impl<F> RenderTemplate for F
where
    F: Fn(&Template) -> Result<Content>,
{
    fn render_template(&self, template: &Template) -> Result<Content> {
        self(template)
    }
}

/// Decides whether a handler applies to a template.
pub type Predicate = Rc<dyn Fn(&Template) -> bool>;

/// Matches templates whose resolved extension is one of `extensions`.
///
/// Comparison is case-insensitive and ignores a leading dot. The extension
/// comes from the `ext` attribute, then the template name, then the default
/// extension of `paths`.
pub fn match_extensions<I, S>(extensions: I, paths: &TemplatePaths) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extensions: HashSet<String> = extensions
        .into_iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .collect();
    let paths = paths.clone();
    Rc::new(move |template: &Template| {
        extensions.contains(&paths.extension(template).to_lowercase())
    })
}

/// Matches every template with the constant `value`.
pub fn match_stub(value: bool) -> Predicate {
    Rc::new(move |_: &Template| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Data;
    use serde_json::{json, Value};

    fn template(name: &str, attributes: Value) -> Template {
        let attributes = match attributes {
            Value::Object(map) => map,
            _ => Data::new(),
        };
        Template::new(name, Data::new(), attributes)
    }

    #[test]
    fn matches_extensions_case_insensitively() {
        let paths = TemplatePaths::new(None, "phtml");
        let predicate = match_extensions(["PNG", ".jpg"], &paths);

        assert!(predicate(&template("logo.png", json!({}))));
        assert!(predicate(&template("photo.JPG", json!({}))));
        assert!(!predicate(&template("home", json!({}))));
        assert!(predicate(&template("home", json!({"ext": "png"}))));
    }

    #[test]
    fn default_extension_is_the_fallback() {
        let paths = TemplatePaths::new(None, "phtml");
        let predicate = match_extensions(vec!["phtml".to_string()], &paths);
        assert!(predicate(&template("users/list", json!({}))));
    }

    #[test]
    fn stub_is_constant() {
        assert!(match_stub(true)(&template("anything.bin", json!({}))));
        assert!(!match_stub(false)(&template("anything.bin", json!({}))));
    }

    #[test]
    fn closures_are_handlers() {
        let handler = |t: &Template| -> Result<Content> { Ok(Content::Text(t.name().to_uppercase())) };
        let content = handler.render_template(&template("home", json!({}))).unwrap();
        assert_eq!(content, Content::Text("HOME".to_string()));
    }
}
