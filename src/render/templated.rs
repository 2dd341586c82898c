use super::filters::register_filters;
use super::interface::RenderTemplate;
use crate::error::Result;
use crate::escape::Escaper;
use crate::ext::PathExt;
use crate::template::{Content, Data, Template, TemplatePaths};
use log::debug;
use minijinja::{AutoEscape, Environment};
use serde_json::json;
use std::path::Path;

/// Executes templated markup with MiniJinja.
///
/// The template's data is exposed at the top level of the scope. The render
/// context (`name`, `path`, `ext` and `attributes`) is exposed under the
/// configured variable name and shadows a data key of the same name.
/// Auto-escaping is off; templates escape explicitly with the `e` filter,
/// which is backed by the injected [`Escaper`]. When a base directory is
/// configured, `include`/`extends` resolve relative to it.
pub struct TemplatedRenderTemplate {
    env: Environment<'static>,
    paths: TemplatePaths,
    context_var_name: String,
}

impl TemplatedRenderTemplate {
    pub fn new(
        paths: TemplatePaths,
        context_var_name: impl Into<String>,
        escaper: Escaper,
    ) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_: &str| AutoEscape::None);
        if let Some(base) = paths.base_directory() {
            env.set_loader(minijinja::path_loader(base));
        }
        register_filters(&mut env, escaper);

        Self { env, paths, context_var_name: context_var_name.into() }
    }

    fn scope(&self, template: &Template, path: &Path) -> Data {
        let mut scope = template.data().clone();
        scope.insert(
            self.context_var_name.clone(),
            json!({
                "name": template.name(),
                "path": path.display().to_string(),
                "ext": self.paths.extension(template),
                "attributes": template.attributes(),
            }),
        );
        scope
    }
}

impl RenderTemplate for TemplatedRenderTemplate {
    fn render_template(&self, template: &Template) -> Result<Content> {
        let path = self.paths.resolve(template);
        debug!("Executing template '{}' from '{}'.", template.name(), path.display());

        let source = std::fs::read_to_string(&path)?;
        let name = path.to_str_checked()?;
        let rendered = self.env.render_named_str(name, &source, self.scope(template, &path))?;
        Ok(Content::Text(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::escape::escaper;
    use serde_json::Value;
    use std::fs;

    fn data(value: Value) -> Data {
        match value {
            Value::Object(map) => map,
            _ => Data::new(),
        }
    }

    fn handler(dir: &Path, var_name: &str) -> TemplatedRenderTemplate {
        TemplatedRenderTemplate::new(
            TemplatePaths::new(Some(dir.to_path_buf()), "phtml"),
            var_name,
            escaper(None, None).unwrap(),
        )
    }

    #[test]
    fn renders_data_and_render_context() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hello.phtml"),
            "Hello {{ name }} from {{ v.name }}.{{ v.ext }} ({{ v.attributes.layout }})",
        )
        .unwrap();

        let template = Template::new(
            "hello",
            data(json!({"name": "World"})),
            data(json!({"layout": "main"})),
        );
        let content = handler(dir.path(), "v").render_template(&template).unwrap();
        assert_eq!(content.as_text(), Some("Hello World from hello.phtml (main)"));
    }

    #[test]
    fn context_variable_name_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.phtml"), "{{ ctx.name }}|{{ v }}").unwrap();

        let template = Template::new("page", data(json!({"v": "plain"})), Data::new());
        let content = handler(dir.path(), "ctx").render_template(&template).unwrap();
        assert_eq!(content.as_text(), Some("page|plain"));
    }

    #[test]
    fn output_is_not_auto_escaped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("raw.phtml"), "{{ html }}|{{ html | e }}").unwrap();

        let template = Template::new("raw", data(json!({"html": "<i>"})), Data::new());
        let content = handler(dir.path(), "v").render_template(&template).unwrap();
        assert_eq!(content.as_text(), Some("<i>|&lt;i&gt;"));
    }

    #[test]
    fn includes_resolve_from_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("partials/nav.phtml"), "[nav {{ title }}]").unwrap();
        fs::write(dir.path().join("layout.phtml"), "{% include 'partials/nav.phtml' %}body")
            .unwrap();

        let template = Template::new("layout", data(json!({"title": "Home"})), Data::new());
        let content = handler(dir.path(), "v").render_template(&template).unwrap();
        assert_eq!(content.as_text(), Some("[nav Home]body"));
    }

    #[test]
    fn syntax_errors_surface_as_minijinja_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.phtml"), "{% if %}").unwrap();

        let template = Template::new("broken", Data::new(), Data::new());
        let result = handler(dir.path(), "v").render_template(&template);
        assert!(matches!(result, Err(Error::MinijinjaError(_))));
    }
}
