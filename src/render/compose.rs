use super::interface::RenderTemplate;
use crate::container::Mergeable;
use crate::error::Result;
use crate::template::{Content, Data, Template};
use std::rc::Rc;

/// Merges contributed context under the template's explicit data.
///
/// Keys present in the template's own data always win over contributed
/// context. The inner handler receives a new [`Template`] with the merged
/// data and the original name and attributes.
pub struct ComposeRenderTemplate {
    inner: Rc<dyn RenderTemplate>,
    context: Rc<Data>,
}

impl ComposeRenderTemplate {
    pub fn new(inner: Rc<dyn RenderTemplate>, context: Rc<Data>) -> Self {
        Self { inner, context }
    }
}

impl RenderTemplate for ComposeRenderTemplate {
    fn render_template(&self, template: &Template) -> Result<Content> {
        let mut data = (*self.context).clone();
        data.merge_from(template.data().clone());
        self.inner.render_template(&template.with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn data(value: Value) -> Data {
        match value {
            Value::Object(map) => map,
            _ => Data::new(),
        }
    }

    #[test]
    fn explicit_data_wins_over_context() {
        let echo: Rc<dyn RenderTemplate> = Rc::new(|t: &Template| -> Result<Content> {
            Ok(Content::Text(Value::Object(t.data().clone()).to_string()))
        });
        let handler = ComposeRenderTemplate::new(
            echo,
            Rc::new(data(json!({"title": "default", "site": "plates"}))),
        );

        let template = Template::new("home", data(json!({"title": "explicit"})), Data::new());
        let content = handler.render_template(&template).unwrap().into_string();
        let rendered: Value = serde_json::from_str(&content).unwrap();

        assert_eq!(rendered, json!({"title": "explicit", "site": "plates"}));
        assert_eq!(template.data().len(), 1);
    }
}
