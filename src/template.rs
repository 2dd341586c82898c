//! The render request value object and the content it produces.

use crate::constants::attributes;
use crate::ext::PathExt;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Ordered string-keyed mapping used for template data and attributes.
pub type Data = Map<String, Value>;

/// Immutable description of a single render request.
///
/// Nothing in the render chain mutates a `Template`; contributors that need
/// different data build a new one with [`Template::with_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    data: Data,
    attributes: Data,
}

impl Template {
    pub fn new(name: impl Into<String>, data: Data, attributes: Data) -> Self {
        Self { name: name.into(), data, attributes }
    }

    /// Logical name, with or without an explicit extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit render-time variables.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Request-scoped flags consumed by handlers and extensions.
    pub fn attributes(&self) -> &Data {
        &self.attributes
    }

    /// Returns the attribute `key` when it holds a string.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Returns a copy of this template carrying `data` instead of its own.
    pub fn with_data(&self, data: Data) -> Self {
        Self { name: self.name.clone(), data, attributes: self.attributes.clone() }
    }
}

/// Rendered output: text for executed templates, raw bytes for static files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Bytes(bytes) => bytes,
        }
    }

    /// Returns the text when this is `Content::Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Text(text) => text.into_bytes(),
            Content::Bytes(bytes) => bytes,
        }
    }

    /// Converts to a string, replacing invalid UTF-8 sequences.
    pub fn into_string(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
            },
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Bytes(bytes)
    }
}

/// Resolves a template's extension and backing file.
///
/// Resolution rules:
/// - the `ext` attribute wins over the extension found in the name, which
///   wins over the configured default extension;
/// - the `path` attribute, when present, is used verbatim as the file path;
/// - otherwise the name gets the extension appended when it has none, and is
///   joined under the base directory when one is configured and the name is
///   relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    base_directory: Option<PathBuf>,
    default_extension: String,
}

impl TemplatePaths {
    pub fn new(base_directory: Option<PathBuf>, default_extension: impl Into<String>) -> Self {
        Self {
            base_directory,
            default_extension: normalize_extension(&default_extension.into()).to_string(),
        }
    }

    pub fn base_directory(&self) -> Option<&Path> {
        self.base_directory.as_deref()
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    /// The extension used for dispatch, without a leading dot.
    pub fn extension(&self, template: &Template) -> String {
        if let Some(ext) = template.attribute_str(attributes::EXT) {
            return normalize_extension(ext).to_string();
        }
        name_extension(template.name())
            .unwrap_or(&self.default_extension)
            .to_string()
    }

    /// The candidate filesystem path backing `template`.
    pub fn resolve(&self, template: &Template) -> PathBuf {
        if let Some(path) = template.attribute_str(attributes::PATH) {
            return PathBuf::from(path);
        }

        let name = template.name();
        let file = match name_extension(name) {
            Some(_) => PathBuf::from(name),
            None => PathBuf::from(format!("{name}.{}", self.extension(template))),
        };

        match &self.base_directory {
            Some(base) if file.is_relative() => base.join(file),
            _ => file,
        }
    }
}

fn normalize_extension(ext: &str) -> &str {
    ext.trim_start_matches('.')
}

fn name_extension(name: &str) -> Option<&str> {
    Path::new(name).file_extension()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Data {
        match value {
            Value::Object(map) => map,
            _ => Data::new(),
        }
    }

    fn template(name: &str, attributes: Value) -> Template {
        Template::new(name, Data::new(), data(attributes))
    }

    #[test]
    fn with_data_keeps_name_and_attributes() {
        let original = Template::new("home", data(json!({"a": 1})), data(json!({"layout": "main"})));
        let replaced = original.with_data(data(json!({"b": 2})));

        assert_eq!(replaced.name(), "home");
        assert_eq!(replaced.attributes(), original.attributes());
        assert_eq!(replaced.data().get("b"), Some(&json!(2)));
        assert_eq!(original.data().get("a"), Some(&json!(1)));
    }

    #[test]
    fn extension_prefers_attribute_then_name_then_default() {
        let paths = TemplatePaths::new(None, "phtml");
        assert_eq!(paths.extension(&template("home", json!({}))), "phtml");
        assert_eq!(paths.extension(&template("logo.png", json!({}))), "png");
        assert_eq!(paths.extension(&template("logo.png", json!({"ext": ".jpg"}))), "jpg");
    }

    #[test]
    fn resolve_appends_extension_and_joins_base_directory() {
        let paths = TemplatePaths::new(Some(PathBuf::from("views")), ".phtml");
        assert_eq!(paths.default_extension(), "phtml");
        assert_eq!(
            paths.resolve(&template("users/list", json!({}))),
            PathBuf::from("views/users/list.phtml")
        );
        assert_eq!(
            paths.resolve(&template("style.css", json!({}))),
            PathBuf::from("views/style.css")
        );
        assert_eq!(
            paths.resolve(&template("notes", json!({"ext": "txt"}))),
            PathBuf::from("views/notes.txt")
        );
    }

    #[test]
    fn resolve_honours_path_attribute() {
        let paths = TemplatePaths::new(Some(PathBuf::from("views")), "phtml");
        assert_eq!(
            paths.resolve(&template("ignored", json!({"path": "/tmp/explicit.phtml"}))),
            PathBuf::from("/tmp/explicit.phtml")
        );
    }

    #[test]
    fn content_conversions() {
        let text = Content::from("hi".to_string());
        assert_eq!(text.as_text(), Some("hi"));
        assert_eq!(text.as_bytes(), b"hi");

        let bytes = Content::from(vec![0x68, 0x69, 0xff]);
        assert_eq!(bytes.as_text(), None);
        assert_eq!(bytes.clone().into_string(), "hi\u{fffd}");
        assert_eq!(bytes.into_bytes(), vec![0x68, 0x69, 0xff]);
    }
}
