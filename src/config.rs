//! Engine configuration.
//!
//! The engine keeps its configuration as a JSON mapping under the `config`
//! container key so collaborators can merge in keys of their own. [`Config`]
//! is the typed view the render chain reads; unknown keys are ignored by it
//! and left untouched in the mapping.

use crate::constants::{defaults, CONFIG_EXTENSIONS};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::template::{Data, TemplatePaths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Top-level variable exposing the render context inside templates.
    #[serde(default = "get_default_render_context_var_name")]
    pub render_context_var_name: String,
    /// Extension used when a template name carries none.
    #[serde(default = "get_default_extension")]
    pub default_extension: String,
    #[serde(default)]
    pub base_directory: Option<PathBuf>,
    #[serde(default)]
    pub escape_encoding: Option<String>,
    #[serde(default)]
    pub escape_flags: Option<i64>,
    /// Fail with `TemplateNotFound` before dispatch when the file is missing.
    #[serde(default = "get_default_validate_paths")]
    pub validate_paths: bool,
    #[serde(default = "get_default_templated_extensions")]
    pub templated_extensions: Vec<String>,
    #[serde(default = "get_default_binary_asset_extensions")]
    pub binary_asset_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render_context_var_name: get_default_render_context_var_name(),
            default_extension: get_default_extension(),
            base_directory: None,
            escape_encoding: None,
            escape_flags: None,
            validate_paths: get_default_validate_paths(),
            templated_extensions: get_default_templated_extensions(),
            binary_asset_extensions: get_default_binary_asset_extensions(),
        }
    }
}

impl Config {
    /// Reads the typed view out of a configuration mapping.
    pub fn from_map(map: &Data) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::Value::Object(map.clone()))?)
    }

    /// Serializes this configuration into a mapping suitable for `Engine::add_config`.
    pub fn to_map(&self) -> Result<Data> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(Error::Configuration("configuration must serialize to a mapping".into())),
        }
    }

    /// Loads a configuration mapping from a `.json`, `.yaml` or `.yml` file.
    pub fn load_map<P: AsRef<Path>>(path: P) -> Result<Data> {
        let path = path.as_ref();
        let extension = path.file_extension().unwrap_or_default();
        let content = std::fs::read_to_string(path)?;

        let value: serde_json::Value = match extension {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                return Err(Error::Configuration(format!(
                    "unsupported config file '{}', expected one of: {}",
                    path.display(),
                    CONFIG_EXTENSIONS.join(", ")
                )))
            }
        };

        match value {
            serde_json::Value::Object(map) => Ok(map),
            serde_json::Value::Null => Ok(Data::new()),
            _ => Err(Error::Configuration(format!(
                "config file '{}' must contain a mapping",
                path.display()
            ))),
        }
    }

    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_map(&Self::load_map(path)?)
    }

    /// Path resolution rules derived from this configuration.
    pub fn paths(&self) -> TemplatePaths {
        TemplatePaths::new(self.base_directory.clone(), self.default_extension.clone())
    }
}

fn get_default_render_context_var_name() -> String {
    defaults::RENDER_CONTEXT_VAR_NAME.to_string()
}

fn get_default_extension() -> String {
    defaults::EXTENSION.to_string()
}

fn get_default_validate_paths() -> bool {
    true
}

fn get_default_templated_extensions() -> Vec<String> {
    defaults::TEMPLATED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn get_default_binary_asset_extensions() -> Vec<String> {
    defaults::BINARY_ASSET_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}
