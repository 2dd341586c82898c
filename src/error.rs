use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// `Container::get` on a key that was never defined.
    #[error("Unknown container key '{key}'.")]
    UnknownKey { key: String },

    /// Registration-time misconfiguration, e.g. wrapping a key that is not composed.
    #[error("Configuration error: {0}.")]
    Configuration(String),

    /// The stored value of `key` is not of the requested type.
    #[error("Container key '{key}' does not hold a value of type {expected}.")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Circular dependency while resolving container key '{key}'.")]
    CircularDependency { key: String },

    #[error("Template '{name}' could not be found at '{}'.", path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    #[error("No render handler matched template '{name}'.")]
    NoHandlerMatched { name: String },

    #[error("No method '{method}' found for engine.")]
    UnknownMethod { method: String },

    /// Failures raised by collaborator closures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with plates' Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_not_found_mentions_name_and_path() {
        let err = Error::TemplateNotFound {
            name: "home".to_string(),
            path: PathBuf::from("views/home.phtml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("home"));
        assert!(msg.contains("views/home.phtml"));
    }

    #[test]
    fn io_errors_convert() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn unknown_method_display() {
        let err = Error::UnknownMethod { method: "fly".to_string() };
        assert_eq!(err.to_string(), "No method 'fly' found for engine.");
    }
}
