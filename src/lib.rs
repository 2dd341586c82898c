/// Handles argument parsing and the `plates` binary.
pub mod cli;

/// Typed configuration and config file loading.
pub mod config;

/// Well-known container keys, defaults and CLI constants.
pub mod constants;

/// Lazy, memoized service container.
pub mod container;

/// The rendering facade and collaborator registration surface.
pub mod engine;

/// Defines custom error types.
pub mod error;

/// HTML escaping capability.
pub mod escape;

/// Extension traits for standard library types.
pub mod ext;

/// Collaborators that plug into the engine.
pub mod extension;

/// A set of helpers for reading CLI input.
pub mod ioutils;

/// Handler chain, predicates and wrappers.
pub mod render;

/// The render request value object.
pub mod template;

pub use config::Config;
pub use container::Container;
pub use engine::Engine;
pub use error::{Error, Result};
pub use template::{Content, Data, Template};
