//! Optional behaviour modules that plug into an [`Engine`](crate::engine::Engine).
//!
//! An extension only talks to the engine through its registration surface:
//! `add_config`, `add_methods`, `push_composers`, `unshift_composers`,
//! `push_render_template_factory` and the container itself.

use crate::engine::Engine;
use crate::error::Result;

pub mod data;

pub use data::DataExtension;

/// A collaborator that registers behaviour against an engine.
pub trait Extension {
    /// Registers this extension. Called once, before the first render.
    fn register(&self, engine: &Engine) -> Result<()>;
}

impl<F> Extension for F
where
    F: Fn(&Engine) -> Result<()>,
{
    fn register(&self, engine: &Engine) -> Result<()> {
        self(engine)
    }
}
