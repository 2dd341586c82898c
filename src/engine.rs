//! The public rendering API.
//!
//! [`Engine`] owns one [`Container`] and registers the default entries in it:
//!
//! | Key | Kind | Value |
//! |-----|------|-------|
//! | `config` | value (merged) | configuration mapping, see [`Config`] |
//! | `engine_methods` | value (merged) | [`EngineMethods`] for [`Engine::call`] |
//! | `compose` | composed | context data merged under explicit template data |
//! | `fileExists` | value | [`FileExists`] used by path validation |
//! | `escape` | factory | [`Escaper`] built from the escape settings |
//! | `renderTemplate.factories` | composed | chain-wrapping [`RenderTemplateFactory`] list |
//! | `renderTemplate` | factory | the assembled render chain |
//!
//! The chain is built on the first render and memoized, which freezes every
//! entry it reads. Collaborators therefore register everything before the
//! first call to [`Engine::render`].

use crate::config::Config;
use crate::constants::keys;
use crate::container::{Container, Mergeable};
use crate::error::{Error, Result};
use crate::escape::{escaper, Escaper};
use crate::extension::{DataExtension, Extension};
use crate::render::{
    default_file_exists, match_extensions, match_stub, ComposeRenderTemplate, FileExists,
    FileSystemRenderTemplate, MapContentRenderTemplate, RenderTemplate,
    StaticFileRenderTemplate, TemplatedRenderTemplate, ValidatePathRenderTemplate,
};
use crate::template::{Content, Data, Template};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::path::Path;
use std::rc::Rc;

/// A collaborator-registered engine method, invoked as `method(engine, args)`.
pub type EngineMethod = Rc<dyn Fn(&Engine, &[Value]) -> Result<Value>>;

/// Engine methods by name.
pub type EngineMethods = IndexMap<String, EngineMethod>;

/// Wraps the render chain, e.g. to put extra handlers in front of it.
pub type RenderTemplateFactory = Rc<dyn Fn(Rc<dyn RenderTemplate>) -> Rc<dyn RenderTemplate>>;

#[derive(Debug)]
pub struct Engine {
    container: Container,
}

impl Engine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(Data::new())
    }

    /// Creates an engine and merges `config` over the defaults.
    pub fn with_config(config: Data) -> Result<Self> {
        let container = Container::new();
        container.add(keys::ENGINE_METHODS, EngineMethods::new());
        container.add(keys::CONFIG, Config::default().to_map()?);
        container.add_composed(keys::COMPOSE, |_| Ok(Data::new()));
        container.add(keys::FILE_EXISTS, default_file_exists());
        container.add_factory(keys::ESCAPE, |c| {
            let config = Config::from_map(&*c.get::<Data>(keys::CONFIG)?)?;
            escaper(config.escape_flags, config.escape_encoding.as_deref())
        });
        container.add_composed(keys::RENDER_TEMPLATE_FACTORIES, |_| {
            Ok(Vec::<RenderTemplateFactory>::new())
        });
        container.add_factory(keys::RENDER_TEMPLATE, build_render_template);

        let engine = Self { container };
        engine.register(&DataExtension)?;
        engine.add_config(config)?;
        Ok(engine)
    }

    /// Creates an engine from a typed configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_config(config.to_map()?)
    }

    /// Renders the template `name` with explicit `data` and request `attributes`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` - path validation is on and no file backs the template
    /// * `Error::NoHandlerMatched` - a custom chain has no handler for the template
    /// * Any error raised by the matched handler
    pub fn render(&self, name: &str, data: Data, attributes: Data) -> Result<Content> {
        let render_template =
            self.container.get::<Rc<dyn RenderTemplate>>(keys::RENDER_TEMPLATE)?;
        debug!("Rendering template '{name}'.");
        render_template.render_template(&Template::new(name, data, attributes))
    }

    /// Renders `name` without attributes and returns the output as a string.
    pub fn render_text(&self, name: &str, data: Data) -> Result<String> {
        Ok(self.render(name, data, Data::new())?.into_string())
    }

    /// Lets `extension` register itself against this engine.
    pub fn register<E: Extension + ?Sized>(&self, extension: &E) -> Result<()> {
        extension.register(self)
    }

    /// Shallow-merges `config` over the current configuration.
    ///
    /// The merged mapping is checked against the typed [`Config`] view and
    /// the escape settings before it is stored; keys unknown to [`Config`]
    /// pass through unchecked.
    ///
    /// # Errors
    /// * `Error::JsonError` - a known key holds a value of the wrong type
    /// * `Error::Configuration` - the escape settings are unsupported
    pub fn add_config(&self, config: Data) -> Result<()> {
        let mut merged = (*self.container.get::<Data>(keys::CONFIG)?).clone();
        merged.merge_from(config.clone());
        let checked = Config::from_map(&merged)?;
        escaper(checked.escape_flags, checked.escape_encoding.as_deref())?;
        self.container.merge(keys::CONFIG, config)
    }

    /// The typed view of the current configuration.
    pub fn config(&self) -> Result<Config> {
        Config::from_map(&*self.container.get::<Data>(keys::CONFIG)?)
    }

    /// Adds or replaces engine methods callable through [`Engine::call`].
    pub fn add_methods(&self, methods: EngineMethods) -> Result<()> {
        self.container.merge(keys::ENGINE_METHODS, methods)
    }

    /// Invokes the engine method `method` with `args`.
    ///
    /// # Errors
    /// * `Error::UnknownMethod` - if no method of that name was registered
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        let methods = self.container.get::<EngineMethods>(keys::ENGINE_METHODS)?;
        let function = methods
            .get(method)
            .cloned()
            .ok_or_else(|| Error::UnknownMethod { method: method.to_string() })?;
        function(self, args)
    }

    /// Adds a context provider evaluated after the existing ones.
    ///
    /// Its keys override those of earlier providers; explicit template data
    /// still wins.
    pub fn push_composers<F>(&self, provider: F) -> Result<()>
    where
        F: Fn(&Container) -> Result<Data> + 'static,
    {
        self.container.wrap_composed(keys::COMPOSE, move |mut composed: Data, c: &Container| {
            composed.merge_from(provider(c)?);
            Ok(composed)
        })
    }

    /// Adds a context provider evaluated before the existing ones.
    ///
    /// Every other provider overrides its keys.
    pub fn unshift_composers<F>(&self, provider: F) -> Result<()>
    where
        F: Fn(&Container) -> Result<Data> + 'static,
    {
        self.container.wrap_composed(keys::COMPOSE, move |composed: Data, c: &Container| {
            let mut data = provider(c)?;
            data.merge_from(composed);
            Ok(data)
        })
    }

    /// Adds a factory that wraps the render chain.
    ///
    /// Factories are applied in registration order, each wrapping the chain
    /// produced by the previous one, so the last registered runs first.
    pub fn push_render_template_factory<F>(&self, factory: F) -> Result<()>
    where
        F: Fn(Rc<dyn RenderTemplate>) -> Rc<dyn RenderTemplate> + 'static,
    {
        let factory: RenderTemplateFactory = Rc::new(factory);
        self.container.wrap_composed(
            keys::RENDER_TEMPLATE_FACTORIES,
            move |mut factories: Vec<RenderTemplateFactory>, _: &Container| {
                factories.push(factory.clone());
                Ok(factories)
            },
        )
    }

    /// Replaces the existence check used by path validation.
    pub fn set_file_exists<F>(&self, file_exists: F)
    where
        F: Fn(&Path) -> bool + 'static,
    {
        self.container.add(keys::FILE_EXISTS, Rc::new(file_exists) as FileExists);
    }

    pub fn container(&self) -> &Container {
        &self.container
    }
}

/// Assembles the render chain from the container's current entries.
fn build_render_template(c: &Container) -> Result<Rc<dyn RenderTemplate>> {
    let config = Config::from_map(&*c.get::<Data>(keys::CONFIG)?)?;
    let paths = config.paths();
    let escape = c.get::<Escaper>(keys::ESCAPE)?;

    let templated: Rc<dyn RenderTemplate> = Rc::new(TemplatedRenderTemplate::new(
        paths.clone(),
        config.render_context_var_name.clone(),
        (*escape).clone(),
    ));
    let static_file: Rc<dyn RenderTemplate> =
        Rc::new(StaticFileRenderTemplate::new(paths.clone()));
    let binary_asset: Rc<dyn RenderTemplate> =
        Rc::new(MapContentRenderTemplate::base64_encode(static_file.clone()));

    let mut render_template: Rc<dyn RenderTemplate> =
        Rc::new(FileSystemRenderTemplate::new(vec![
            (match_extensions(&config.templated_extensions, &paths), templated),
            (match_extensions(&config.binary_asset_extensions, &paths), binary_asset),
            (match_stub(true), static_file),
        ]));

    if config.validate_paths {
        let file_exists = c.get::<FileExists>(keys::FILE_EXISTS)?;
        render_template = Rc::new(ValidatePathRenderTemplate::new(
            render_template,
            paths,
            (*file_exists).clone(),
        ));
    }

    let factories = c.get::<Vec<RenderTemplateFactory>>(keys::RENDER_TEMPLATE_FACTORIES)?;
    render_template = factories
        .iter()
        .fold(render_template, |render_template, create| create(render_template));

    let context = c.get::<Data>(keys::COMPOSE)?;
    debug!(
        "Built render chain with {} factories and {} context keys.",
        factories.len(),
        context.len()
    );
    Ok(Rc::new(ComposeRenderTemplate::new(render_template, context)))
}
