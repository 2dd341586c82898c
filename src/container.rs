//! Lazy, memoized service container.
//!
//! Entries are keyed by name and come in three flavours: plain values,
//! factories resolved at most once, and composed entries whose value is the
//! fold of an ordered list of wrappers over a base value.
//!
//! Once an entry has been resolved its value is frozen. Redefining it with
//! [`Container::add`], [`Container::add_factory`] or
//! [`Container::add_composed`] afterwards replaces the definition but `get`
//! keeps returning the cached value, so all registration must happen before
//! first use. [`Container::merge`] is the one operation that replaces a
//! resolved value.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, trace};
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

type AnyValue = Rc<dyn Any>;
type FactoryFn = Rc<dyn Fn(&Container) -> Result<AnyValue>>;
type BaseFn = Rc<dyn Fn(&Container) -> Result<Box<dyn Any>>>;
type WrapperFn = Rc<dyn Fn(Box<dyn Any>, &Container) -> Result<Box<dyn Any>>>;

#[derive(Clone)]
enum Definition {
    Value(AnyValue),
    Factory(FactoryFn),
    Composed { base: BaseFn, wrappers: Vec<WrapperFn> },
}

impl Definition {
    fn kind(&self) -> &'static str {
        match self {
            Definition::Value(_) => "value",
            Definition::Factory(_) => "factory",
            Definition::Composed { .. } => "composed",
        }
    }
}

/// Mapping types that [`Container::merge`] can shallow-merge.
pub trait Mergeable {
    /// Inserts every entry of `other`, overriding existing keys.
    fn merge_from(&mut self, other: Self);
}

impl Mergeable for serde_json::Map<String, serde_json::Value> {
    fn merge_from(&mut self, other: Self) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }
}

impl<V> Mergeable for IndexMap<String, V> {
    fn merge_from(&mut self, other: Self) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }
}

/// Explicit, owned registry of lazily resolved values.
///
/// The container is single-threaded: it relies on `RefCell` for interior
/// mutability and hands out `Rc` handles, so it is neither `Send` nor `Sync`.
/// Factories may resolve other keys while they run; a key that transitively
/// asks for itself fails with [`Error::CircularDependency`].
#[derive(Default)]
pub struct Container {
    definitions: RefCell<HashMap<String, Definition>>,
    resolved: RefCell<HashMap<String, AnyValue>>,
    resolving: RefCell<HashSet<String>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `key` as an already resolved value.
    pub fn add<T: Any>(&self, key: impl Into<String>, value: T) {
        self.define(key.into(), Definition::Value(Rc::new(value)));
    }

    /// Defines `key` as a factory, evaluated on first `get` and memoized.
    pub fn add_factory<T, F>(&self, key: impl Into<String>, factory: F)
    where
        T: Any,
        F: Fn(&Container) -> Result<T> + 'static,
    {
        let factory: FactoryFn =
            Rc::new(move |c: &Container| Ok(Rc::new(factory(c)?) as AnyValue));
        self.define(key.into(), Definition::Factory(factory));
    }

    /// Defines `key` as a composed entry with `base` and no wrappers.
    ///
    /// Calling it again on the same key discards previously added wrappers.
    pub fn add_composed<T, F>(&self, key: impl Into<String>, base: F)
    where
        T: Any,
        F: Fn(&Container) -> Result<T> + 'static,
    {
        let base: BaseFn =
            Rc::new(move |c: &Container| Ok(Box::new(base(c)?) as Box<dyn Any>));
        self.define(key.into(), Definition::Composed { base, wrappers: Vec::new() });
    }

    /// Appends `wrapper` to the composed entry `key`.
    ///
    /// # Errors
    /// * `Error::Configuration` - if `key` was not defined with [`Container::add_composed`]
    pub fn wrap_composed<T, F>(&self, key: &str, wrapper: F) -> Result<()>
    where
        T: Any,
        F: Fn(T, &Container) -> Result<T> + 'static,
    {
        let mut definitions = self.definitions.borrow_mut();
        match definitions.get_mut(key) {
            Some(Definition::Composed { wrappers, .. }) => {
                let owned_key = key.to_string();
                wrappers.push(Rc::new(move |acc: Box<dyn Any>, c: &Container| {
                    let acc = acc.downcast::<T>().map_err(|_| Error::TypeMismatch {
                        key: owned_key.clone(),
                        expected: type_name::<T>(),
                    })?;
                    Ok(Box::new(wrapper(*acc, c)?) as Box<dyn Any>)
                }));
                trace!("Wrapped composed container key '{key}'.");
                Ok(())
            }
            Some(other) => Err(Error::Configuration(format!(
                "container key '{key}' is not composed (defined as {})",
                other.kind()
            ))),
            None => Err(Error::Configuration(format!(
                "container key '{key}' is not composed (undefined)"
            ))),
        }
    }

    /// Shallow-merges `partial` over the current value of `key`.
    ///
    /// The current value is resolved first, so factories and composed entries
    /// are evaluated. The merged mapping is stored as a plain resolved value.
    pub fn merge<T>(&self, key: &str, partial: T) -> Result<()>
    where
        T: Mergeable + Clone + Any,
    {
        let current = self.get::<T>(key)?;
        let mut merged = (*current).clone();
        merged.merge_from(partial);

        let merged: AnyValue = Rc::new(merged);
        self.definitions
            .borrow_mut()
            .insert(key.to_string(), Definition::Value(merged.clone()));
        self.resolved.borrow_mut().insert(key.to_string(), merged);
        trace!("Merged container key '{key}'.");
        Ok(())
    }

    /// Returns the memoized value of `key`, resolving it on first access.
    ///
    /// # Errors
    /// * `Error::UnknownKey` - if `key` was never defined
    /// * `Error::TypeMismatch` - if the value is not a `T`
    /// * `Error::CircularDependency` - if resolving `key` requires `key`
    pub fn get<T: Any>(&self, key: &str) -> Result<Rc<T>> {
        self.resolve(key)?.downcast::<T>().map_err(|_| Error::TypeMismatch {
            key: key.to_string(),
            expected: type_name::<T>(),
        })
    }

    /// Whether `key` has a definition.
    pub fn has(&self, key: &str) -> bool {
        self.definitions.borrow().contains_key(key)
    }

    /// Whether `key` has been resolved and is therefore frozen.
    pub fn is_resolved(&self, key: &str) -> bool {
        self.resolved.borrow().contains_key(key)
    }

    fn define(&self, key: String, definition: Definition) {
        trace!("Defining container key '{key}' as {}.", definition.kind());
        self.definitions.borrow_mut().insert(key, definition);
    }

    fn resolve(&self, key: &str) -> Result<AnyValue> {
        if let Some(value) = self.resolved.borrow().get(key) {
            return Ok(value.clone());
        }

        let definition = self
            .definitions
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::UnknownKey { key: key.to_string() })?;

        if !self.resolving.borrow_mut().insert(key.to_string()) {
            return Err(Error::CircularDependency { key: key.to_string() });
        }
        let result = self.evaluate(definition);
        self.resolving.borrow_mut().remove(key);

        let value = result?;
        debug!("Resolved container key '{key}'.");
        self.resolved.borrow_mut().insert(key.to_string(), value.clone());
        Ok(value)
    }

    fn evaluate(&self, definition: Definition) -> Result<AnyValue> {
        match definition {
            Definition::Value(value) => Ok(value),
            Definition::Factory(factory) => factory(self),
            Definition::Composed { base, wrappers } => {
                let mut acc = base(self)?;
                for wrapper in &wrappers {
                    acc = wrapper(acc, self)?;
                }
                Ok(Rc::from(acc))
            }
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definitions = self.definitions.borrow();
        let mut keys: Vec<_> = definitions.keys().collect();
        keys.sort();
        f.debug_struct("Container")
            .field("keys", &keys)
            .field("resolved", &self.resolved.borrow().len())
            .finish()
    }
}
