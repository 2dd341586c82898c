use super::Extension;
use crate::engine::{Engine, EngineMethod, EngineMethods};
use crate::error::{Error, Result};
use crate::template::Data;
use serde_json::Value;
use std::rc::Rc;

/// Shared template data.
///
/// Adds two engine methods, each taking one mapping argument:
/// - `addGlobals`: data visible to every template, overriding earlier
///   contributed context;
/// - `addDefaults`: fallback data that every other contribution overrides.
///
/// Explicit render data always wins over both.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataExtension;

impl Extension for DataExtension {
    fn register(&self, engine: &Engine) -> Result<()> {
        let mut methods = EngineMethods::new();
        methods.insert("addGlobals".to_string(), Rc::new(add_globals) as EngineMethod);
        methods.insert("addDefaults".to_string(), Rc::new(add_defaults) as EngineMethod);
        engine.add_methods(methods)
    }
}

fn add_globals(engine: &Engine, args: &[Value]) -> Result<Value> {
    let globals = mapping_argument("addGlobals", args)?;
    engine.push_composers(move |_| Ok(globals.clone()))?;
    Ok(Value::Null)
}

fn add_defaults(engine: &Engine, args: &[Value]) -> Result<Value> {
    let defaults = mapping_argument("addDefaults", args)?;
    engine.unshift_composers(move |_| Ok(defaults.clone()))?;
    Ok(Value::Null)
}

fn mapping_argument(method: &str, args: &[Value]) -> Result<Data> {
    match args {
        [Value::Object(map)] => Ok(map.clone()),
        _ => Err(Error::Configuration(format!(
            "engine method '{method}' expects a single mapping argument"
        ))),
    }
}
