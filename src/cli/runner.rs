use crate::cli::Args;
use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;
use crate::ioutils::read_json_argument;
use crate::template::{Content, Data};
use serde_json::Value;
use std::io::Write;

/// Builds the engine described by `args`.
///
/// The config file is loaded first; `--base-dir` and `--no-validate`
/// override the matching keys.
pub fn build_engine(args: &Args) -> Result<Engine> {
    let mut config = match &args.config {
        Some(path) => Config::load_map(path)?,
        None => Data::new(),
    };
    if let Some(base_dir) = &args.base_dir {
        config.insert("base_directory".to_string(), serde_json::to_value(base_dir)?);
    }
    if args.no_validate {
        config.insert("validate_paths".to_string(), Value::Bool(false));
    }
    log::debug!("Engine configuration overrides: {config:?}");
    Engine::with_config(config)
}

/// Renders the template named by `args`.
pub fn render(args: &Args) -> Result<Content> {
    let engine = build_engine(args)?;
    let data = read_json_argument(args.data.as_deref())?;
    let attributes = read_json_argument(args.attributes.as_deref())?;
    engine.render(&args.template, data, attributes)
}

/// Renders the template named by `args` to stdout.
pub fn run(args: Args) -> Result<()> {
    let content = render(&args)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
