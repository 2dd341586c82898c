use crate::escape::Escaper;
use log::warn;
use minijinja::{Environment, Value};
use regex::Regex;

pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        screaming_snake::to_screaming_snake_case, snake::to_snake_case,
        table::to_table_case, train::to_train_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
};

/// Tests if a string matches a regular expression; invalid patterns never match.
///
/// # Arguments
/// * `val` - The string to test
/// * `re` - The regular expression pattern
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Registers the string filters and the injected escaper as `e`/`escape`.
pub fn register_filters(env: &mut Environment<'static>, escaper: Escaper) {
    env.add_filter("camel_case", to_camel_case);
    env.add_filter("kebab_case", to_kebab_case);
    env.add_filter("pascal_case", to_pascal_case);
    env.add_filter("screaming_snake_case", to_screaming_snake_case);
    env.add_filter("snake_case", to_snake_case);
    env.add_filter("table_case", to_table_case);
    env.add_filter("train_case", to_train_case);
    env.add_filter("plural", to_plural);
    env.add_filter("singular", to_singular);
    env.add_filter("regex", regex_filter);

    let escape = escaper.clone();
    env.add_filter("e", move |value: Value| -> String { escape(&value.to_string()) });
    env.add_filter("escape", move |value: Value| -> String { escaper(&value.to_string()) });
}
