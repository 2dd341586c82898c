//! HTML escaping capability injected into templated rendering.

use crate::constants::escape_flags;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Escapes untrusted text for inclusion in markup.
pub type Escaper = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Builds the escaper described by the `escape_flags`/`escape_encoding`
/// configuration. Without flags both quote characters are escaped.
///
/// `escape_flags` is a bitmask; the quote mode is read from its two low
/// bits and every other bit is ignored.
///
/// # Errors
/// * `Error::Configuration` - for an encoding other than UTF-8
pub fn escaper(flags: Option<i64>, encoding: Option<&str>) -> Result<Escaper> {
    if let Some(encoding) = encoding {
        if !encoding.eq_ignore_ascii_case("utf-8") && !encoding.eq_ignore_ascii_case("utf8") {
            return Err(Error::Configuration(format!(
                "unsupported escape encoding '{encoding}', only UTF-8 is available"
            )));
        }
    }

    let quote_mode = flags.unwrap_or(escape_flags::BOTH_QUOTES) & escape_flags::BOTH_QUOTES;
    let escaper: Escaper = match quote_mode {
        escape_flags::NO_QUOTES => {
            Arc::new(|text: &str| html_escape::encode_text(text).into_owned())
        }
        escape_flags::SINGLE_QUOTES => {
            Arc::new(|text: &str| html_escape::encode_single_quoted_attribute(text).into_owned())
        }
        escape_flags::DOUBLE_QUOTES => {
            Arc::new(|text: &str| html_escape::encode_double_quoted_attribute(text).into_owned())
        }
        _ => Arc::new(|text: &str| html_escape::encode_quoted_attribute(text).into_owned()),
    };
    Ok(escaper)
}
