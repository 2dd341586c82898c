use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};
use crate::template::Data;

/// Parses a JSON object; an empty or whitespace-only buffer is an empty mapping.
pub fn parse_string_to_json(buf: &str) -> Result<Data> {
    if buf.trim().is_empty() {
        return Ok(Data::new());
    }
    match serde_json::from_str(buf)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::Configuration(format!(
            "expected a JSON object, got '{other}'"
        ))),
    }
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Reads a JSON object argument, taking it from stdin when it is `-`.
pub fn read_json_argument(arg: Option<&str>) -> Result<Data> {
    match arg {
        None => Ok(Data::new()),
        Some(STDIN_INDICATOR) => parse_string_to_json(&read_from(std::io::stdin())?),
        Some(json) => parse_string_to_json(json),
    }
}
