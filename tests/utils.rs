use plates::Data;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Converts a `json!` object literal into template data.
pub fn data(value: Value) -> Data {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Writes `contents` to `name` under `dir`, creating parent directories.
pub fn write_template(dir: &Path, name: &str, contents: impl AsRef<[u8]>) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Config mapping pointing the engine at `dir`.
pub fn base_dir_config(dir: &Path) -> Data {
    let mut config = Data::new();
    config.insert("base_directory".to_string(), serde_json::to_value(dir).unwrap());
    config
}
