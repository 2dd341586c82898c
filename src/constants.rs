//! Constants used throughout plates

/// Well-known container keys.
pub mod keys {
    pub const CONFIG: &str = "config";
    pub const COMPOSE: &str = "compose";
    pub const ENGINE_METHODS: &str = "engine_methods";
    pub const FILE_EXISTS: &str = "fileExists";
    pub const ESCAPE: &str = "escape";
    pub const RENDER_TEMPLATE: &str = "renderTemplate";
    pub const RENDER_TEMPLATE_FACTORIES: &str = "renderTemplate.factories";
}

/// Template attributes consumed by the render chain.
pub mod attributes {
    /// Explicit extension override.
    pub const EXT: &str = "ext";
    /// Explicit filesystem path, bypassing name resolution.
    pub const PATH: &str = "path";
}

/// Configuration defaults
pub mod defaults {
    pub const RENDER_CONTEXT_VAR_NAME: &str = "v";
    pub const EXTENSION: &str = "phtml";
    pub const TEMPLATED_EXTENSIONS: &[&str] = &["php", "phtml"];
    pub const BINARY_ASSET_EXTENSIONS: &[&str] = &["png", "jpg"];
}

/// HTML quote handling for `escape_flags`.
///
/// Only the two low bits select the quote mode; higher bits are accepted
/// and ignored.
pub mod escape_flags {
    pub const NO_QUOTES: i64 = 0;
    pub const SINGLE_QUOTES: i64 = 1;
    pub const DOUBLE_QUOTES: i64 = 2;
    pub const BOTH_QUOTES: i64 = 3;
}

/// Configuration file extensions understood by `Config::from_file`
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
