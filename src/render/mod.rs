//! The render chain: handlers, predicates and the wrappers around them.

pub mod compose;
pub mod filesystem;
pub mod filters;
pub mod interface;
pub mod map_content;
pub mod static_file;
pub mod templated;
pub mod validate_path;

pub use compose::ComposeRenderTemplate;
pub use filesystem::FileSystemRenderTemplate;
pub use interface::{match_extensions, match_stub, Predicate, RenderTemplate};
pub use map_content::MapContentRenderTemplate;
pub use static_file::StaticFileRenderTemplate;
pub use templated::TemplatedRenderTemplate;
pub use validate_path::{default_file_exists, FileExists, ValidatePathRenderTemplate};
