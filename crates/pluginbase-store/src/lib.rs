//! # pluginbase-store
//!
//! [`TreeStore`](pluginbase_core::TreeStore) implementations: human-editable
//! TOML and JSON language files, plus an in-memory store.

pub mod json_store;
pub mod memory;
pub mod toml_store;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use toml_store::TomlFileStore;

use pluginbase_core::config::{MessagesConfig, StoreFormat};
use pluginbase_core::TreeStore;

/// Header written at the top of TOML language files.
pub const LANGUAGE_FILE_HEADER: &str = "You may insert color into the strings by preceding the color code with &.
Example: &cThis is red

Any place where there is %s represents data to be filled in by the plugin.
MAKE SURE THESE REMAIN IN ANY REPLACEMENTS!";

/// Build the file store selected by the `[messages]` config section.
pub fn from_config(config: &MessagesConfig) -> Box<dyn TreeStore> {
    let path = config.language_path();
    match config.format {
        StoreFormat::Toml => Box::new(TomlFileStore::new(path)),
        StoreFormat::Json => Box::new(JsonFileStore::new(path)),
    }
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &std::path::Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
