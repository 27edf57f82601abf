//! # pluginbase-core
//!
//! Core types, traits, configuration, and error handling shared by the
//! pluginbase message catalog crates.

pub mod config;
pub mod error;
pub mod locale;
pub mod traits;
pub mod tree;

pub use config::shellexpand;
pub use error::PluginBaseError;
pub use locale::Locale;
pub use traits::TreeStore;
pub use tree::{LanguageTree, TreeNode};
