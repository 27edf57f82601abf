use crate::{error::PluginBaseError, tree::LanguageTree};

/// Where translations live between runs.
///
/// Every backing format (TOML file, JSON file, in-memory) implements this
/// trait so reconciliation never depends on a concrete file format.
pub trait TreeStore {
    /// Human-readable description used in log lines (usually a path).
    fn describe(&self) -> String;

    /// Read the persisted tree.
    fn load(&mut self) -> Result<LanguageTree, PluginBaseError>;

    /// Persist the tree, replacing whatever was stored before.
    fn save(&mut self, tree: &LanguageTree) -> Result<(), PluginBaseError>;

    /// A fresh tree to use when loading fails.
    fn create_empty(&self) -> LanguageTree {
        LanguageTree::new()
    }
}
