//! In-memory language tree store.

use pluginbase_core::{LanguageTree, PluginBaseError, TreeStore};

/// Keeps the tree in memory. Loads and saves can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tree: LanguageTree,
    fail_load: bool,
    fail_save: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts out holding `tree`.
    pub fn with_tree(tree: LanguageTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    pub fn fail_load(mut self, fail: bool) -> Self {
        self.fail_load = fail;
        self
    }

    pub fn fail_save(mut self, fail: bool) -> Self {
        self.fail_save = fail;
        self
    }

    /// The tree as last saved.
    pub fn tree(&self) -> &LanguageTree {
        &self.tree
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl TreeStore for MemoryStore {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn load(&mut self) -> Result<LanguageTree, PluginBaseError> {
        if self.fail_load {
            return Err(PluginBaseError::Store("load disabled".to_string()));
        }
        Ok(self.tree.clone())
    }

    fn save(&mut self, tree: &LanguageTree) -> Result<(), PluginBaseError> {
        if self.fail_save {
            return Err(PluginBaseError::Store("save disabled".to_string()));
        }
        self.tree = tree.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replaces_tree() {
        let mut store = MemoryStore::new();
        let mut tree = LanguageTree::new();
        tree.set_string(&["a"], "b");
        store.save(&tree).unwrap();
        assert_eq!(store.load().unwrap(), tree);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_failures() {
        let mut store = MemoryStore::new().fail_load(true).fail_save(true);
        assert!(store.load().is_err());
        assert!(store.save(&LanguageTree::new()).is_err());
        assert_eq!(store.saves(), 0);
        assert!(store.create_empty().is_empty());
    }
}
