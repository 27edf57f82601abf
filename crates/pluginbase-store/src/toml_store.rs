//! Language files as nested TOML tables.

use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::{ensure_parent, LANGUAGE_FILE_HEADER};
use pluginbase_core::{LanguageTree, PluginBaseError, TreeNode, TreeStore};

/// Reads and writes a language tree as a TOML document.
///
/// ```toml
/// [generic]
/// success = "§a[SUCCESS]"
/// ```
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeStore for TomlFileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&mut self) -> Result<LanguageTree, PluginBaseError> {
        if !self.path.exists() {
            debug!("language file {} does not exist yet", self.path.display());
            return Ok(LanguageTree::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let table: Table = toml::from_str(&content).map_err(|e| {
            PluginBaseError::Store(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        let mut tree = LanguageTree::new();
        read_table(&table, &mut Vec::new(), &mut tree);
        Ok(tree)
    }

    fn save(&mut self, tree: &LanguageTree) -> Result<(), PluginBaseError> {
        ensure_parent(&self.path)?;
        let body = toml::to_string_pretty(&write_table(tree.root())).map_err(|e| {
            PluginBaseError::Store(format!("failed to serialize {}: {e}", self.path.display()))
        })?;
        let header: String = LANGUAGE_FILE_HEADER
            .lines()
            .map(|line| {
                if line.is_empty() {
                    "#\n".to_string()
                } else {
                    format!("# {line}\n")
                }
            })
            .collect();
        std::fs::write(&self.path, format!("{header}\n{body}"))?;
        debug!("wrote language file {}", self.path.display());
        Ok(())
    }
}

fn read_table(table: &Table, path: &mut Vec<String>, tree: &mut LanguageTree) {
    for (key, value) in table {
        path.push(key.clone());
        let text = match value {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Datetime(d) => Some(d.to_string()),
            Value::Table(child) => {
                read_table(child, path, tree);
                None
            }
            Value::Array(_) => {
                warn!("ignoring array at {} in language file", path.join("."));
                None
            }
        };
        if let Some(text) = text {
            tree.set_string(path.as_slice(), text);
        }
        path.pop();
    }
}

fn write_table(node: &TreeNode) -> Table {
    let mut table = Table::new();
    for (segment, child) in node.children() {
        if let Some(value) = child.get_string() {
            table.insert(segment.to_string(), Value::String(value.to_string()));
        } else if !child.is_virgin() {
            table.insert(segment.to_string(), Value::Table(write_table(child)));
        }
    }
    table
}
