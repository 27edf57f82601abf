//! Language files as nested JSON objects.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::ensure_parent;
use pluginbase_core::{LanguageTree, PluginBaseError, TreeNode, TreeStore};

/// Reads and writes a language tree as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeStore for JsonFileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&mut self) -> Result<LanguageTree, PluginBaseError> {
        if !self.path.exists() {
            debug!("language file {} does not exist yet", self.path.display());
            return Ok(LanguageTree::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        let Value::Object(object) = value else {
            return Err(PluginBaseError::Store(format!(
                "{} does not hold a JSON object",
                self.path.display()
            )));
        };
        let mut tree = LanguageTree::new();
        read_object(&object, &mut Vec::new(), &mut tree);
        Ok(tree)
    }

    fn save(&mut self, tree: &LanguageTree) -> Result<(), PluginBaseError> {
        ensure_parent(&self.path)?;
        let body = serde_json::to_string_pretty(&Value::Object(write_object(tree.root())))?;
        std::fs::write(&self.path, body + "\n")?;
        debug!("wrote language file {}", self.path.display());
        Ok(())
    }
}

fn read_object(object: &Map<String, Value>, path: &mut Vec<String>, tree: &mut LanguageTree) {
    for (key, value) in object {
        path.push(key.clone());
        let text = match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Object(child) => {
                read_object(child, path, tree);
                None
            }
            Value::Null | Value::Array(_) => {
                warn!("ignoring non-text value at {} in language file", path.join("."));
                None
            }
        };
        if let Some(text) = text {
            tree.set_string(path.as_slice(), text);
        }
        path.pop();
    }
}

fn write_object(node: &TreeNode) -> Map<String, Value> {
    let mut object = Map::new();
    for (segment, child) in node.children() {
        if let Some(value) = child.get_string() {
            object.insert(segment.to_string(), Value::String(value.to_string()));
        } else if !child.is_virgin() {
            object.insert(segment.to_string(), Value::Object(write_object(child)));
        }
    }
    object
}
