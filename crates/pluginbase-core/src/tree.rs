//! In-memory model of a language file.
//!
//! A language file is an ordered tree of named nodes. Leaves carry string
//! values; branches only carry children. A node is *virgin* when it has
//! neither, which is how a missing entry looks after `get_or_create_node`.

/// One node of a [`LanguageTree`].
///
/// Invariant: a node holds a value or children, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    value: Option<String>,
    children: Vec<(String, TreeNode)>,
}

impl TreeNode {
    /// True when the node has never been given a value or children.
    pub fn is_virgin(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// The node's string value, if it is a leaf.
    pub fn get_string(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Make this node a leaf holding `value`, dropping any children.
    pub fn set_string(&mut self, value: impl Into<String>) {
        self.children.clear();
        self.value = Some(value.into());
    }

    /// Immediate children in document order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up an immediate child by segment.
    pub fn child(&self, segment: &str) -> Option<&TreeNode> {
        self.children
            .iter()
            .find(|(k, _)| k == segment)
            .map(|(_, v)| v)
    }

    fn child_or_insert(&mut self, segment: &str) -> &mut TreeNode {
        // Descending through a leaf turns it into a branch.
        self.value = None;
        let idx = match self.children.iter().position(|(k, _)| k == segment) {
            Some(idx) => idx,
            None => {
                self.children
                    .push((segment.to_string(), TreeNode::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[idx].1
    }

    fn collect_leaves(&self, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        if self.value.is_some() {
            out.push(prefix.clone());
            return;
        }
        for (segment, child) in &self.children {
            prefix.push(segment.clone());
            child.collect_leaves(prefix, out);
            prefix.pop();
        }
    }

    fn remove_path<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return false;
        };
        let Some(idx) = self
            .children
            .iter()
            .position(|(k, _)| k == first.as_ref())
        else {
            return false;
        };
        if rest.is_empty() {
            self.children.remove(idx);
            return true;
        }
        let removed = self.children[idx].1.remove_path(rest);
        if removed && self.children[idx].1.is_virgin() {
            self.children.remove(idx);
        }
        removed
    }
}

/// An ordered, hierarchical key/value tree loaded from a language file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTree {
    root: TreeNode,
}

impl LanguageTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Find the node at `path` without creating anything.
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode> {
        let mut node = &self.root;
        for segment in path {
            node = node.child(segment.as_ref())?;
        }
        Some(node)
    }

    /// Mutable access to the node at `path` without creating anything.
    pub fn node_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut TreeNode> {
        let mut node = &mut self.root;
        for segment in path {
            node = node
                .children
                .iter_mut()
                .find(|(k, _)| k == segment.as_ref())
                .map(|(_, v)| v)?;
        }
        Some(node)
    }

    /// Find the node at `path`, creating virgin nodes along the way.
    pub fn get_or_create_node<S: AsRef<str>>(&mut self, path: &[S]) -> &mut TreeNode {
        let mut node = &mut self.root;
        for segment in path {
            node = node.child_or_insert(segment.as_ref());
        }
        node
    }

    /// The string value at `path`, if that node is a leaf.
    pub fn get_string<S: AsRef<str>>(&self, path: &[S]) -> Option<&str> {
        self.node(path).and_then(TreeNode::get_string)
    }

    /// Set the string value at `path`, creating nodes as needed.
    pub fn set_string<S: AsRef<str>>(&mut self, path: &[S], value: impl Into<String>) {
        self.get_or_create_node(path).set_string(value);
    }

    /// Full path of every leaf, in document order.
    pub fn leaves(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    /// Remove the node at `path` and any branches that become empty.
    ///
    /// Returns whether a node was removed.
    pub fn remove<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        self.root.remove_path(path)
    }

    /// True when the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }
}
