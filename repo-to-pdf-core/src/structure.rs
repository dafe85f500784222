//! Shallow structural map of the top-level listing, used for the summary block.
//!
//! Only the entries handed to [`build`] are represented: directories appear with
//! empty children and files are grouped under their parent, the root being `.`.
//! The deep hierarchy is rendered by the traversal's marker lines instead.

use crate::contract::RemoteEntry;

/// Key under which top-level files are grouped.
pub const ROOT_MARKER: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureNode {
    Directory { children: Vec<(String, StructureNode)> },
    File,
}

impl StructureNode {
    pub fn empty_directory() -> Self {
        StructureNode::Directory {
            children: Vec::new(),
        }
    }

    /// Children in insertion order; empty for files.
    pub fn children(&self) -> &[(String, StructureNode)] {
        match self {
            StructureNode::Directory { children } => children,
            StructureNode::File => &[],
        }
    }

    pub fn child(&self, key: &str) -> Option<&StructureNode> {
        self.children()
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut StructureNode> {
        match self {
            StructureNode::Directory { children } => children
                .iter_mut()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            StructureNode::File => None,
        }
    }

    /// Inserts or replaces `key`, keeping the position of an existing key.
    fn insert(&mut self, key: String, node: StructureNode) {
        if let Some(existing) = self.child_mut(&key) {
            *existing = node;
            return;
        }
        if let StructureNode::Directory { children } = self {
            children.push((key, node));
        }
    }
}

/// Build the structural map from one listing. `base_path` is prefixed to entry names
/// (empty for the repository root).
pub fn build(entries: &[RemoteEntry], base_path: &str) -> StructureNode {
    let mut root = StructureNode::empty_directory();
    for entry in entries {
        let full_path = if base_path.is_empty() {
            entry.name.clone()
        } else {
            format!("{base_path}/{}", entry.name)
        };

        if entry.is_directory() {
            root.insert(full_path, StructureNode::empty_directory());
            continue;
        }

        let parent_key = if base_path.is_empty() {
            ROOT_MARKER
        } else {
            base_path
        };
        if root.child(parent_key).is_none() {
            root.insert(parent_key.to_string(), StructureNode::empty_directory());
        }
        if let Some(parent) = root.child_mut(parent_key) {
            parent.insert(entry.name.clone(), StructureNode::File);
        }
    }
    root
}

/// Human-readable rendering: one line per node, two spaces per nesting level.
pub fn format(node: &StructureNode) -> String {
    let mut out = String::new();
    format_into(node, "", &mut out);
    out
}

fn format_into(node: &StructureNode, indent: &str, out: &mut String) {
    for (key, child) in node.children() {
        match child {
            StructureNode::Directory { .. } => {
                out.push_str(&format!("{indent}[dir] {key}/\n"));
                format_into(child, &format!("{indent}  "), out);
            }
            StructureNode::File => out.push_str(&format!("{indent}[file] {key}\n")),
        }
    }
}
