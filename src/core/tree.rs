//! # Navigation Tree
//!
//! The menu model and its pure mutations.
//!
//! ```text
//! Tree
//! └── roots: Vec<NavNode>          // depth 0, parent = None
//!     └── NavNode
//!         ├── id: NodeId           // unique across the whole tree
//!         ├── title: String
//!         ├── visible: bool        // defaults to true when absent
//!         └── children: Vec<NavNode>
//! ```
//!
//! Every mutation borrows the current tree and returns a new one. The input
//! is never touched, so a snapshot handed to the renderer or to a pending
//! save stays valid. Unknown ids are absorbed as no-ops.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::scope::ScopeKey;

/// Stable identifier of a menu item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    pub id: NodeId,
    pub title: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// Create a visible node without children.
    pub fn leaf(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            title: title.into(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Create a visible node with the given children.
    pub fn branch(id: impl Into<String>, title: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self {
            children,
            ..Self::leaf(id, title)
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True when `id` names a node anywhere below this one.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.children
            .iter()
            .any(|child| &child.id == id || child.contains(id))
    }
}

/// Where a node sits: its sibling group and its index inside that group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    pub scope: ScopeKey,
    pub index: usize,
}

/// Load-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Two nodes share the same id.
    DuplicateId(NodeId),
    /// A node has an empty id.
    EmptyId,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DuplicateId(id) => write!(f, "duplicate node id: {id}"),
            TreeError::EmptyId => write!(f, "node with empty id"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Ordered forest of root nodes. Serializes as a plain JSON array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Tree {
    pub roots: Vec<NavNode>,
}

impl Tree {
    pub fn new(roots: Vec<NavNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        fn count(nodes: &[NavNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// All ids in depth-first order.
    pub fn ids(&self) -> Vec<NodeId> {
        fn collect(nodes: &[NavNode], out: &mut Vec<NodeId>) {
            for node in nodes {
                out.push(node.id.clone());
                collect(&node.children, out);
            }
        }
        let mut out = Vec::with_capacity(self.len());
        collect(&self.roots, &mut out);
        out
    }

    /// Reject trees that break the unique-id invariant.
    pub fn validate(&self) -> Result<(), TreeError> {
        fn walk<'a>(nodes: &'a [NavNode], seen: &mut HashSet<&'a NodeId>) -> Result<(), TreeError> {
            for node in nodes {
                if node.id.as_str().is_empty() {
                    return Err(TreeError::EmptyId);
                }
                if !seen.insert(&node.id) {
                    return Err(TreeError::DuplicateId(node.id.clone()));
                }
                walk(&node.children, seen)?;
            }
            Ok(())
        }
        walk(&self.roots, &mut HashSet::new())
    }

    /// Depth-first search for a node.
    pub fn find(&self, id: &NodeId) -> Option<&NavNode> {
        fn search<'a>(nodes: &'a [NavNode], id: &NodeId) -> Option<&'a NavNode> {
            nodes.iter().find_map(|node| {
                if &node.id == id {
                    Some(node)
                } else {
                    search(&node.children, id)
                }
            })
        }
        search(&self.roots, id)
    }

    /// Scope key and sibling index of the node with `id`.
    pub fn locate(&self, id: &NodeId) -> Option<NodeLocation> {
        fn search(nodes: &[NavNode], scope: &ScopeKey, id: &NodeId) -> Option<NodeLocation> {
            for (index, node) in nodes.iter().enumerate() {
                if &node.id == id {
                    return Some(NodeLocation {
                        scope: scope.clone(),
                        index,
                    });
                }
                let child_scope = scope.child_of(&node.id);
                if let Some(found) = search(&node.children, &child_scope, id) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.roots, &ScopeKey::root(), id)
    }

    /// The sibling group a scope key names, if it exists at that depth.
    pub fn siblings(&self, scope: &ScopeKey) -> Option<&[NavNode]> {
        match &scope.parent {
            None if scope.depth == 0 => Some(self.roots.as_slice()),
            None => None,
            Some(parent_id) => {
                let location = self.locate(parent_id)?;
                if location.scope.depth + 1 != scope.depth {
                    return None;
                }
                self.find(parent_id).map(|parent| parent.children.as_slice())
            }
        }
    }

    /// Return a copy with the node's title replaced.
    pub fn renamed(&self, id: &NodeId, title: &str) -> Tree {
        self.with_node_updated(id, |node| node.title = title.to_string())
    }

    /// Return a copy with the node's visibility flipped.
    pub fn with_visibility_toggled(&self, id: &NodeId) -> Tree {
        self.with_node_updated(id, |node| node.visible = !node.visible)
    }

    /// Return a copy where the sibling group under `parent` has one element
    /// moved from `from` to `to` (post-removal index).
    ///
    /// Returns `None` when the group is missing or an index is out of range.
    pub fn with_group_reordered(
        &self,
        parent: Option<&NodeId>,
        from: usize,
        to: usize,
    ) -> Option<Tree> {
        let mut next = self.clone();
        let group = match parent {
            None => &mut next.roots,
            Some(parent_id) => &mut find_mut(&mut next.roots, parent_id)?.children,
        };
        if !move_within(group, from, to) {
            return None;
        }
        Some(next)
    }

    fn with_node_updated(&self, id: &NodeId, apply: impl FnOnce(&mut NavNode)) -> Tree {
        let mut next = self.clone();
        match find_mut(&mut next.roots, id) {
            Some(node) => apply(node),
            None => debug!("Edit targets unknown node {id}, ignoring"),
        }
        next
    }
}

fn find_mut<'a>(nodes: &'a mut [NavNode], id: &NodeId) -> Option<&'a mut NavNode> {
    for node in nodes.iter_mut() {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Single-element move within a sequence. `to` is read against the sequence
/// after removal. Returns false (and leaves `items` alone) on bad indices.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
