//! # Drag Scope
//!
//! A node can only be dragged relative to nodes that share its scope key:
//! the same depth and the same parent. Root nodes sit at depth 0 with no
//! parent. Comparison is structural, so a real node id can never collide
//! with the root.

use serde::{Deserialize, Serialize};

use crate::core::tree::NodeId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    pub depth: usize,
    pub parent: Option<NodeId>,
}

impl ScopeKey {
    pub fn new(depth: usize, parent: Option<NodeId>) -> Self {
        Self { depth, parent }
    }

    /// Scope of the root sequence.
    pub fn root() -> Self {
        Self::new(0, None)
    }

    /// Scope of the children of `parent`, where `parent` lives in `self`.
    pub fn child_of(&self, parent: &NodeId) -> Self {
        Self::new(self.depth + 1, Some(parent.clone()))
    }

    /// True when an item in `other` may be dragged among items in `self`.
    pub fn accepts(&self, other: &ScopeKey) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_scopes_match() {
        assert!(ScopeKey::root().accepts(&ScopeKey::new(0, None)));
    }

    #[test]
    fn test_same_depth_different_parent_rejected() {
        let under_a = ScopeKey::new(1, Some("a".into()));
        let under_b = ScopeKey::new(1, Some("b".into()));
        assert!(!under_a.accepts(&under_b));
    }

    #[test]
    fn test_same_parent_different_depth_rejected() {
        let shallow = ScopeKey::new(1, Some("a".into()));
        let deep = ScopeKey::new(2, Some("a".into()));
        assert!(!shallow.accepts(&deep));
    }

    #[test]
    fn test_child_never_matches_grandparent_siblings() {
        let root = ScopeKey::root();
        let child = root.child_of(&"a".into());
        let grandchild = child.child_of(&"a1".into());
        assert!(!root.accepts(&grandchild));
        assert!(!child.accepts(&grandchild));
        assert_eq!(grandchild.depth, 2);
    }

    #[test]
    fn test_root_named_parent_does_not_collide_with_root() {
        // A node literally called "root" is still a distinct parent.
        let under_root_node = ScopeKey::new(0, Some("root".into()));
        assert!(!ScopeKey::root().accepts(&under_root_node));
        assert_eq!(ScopeKey::root().parent, None);
    }
}
