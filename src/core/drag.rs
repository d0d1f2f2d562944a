//! # Drag Session
//!
//! Ephemeral state for one drag gesture. Hovering only moves the live
//! (preview) index; nothing touches the tree until the drop is resolved.
//!
//! ```text
//! begin(id) ──► hover(index, scope, fraction)* ──► drop(target?) ──► DropCandidate
//!                                              └─► cancel()      ──► (nothing)
//! ```

use log::debug;

use crate::core::scope::ScopeKey;
use crate::core::tree::{NodeId, Tree};

/// Pointer must cross the middle of the hovered row before the preview moves.
const HOVER_MIDPOINT: f32 = 0.5;

/// A sibling the pointer was released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub index: usize,
    pub scope: ScopeKey,
}

/// The move a completed drag asks the drop resolver to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropCandidate {
    pub dragged_id: NodeId,
    pub origin_index: usize,
    pub target_index: usize,
    pub scope: ScopeKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub dragged_id: NodeId,
    pub origin_index: usize,
    pub live_index: usize,
    pub scope: ScopeKey,
}

impl DragSession {
    /// Start dragging `id`. Returns `None` if the node is not in the tree.
    pub fn begin(tree: &Tree, id: &NodeId) -> Option<Self> {
        let location = tree.locate(id)?;
        Some(Self {
            dragged_id: id.clone(),
            origin_index: location.index,
            live_index: location.index,
            scope: location.scope,
        })
    }

    /// Pointer is over sibling `target_index`, `fraction` of the way down
    /// its row (0.0 = top edge, 1.0 = bottom edge).
    ///
    /// Returns true when the live index moved.
    pub fn on_hover_sibling(
        &mut self,
        target_index: usize,
        target_scope: &ScopeKey,
        fraction: f32,
    ) -> bool {
        if !self.scope.accepts(target_scope) {
            debug!(
                "Hover over foreign scope {:?} while dragging {}",
                target_scope, self.dragged_id
            );
            return false;
        }
        if target_index == self.live_index {
            return false;
        }

        // Moving down: wait for the lower half. Moving up: wait for the upper half.
        let moving_down = self.live_index < target_index;
        if moving_down && fraction < HOVER_MIDPOINT {
            return false;
        }
        if !moving_down && fraction > HOVER_MIDPOINT {
            return false;
        }

        self.live_index = target_index;
        true
    }

    /// The tree as it would look if the item were dropped at the live index.
    pub fn preview(&self, tree: &Tree) -> Tree {
        crate::core::drop::resolve(
            tree,
            &self.dragged_id,
            self.origin_index,
            self.live_index,
            &self.scope,
        )
    }

    /// End the gesture. `None` means it was released outside any droppable
    /// sibling; a target from another scope is treated the same way.
    pub fn on_drop(self, target: Option<DropTarget>) -> Option<DropCandidate> {
        let Some(target) = target else {
            debug!("Drag of {} released outside any target", self.dragged_id);
            return None;
        };
        if !self.scope.accepts(&target.scope) {
            debug!(
                "Drag of {} dropped on foreign scope {:?}",
                self.dragged_id, target.scope
            );
            return None;
        }
        Some(DropCandidate {
            dragged_id: self.dragged_id,
            origin_index: self.origin_index,
            target_index: target.index,
            scope: self.scope,
        })
    }

    /// Abort the gesture without applying anything.
    pub fn on_cancel(self) {
        debug!("Drag of {} cancelled", self.dragged_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids_of, sample_tree};

    fn root_drag(id: &str) -> DragSession {
        DragSession::begin(&sample_tree(), &id.into()).unwrap()
    }

    #[test]
    fn test_begin_records_origin_and_scope() {
        let session = DragSession::begin(&sample_tree(), &"a2".into()).unwrap();
        assert_eq!(session.origin_index, 1);
        assert_eq!(session.live_index, 1);
        assert_eq!(session.scope, ScopeKey::new(1, Some("a".into())));
        assert!(DragSession::begin(&sample_tree(), &"ghost".into()).is_none());
    }

    #[test]
    fn test_hover_down_waits_for_lower_half() {
        let mut session = root_drag("a");
        assert!(!session.on_hover_sibling(1, &ScopeKey::root(), 0.2));
        assert_eq!(session.live_index, 0);
        assert!(session.on_hover_sibling(1, &ScopeKey::root(), 0.7));
        assert_eq!(session.live_index, 1);
    }

    #[test]
    fn test_hover_up_waits_for_upper_half() {
        let mut session = root_drag("c");
        assert!(!session.on_hover_sibling(1, &ScopeKey::root(), 0.8));
        assert_eq!(session.live_index, 2);
        assert!(session.on_hover_sibling(1, &ScopeKey::root(), 0.3));
        assert_eq!(session.live_index, 1);
    }

    #[test]
    fn test_hover_exact_midpoint_commits_both_ways() {
        let mut session = root_drag("a");
        assert!(session.on_hover_sibling(2, &ScopeKey::root(), 0.5));
        assert!(session.on_hover_sibling(0, &ScopeKey::root(), 0.5));
        assert_eq!(session.live_index, session.origin_index);
    }

    #[test]
    fn test_hover_on_foreign_scope_is_ignored() {
        let mut session = root_drag("a");
        let nested = ScopeKey::new(1, Some("a".into()));
        assert!(!session.on_hover_sibling(1, &nested, 1.0));
        assert_eq!(session.live_index, 0);
    }

    #[test]
    fn test_hover_on_self_is_ignored() {
        let mut session = root_drag("b");
        assert!(!session.on_hover_sibling(1, &ScopeKey::root(), 0.0));
        assert_eq!(session.live_index, session.origin_index);
    }

    #[test]
    fn test_preview_does_not_touch_tree() {
        let tree = sample_tree();
        let mut session = DragSession::begin(&tree, &"a".into()).unwrap();
        session.on_hover_sibling(2, &ScopeKey::root(), 0.9);

        let preview = session.preview(&tree);
        assert_eq!(ids_of(&preview.roots), vec!["b", "c", "a"]);
        assert_eq!(tree, sample_tree());
    }

    #[test]
    fn test_drop_outside_yields_nothing() {
        assert!(root_drag("a").on_drop(None).is_none());
    }

    #[test]
    fn test_drop_on_foreign_scope_yields_nothing() {
        let target = DropTarget {
            index: 0,
            scope: ScopeKey::new(1, Some("a".into())),
        };
        assert!(root_drag("b").on_drop(Some(target)).is_none());
    }

    #[test]
    fn test_drop_yields_candidate() {
        let target = DropTarget {
            index: 0,
            scope: ScopeKey::root(),
        };
        let candidate = root_drag("b").on_drop(Some(target)).unwrap();
        assert_eq!(candidate.dragged_id, NodeId::from("b"));
        assert_eq!(candidate.origin_index, 1);
        assert_eq!(candidate.target_index, 0);
        assert_eq!(candidate.scope, ScopeKey::root());
    }
}
