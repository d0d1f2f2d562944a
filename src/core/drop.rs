//! # Drop Resolver
//!
//! Turns a finished drag into a new tree. Every way a drop can be stale or
//! malformed (parent gone, wrong depth, index out of range, a different node
//! sitting at the origin) resolves to the input tree unchanged.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::drag::DropCandidate;
use crate::core::scope::ScopeKey;
use crate::core::tree::{NodeId, Tree};

/// Telemetry payload describing one committed reorder.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEvent {
    pub id: NodeId,
    pub from: usize,
    pub to: usize,
    pub level: usize,
    pub parent_id: Option<NodeId>,
}

impl From<&DropCandidate> for ReorderEvent {
    fn from(candidate: &DropCandidate) -> Self {
        Self {
            id: candidate.dragged_id.clone(),
            from: candidate.origin_index,
            to: candidate.target_index,
            level: candidate.scope.depth,
            parent_id: candidate.scope.parent.clone(),
        }
    }
}

/// Move `dragged_id` from `origin_index` to `target_index` inside the
/// sibling group named by `scope`.
pub fn resolve(
    tree: &Tree,
    dragged_id: &NodeId,
    origin_index: usize,
    target_index: usize,
    scope: &ScopeKey,
) -> Tree {
    let Some(group) = tree.siblings(scope) else {
        debug!("Drop into missing group {:?}, ignoring", scope);
        return tree.clone();
    };
    match group.get(origin_index) {
        Some(node) if &node.id == dragged_id => {}
        _ => {
            debug!(
                "Stale drop: {} is not at index {} of {:?}",
                dragged_id, origin_index, scope
            );
            return tree.clone();
        }
    }
    if origin_index == target_index {
        return tree.clone();
    }

    match tree.with_group_reordered(scope.parent.as_ref(), origin_index, target_index) {
        Some(next) => next,
        None => {
            debug!(
                "Drop index {} out of range for {:?}, ignoring",
                target_index, scope
            );
            tree.clone()
        }
    }
}

/// Resolve a candidate produced by [`DragSession::on_drop`](crate::core::drag::DragSession::on_drop).
pub fn resolve_candidate(tree: &Tree, candidate: &DropCandidate) -> Tree {
    resolve(
        tree,
        &candidate.dragged_id,
        candidate.origin_index,
        candidate.target_index,
        &candidate.scope,
    )
}
