//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::action::{Action, update};
use crate::core::drop::ReorderEvent;
use crate::core::state::App;
use crate::core::tree::{NavNode, Tree};
use crate::persistence::{NavigationStore, StoreError};

/// An in-memory store for tests that don't need real I/O.
#[derive(Default)]
pub struct MemoryStore {
    pub tree: Mutex<Tree>,
    pub events: Mutex<Vec<ReorderEvent>>,
}

#[async_trait]
impl NavigationStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_tree(&self) -> Result<Tree, StoreError> {
        Ok(self.tree.lock().unwrap().clone())
    }

    async fn save_tree(&self, tree: &Tree) -> Result<(), StoreError> {
        *self.tree.lock().unwrap() = tree.clone();
        Ok(())
    }

    async fn record_reorder(&self, event: &ReorderEvent) -> Result<(), StoreError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// `[A [A1, A2], B, C]`
pub fn sample_tree() -> Tree {
    Tree::new(vec![
        NavNode::branch(
            "a",
            "A",
            vec![NavNode::leaf("a1", "A1"), NavNode::leaf("a2", "A2")],
        ),
        NavNode::leaf("b", "B"),
        NavNode::leaf("c", "C"),
    ])
}

/// `[A [A1 [A1x, A1y, A1z], A2], B [B1, B2], C]`
pub fn deep_tree() -> Tree {
    Tree::new(vec![
        NavNode::branch(
            "a",
            "A",
            vec![
                NavNode::branch(
                    "a1",
                    "A1",
                    vec![
                        NavNode::leaf("a1x", "A1x"),
                        NavNode::leaf("a1y", "A1y"),
                        NavNode::leaf("a1z", "A1z"),
                    ],
                ),
                NavNode::leaf("a2", "A2"),
            ],
        ),
        NavNode::branch(
            "b",
            "B",
            vec![NavNode::leaf("b1", "B1"), NavNode::leaf("b2", "B2")],
        ),
        NavNode::leaf("c", "C"),
    ])
}

pub fn ids_of(nodes: &[NavNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Creates a test App backed by an empty MemoryStore.
pub fn test_app() -> App {
    App::new(Arc::new(MemoryStore::default()))
}

/// Creates a test App with `sample_tree()` already loaded.
pub fn loaded_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::TreeLoaded(Ok(sample_tree())));
    app
}
