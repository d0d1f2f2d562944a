//! # Application State
//!
//! Core business state for the menu editor. Presentation state (expanded
//! rows, selection, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: Arc<dyn NavigationStore>  // persistence collaborator
//! ├── tree: Tree                       // working copy, what gets rendered
//! ├── baseline: Tree                   // last loaded / saved tree
//! ├── mode: Mode                       // Viewing | Editing
//! ├── drag: Option<DragSession>        // open drag gesture, if any
//! ├── is_loading: bool                 // load in flight
//! ├── save_pending: bool               // save in flight
//! ├── status_message: String           // status bar text
//! └── error: Option<String>            // surfaced persistence failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::drag::DragSession;
use crate::core::tree::Tree;
use crate::persistence::NavigationStore;

/// Edit session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Read-only. Mutations are ignored.
    #[default]
    Viewing,
    /// Rename, visibility and reorder are permitted.
    Editing,
}

pub struct App {
    pub store: Arc<dyn NavigationStore>,
    pub tree: Tree,
    pub baseline: Tree,
    pub mode: Mode,
    pub drag: Option<DragSession>,
    pub is_loading: bool,
    pub save_pending: bool,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(store: Arc<dyn NavigationStore>) -> Self {
        Self {
            store,
            tree: Tree::default(),
            baseline: Tree::default(),
            mode: Mode::Viewing,
            drag: None,
            is_loading: false,
            save_pending: false,
            status_message: String::from("Loading menu..."),
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// True when the working copy differs from the baseline.
    pub fn has_unsaved_changes(&self) -> bool {
        self.tree != self.baseline
    }
}
