//! # Actions
//!
//! Everything that can happen to the menu becomes an `Action`.
//! User long-presses a row? That's `Action::EnterEditMode`.
//! The store answers a fetch? That's `Action::TreeLoaded(result)`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing any I/O the adapter must perform. No side
//! effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Edit session rules:
//!
//! ```text
//!            EnterEditMode
//!  Viewing ─────────────────► Editing ──┐ Rename / ToggleVisibility /
//!     ▲                         │  ▲    │ BeginDrag / HoverDrag / Drop
//!     │   SaveFinished(Ok)      │  └────┘
//!     ├─────────────────────────┤ Save (→ SaveTree, save_pending)
//!     │   Cancel (→ LoadTree)   │
//!     └─────────────────────────┘
//! ```
//!
//! While a save is pending the session is locked: edits and Cancel are
//! refused until `SaveFinished` arrives.

use log::{debug, info, warn};

use crate::core::drag::{DragSession, DropTarget};
use crate::core::drop::{ReorderEvent, resolve_candidate};
use crate::core::state::{App, Mode};
use crate::core::tree::{NodeId, Tree};
use crate::persistence::StoreError;

#[derive(Debug)]
pub enum Action {
    /// Start (or restart) fetching the tree from the store.
    Reload,
    /// A fetch finished.
    TreeLoaded(Result<Tree, StoreError>),
    /// Explicit edit-mode trigger (sustained press or dedicated key).
    EnterEditMode,
    Rename { id: NodeId, title: String },
    ToggleVisibility(NodeId),
    BeginDrag(NodeId),
    /// Pointer over a sibling, `fraction` of the way down its row.
    HoverDrag { target: DropTarget, fraction: f32 },
    /// Released over `target`, or outside any droppable sibling.
    Drop(Option<DropTarget>),
    CancelDrag,
    Save,
    SaveFinished(Result<(), StoreError>),
    Cancel,
    Quit,
}

/// I/O the adapter performs after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    LoadTree,
    SaveTree(Tree),
    /// Fire-and-forget telemetry; its outcome never comes back as an action.
    RecordReorder(ReorderEvent),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Reload => {
            if app.is_editing() {
                debug!("Reload ignored while editing");
                return Effect::None;
            }
            app.is_loading = true;
            app.status_message = String::from("Loading menu...");
            Effect::LoadTree
        }
        Action::TreeLoaded(result) => {
            app.is_loading = false;
            match result.and_then(|tree| {
                tree.validate().map_err(StoreError::Invalid)?;
                Ok(tree)
            }) {
                Ok(tree) => {
                    info!("Loaded menu with {} items", tree.len());
                    app.error = None;
                    if app.is_editing() {
                        // Keep in-session edits; only the cancel target moves.
                        debug!("Tree arrived mid-edit, updating baseline only");
                        app.baseline = tree;
                    } else {
                        app.baseline = tree.clone();
                        app.tree = tree;
                        app.status_message = String::from("Hold a row to edit the menu");
                    }
                }
                Err(e) => {
                    warn!("Failed to load menu: {}", e);
                    app.error = Some(format!("Could not load menu: {e}"));
                    app.status_message = String::from("Load failed");
                }
            }
            Effect::None
        }
        Action::EnterEditMode => {
            if app.mode == Mode::Viewing {
                info!("Entering edit mode");
                app.mode = Mode::Editing;
                app.status_message = String::from("Editing");
            }
            Effect::None
        }
        Action::Rename { id, title } => {
            if can_edit(app) {
                app.tree = app.tree.renamed(&id, &title);
            }
            Effect::None
        }
        Action::ToggleVisibility(id) => {
            if can_edit(app) {
                app.tree = app.tree.with_visibility_toggled(&id);
            }
            Effect::None
        }
        Action::BeginDrag(id) => {
            if !can_edit(app) {
                return Effect::None;
            }
            if let Some(previous) = app.drag.take() {
                previous.on_cancel();
            }
            app.drag = DragSession::begin(&app.tree, &id);
            match &app.drag {
                Some(session) => debug!(
                    "Drag started on {} at index {} of {:?}",
                    id, session.origin_index, session.scope
                ),
                None => debug!("Drag requested for unknown node {}", id),
            }
            Effect::None
        }
        Action::HoverDrag { target, fraction } => {
            if let Some(session) = app.drag.as_mut() {
                session.on_hover_sibling(target.index, &target.scope, fraction);
            }
            Effect::None
        }
        Action::Drop(target) => {
            let Some(session) = app.drag.take() else {
                return Effect::None;
            };
            if !can_edit(app) {
                session.on_cancel();
                return Effect::None;
            }
            let Some(candidate) = session.on_drop(target) else {
                return Effect::None;
            };
            let next = resolve_candidate(&app.tree, &candidate);
            if next == app.tree {
                return Effect::None;
            }
            info!(
                "Moved {} from {} to {} (depth {}, parent {:?})",
                candidate.dragged_id,
                candidate.origin_index,
                candidate.target_index,
                candidate.scope.depth,
                candidate.scope.parent
            );
            app.tree = next;
            Effect::RecordReorder(ReorderEvent::from(&candidate))
        }
        Action::CancelDrag => {
            if let Some(session) = app.drag.take() {
                session.on_cancel();
            }
            Effect::None
        }
        Action::Save => {
            if !app.is_editing() || app.save_pending {
                return Effect::None;
            }
            if let Some(session) = app.drag.take() {
                session.on_cancel();
            }
            app.save_pending = true;
            app.status_message = String::from("Saving...");
            Effect::SaveTree(app.tree.clone())
        }
        Action::SaveFinished(result) => {
            if !app.save_pending {
                debug!("Stray save completion ignored");
                return Effect::None;
            }
            app.save_pending = false;
            match result {
                Ok(()) => {
                    info!("Menu saved");
                    app.baseline = app.tree.clone();
                    app.mode = Mode::Viewing;
                    app.error = None;
                    app.status_message = String::from("Saved");
                }
                Err(e) => {
                    warn!("Failed to save menu: {}", e);
                    app.error = Some(format!("Could not save menu: {e}"));
                    app.status_message = String::from("Save failed, still editing");
                }
            }
            Effect::None
        }
        Action::Cancel => {
            if !app.is_editing() {
                return Effect::None;
            }
            if app.save_pending {
                app.status_message = String::from("Save in progress");
                return Effect::None;
            }
            if let Some(session) = app.drag.take() {
                session.on_cancel();
            }
            info!("Edit session cancelled, discarding changes");
            app.tree = app.baseline.clone();
            app.mode = Mode::Viewing;
            app.error = None;
            app.is_loading = true;
            app.status_message = String::from("Changes discarded");
            Effect::LoadTree
        }
        Action::Quit => {
            if app.has_unsaved_changes() {
                warn!("Quitting with unsaved menu changes");
            }
            Effect::Quit
        }
    }
}

/// Mutations need edit mode and an idle save.
fn can_edit(app: &App) -> bool {
    if !app.is_editing() {
        debug!("Edit ignored outside edit mode");
        return false;
    }
    if app.save_pending {
        debug!("Edit ignored while save is pending");
        return false;
    }
    true
}
