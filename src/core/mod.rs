//! # Core Application Logic
//!
//! The menu editing engine. It knows nothing about any specific UI
//! technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Tree (model, edits)  │
//!                    │  • Scope / Drag / Drop  │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌─────────────┐
//!     │    TUI     │                          │ Persistence │
//!     │  Adapter   │ ── executes effects ───► │ (http/file) │
//!     │ (ratatui)  │                          │             │
//!     └────────────┘                          └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: `NavNode`/`Tree` and the pure rename, toggle and reorder edits
//! - [`scope`]: `ScopeKey`, which items may be dragged among which
//! - [`drag`]: `DragSession`, hover feedback and drop candidates
//! - [`drop`]: turns a drop candidate into a new tree
//! - [`state`]: the `App` struct, including the edit session mode
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod drag;
pub mod drop;
pub mod scope;
pub mod state;
pub mod tree;
