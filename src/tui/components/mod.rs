//! # TUI Components
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── status_bar.rs    (Top status line: mode, status, errors)
//! ├── rename_input.rs  (Inline title editor)
//! └── tree_view.rs     (Flattened menu rows, expansion, hit testing)
//! ```
//!
//! Components receive external data as props and never reach into `App`
//! directly. `TreeViewState` and `RenameInput` are persistent state owned
//! by `TuiState`; `StatusBar` is rebuilt every frame.

pub mod rename_input;
pub mod status_bar;
pub mod tree_view;

pub use rename_input::{RenameEvent, RenameInput};
pub use status_bar::StatusBar;
pub use tree_view::{Row, TreeViewState, flatten};
