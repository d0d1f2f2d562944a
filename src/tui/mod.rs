//! # TUI Adapter
//!
//! The ratatui-specific layer. Renders the menu, translates keyboard and
//! mouse events into `core::Action` values and executes the `Effect`s that
//! `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Gestures
//!
//! - **Edit mode** is entered by holding the mouse on a row for the
//!   configured long-press time, or with the dedicated `e` key. A plain
//!   click only selects (and expands/collapses) a row.
//! - **Mouse drag** (edit mode): press on a row and move. Rows are one cell
//!   tall, so the pointer always sits on the middle of the hovered row and
//!   each row crossed moves the preview by one.
//! - **Keyboard move** (edit mode): `m` picks up the selected row, ↑/↓ move
//!   it within its sibling group, Enter drops, Esc puts it back.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::drag::DropTarget;
use crate::core::state::App;
use crate::core::tree::NodeId;
use crate::persistence::NavigationStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{RenameEvent, RenameInput, Row, TreeViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Rows are a single cell tall; the pointer is always at their midpoint.
const ROW_POINTER_FRACTION: f32 = 0.5;

/// A mouse button held down on a row.
#[derive(Debug, Clone)]
struct Press {
    at: Instant,
    id: NodeId,
    dragged: bool,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub tree_view: TreeViewState,
    pub rename: Option<RenameInput>,
    long_press: Duration,
    press: Option<Press>,
}

impl TuiState {
    pub fn new(long_press: Duration) -> Self {
        Self {
            tree_view: TreeViewState::default(),
            rename: None,
            long_press,
            press: None,
        }
    }

    fn selected_row<'r>(&self, rows: &'r [Row]) -> Option<&'r Row> {
        rows.get(self.tree_view.selected)
    }

    /// Fires once when the held press crosses the long-press threshold.
    fn check_long_press(&mut self, app: &App, now: Instant) -> Option<Action> {
        let press = self.press.as_ref()?;
        if app.is_editing() || press.dragged || now.duration_since(press.at) < self.long_press {
            return None;
        }
        debug!("Long press on {} enters edit mode", press.id);
        self.press = None;
        Some(Action::EnterEditMode)
    }

    /// Keep presentation state consistent with the core after an update.
    fn sync(&mut self, app: &App) {
        if !app.is_editing() {
            self.rename = None;
        }
        self.tree_view.retain_known(&app.tree);
        let rows = ui::display_rows(app, self);
        if let Some(session) = &app.drag {
            self.tree_view.select_id(&rows, &session.dragged_id);
        }
        self.tree_view.select(self.tree_view.selected, rows.len());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal mouse capture enabled");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig, store: Arc<dyn NavigationStore>) -> std::io::Result<()> {
    let mut app = App::new(store);
    let mut tui = TuiState::new(config.long_press);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let effect = update(&mut app, Action::Reload);
    run_effect(&app, effect, &tx);

    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Poll faster while a press might turn into a long press
        let timeout = if tui.press.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in handle_event(&app, &mut tui, event) {
                debug!("Dispatching {:?}", action);
                let effect = update(&mut app, action);
                if effect == Effect::Quit {
                    should_quit = true;
                }
                run_effect(&app, effect, &tx);
            }
            tui.sync(&app);
        }

        if let Some(action) = tui.check_long_press(&app, Instant::now()) {
            needs_redraw = true;
            let effect = update(&mut app, action);
            run_effect(&app, effect, &tx);
        }

        if should_quit {
            break;
        }

        // Completions from background store calls
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            run_effect(&app, effect, &tx);
            tui.sync(&app);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate one terminal event into core actions, updating TUI-local state.
fn handle_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return vec![Action::Quit];
    }
    if matches!(event, TuiEvent::Resize) {
        return Vec::new();
    }

    let rows = ui::display_rows(app, tui);

    // Mouse gestures work in every mode
    match event {
        TuiEvent::MouseDown(_, y) => return mouse_down(tui, &rows, y),
        TuiEvent::MouseDrag(_, y) => return mouse_drag(app, tui, &rows, y),
        TuiEvent::MouseUp(_, y) => return mouse_up(app, tui, &rows, y),
        _ => {}
    }

    // Inline rename captures the keyboard
    if let Some(input) = tui.rename.as_mut() {
        return match input.handle_event(&event) {
            Some(RenameEvent::Changed(title)) => vec![Action::Rename {
                id: input.id.clone(),
                title,
            }],
            Some(RenameEvent::Done) => {
                tui.rename = None;
                Vec::new()
            }
            None => Vec::new(),
        };
    }

    // Keyboard move captures arrows, Enter and Esc
    if let Some(session) = &app.drag {
        let group_len = app.tree.siblings(&session.scope).map_or(0, <[_]>::len);
        let hover = |index: usize, fraction: f32| Action::HoverDrag {
            target: DropTarget {
                index,
                scope: session.scope.clone(),
            },
            fraction,
        };
        return match event {
            TuiEvent::CursorUp if session.live_index > 0 => {
                vec![hover(session.live_index - 1, 0.0)]
            }
            TuiEvent::CursorDown if session.live_index + 1 < group_len => {
                vec![hover(session.live_index + 1, 1.0)]
            }
            TuiEvent::Submit => vec![Action::Drop(Some(DropTarget {
                index: session.live_index,
                scope: session.scope.clone(),
            }))],
            TuiEvent::Escape => vec![Action::CancelDrag],
            _ => Vec::new(),
        };
    }

    // Navigation shared by both modes
    match event {
        TuiEvent::CursorUp => {
            tui.tree_view.select_prev();
            return Vec::new();
        }
        TuiEvent::CursorDown => {
            tui.tree_view.select_next(rows.len());
            return Vec::new();
        }
        TuiEvent::CursorRight | TuiEvent::CursorLeft | TuiEvent::Submit => {
            if let Some(row) = tui.selected_row(&rows).cloned() {
                let wants_open = match event {
                    TuiEvent::CursorRight => true,
                    TuiEvent::CursorLeft => false,
                    _ => !row.expanded,
                };
                if row.has_children && wants_open != row.expanded {
                    tui.tree_view.toggle_expanded(&row.id);
                }
            }
            return Vec::new();
        }
        _ => {}
    }

    let selected_id = tui.selected_row(&rows).map(|r| r.id.clone());

    if app.is_editing() {
        match event {
            TuiEvent::InputChar('m') => selected_id.map(Action::BeginDrag).into_iter().collect(),
            TuiEvent::InputChar('v') => selected_id.map(Action::ToggleVisibility).into_iter().collect(),
            TuiEvent::InputChar('r') => {
                if app.save_pending {
                    debug!("Rename refused while save is pending");
                } else if let Some(row) = tui.selected_row(&rows) {
                    tui.rename = Some(RenameInput::new(row.id.clone(), &row.title));
                }
                Vec::new()
            }
            TuiEvent::InputChar('s') => vec![Action::Save],
            TuiEvent::InputChar('c') | TuiEvent::Escape => vec![Action::Cancel],
            TuiEvent::InputChar('q') => vec![Action::Quit],
            _ => Vec::new(),
        }
    } else {
        match event {
            TuiEvent::InputChar('e') => vec![Action::EnterEditMode],
            TuiEvent::InputChar('R') => vec![Action::Reload],
            TuiEvent::InputChar('q') | TuiEvent::Escape => vec![Action::Quit],
            _ => Vec::new(),
        }
    }
}

fn mouse_down(tui: &mut TuiState, rows: &[Row], y: u16) -> Vec<Action> {
    let Some(index) = tui.tree_view.hit_test(y, rows.len()) else {
        return Vec::new();
    };
    tui.tree_view.select(index, rows.len());
    tui.press = Some(Press {
        at: Instant::now(),
        id: rows[index].id.clone(),
        dragged: false,
    });
    Vec::new()
}

fn mouse_drag(app: &App, tui: &mut TuiState, rows: &[Row], y: u16) -> Vec<Action> {
    let Some(press) = tui.press.as_mut() else {
        return Vec::new();
    };
    let mut actions = Vec::new();
    if !press.dragged {
        press.dragged = true;
        if app.is_editing() && tui.rename.is_none() {
            actions.push(Action::BeginDrag(press.id.clone()));
        }
    }
    if let Some(index) = tui.tree_view.hit_test(y, rows.len()) {
        actions.push(Action::HoverDrag {
            target: drop_target_for(app, &rows[index]),
            fraction: ROW_POINTER_FRACTION,
        });
    }
    actions
}

fn mouse_up(app: &App, tui: &mut TuiState, rows: &[Row], y: u16) -> Vec<Action> {
    let press = tui.press.take();
    let hit = tui.tree_view.hit_test(y, rows.len());

    if app.drag.is_some() {
        let target = hit.map(|index| drop_target_for(app, &rows[index]));
        return vec![Action::Drop(target)];
    }

    // Short click on the pressed row toggles its subtree
    if let (Some(press), Some(index)) = (press, hit)
        && !press.dragged
        && rows[index].id == press.id
        && rows[index].has_children
    {
        tui.tree_view.toggle_expanded(&press.id);
    }
    Vec::new()
}

/// The sibling slot a row stands for while dragging.
///
/// The dragged node and the rows of its own subtree all stand for the slot
/// it currently occupies in the preview.
fn drop_target_for(app: &App, row: &Row) -> DropTarget {
    if let Some(session) = &app.drag {
        let in_dragged_subtree = row.id == session.dragged_id
            || app
                .tree
                .find(&session.dragged_id)
                .is_some_and(|node| node.contains(&row.id));
        if in_dragged_subtree {
            return DropTarget {
                index: session.live_index,
                scope: session.scope.clone(),
            };
        }
    }
    DropTarget {
        index: row.index,
        scope: row.scope.clone(),
    }
}

/// Execute an effect returned by `update()`.
fn run_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::LoadTree => spawn_load(app.store.clone(), tx.clone()),
        Effect::SaveTree(tree) => {
            let store = app.store.clone();
            let tx = tx.clone();
            info!("Spawning save of {} items via {}", tree.len(), store.name());
            tokio::spawn(async move {
                let result = store.save_tree(&tree).await;
                if tx.send(Action::SaveFinished(result)).is_err() {
                    warn!("Failed to deliver save result: receiver dropped");
                }
            });
        }
        Effect::RecordReorder(event) => {
            let store = app.store.clone();
            tokio::spawn(async move {
                if let Err(e) = store.record_reorder(&event).await {
                    warn!("Reorder telemetry failed for {}: {}", event.id, e);
                }
            });
        }
    }
}

fn spawn_load(store: Arc<dyn NavigationStore>, tx: mpsc::Sender<Action>) {
    info!("Spawning menu load via {}", store.name());
    tokio::spawn(async move {
        let result = store.load_tree().await;
        if tx.send(Action::TreeLoaded(result)).is_err() {
            warn!("Failed to deliver loaded menu: receiver dropped");
        }
    });
}
