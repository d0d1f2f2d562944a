use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::core::tree::Tree;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Row, StatusBar, flatten};
use crate::tui::components::tree_view::TreeView;

/// The tree to show: the live drag preview while dragging, else the working copy.
pub fn display_tree(app: &App) -> Cow<'_, Tree> {
    match &app.drag {
        Some(session) => Cow::Owned(session.preview(&app.tree)),
        None => Cow::Borrowed(&app.tree),
    }
}

/// Rows currently on screen, in display order.
pub fn display_rows(app: &App, tui: &TuiState) -> Vec<Row> {
    flatten(&display_tree(app), &tui.tree_view.expanded)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [status_area, main_area, help_area] = layout.areas(frame.area());

    StatusBar {
        backend: app.store.name(),
        mode: app.mode,
        unsaved: app.has_unsaved_changes(),
        status_message: &app.status_message,
        error: app.error.as_deref(),
    }
    .render(frame, status_area);

    let rows = display_rows(app, tui);
    TreeView {
        rows: &rows,
        state: &mut tui.tree_view,
        editing: app.is_editing(),
        dragged: app.drag.as_ref().map(|d| &d.dragged_id),
        rename: tui.rename.as_ref(),
    }
    .render(frame, main_area);

    let help = Span::styled(help_text(app, tui), Style::new().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

fn help_text(app: &App, tui: &TuiState) -> &'static str {
    if tui.rename.is_some() {
        "type to rename · Enter/Esc done"
    } else if app.drag.is_some() {
        "↑/↓ move · Enter drop · Esc cancel move"
    } else if app.is_editing() {
        "m move · r rename · v show/hide · s save · Esc cancel · drag rows with the mouse"
    } else {
        "↑/↓ select · ←/→ collapse/expand · e or hold a row to edit · R reload · q quit"
    }
}
