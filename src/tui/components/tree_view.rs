//! # Tree View
//!
//! Renders the menu as a flat list of rows: each node, followed by its
//! children when it is expanded. Expansion is presentation state keyed by
//! node id, so it survives reorders and renames anywhere in the tree.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TreeViewState` lives in `TuiState`
//! - `TreeView` is created each frame with borrowed state

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::scope::ScopeKey;
use crate::core::tree::{NavNode, NodeId, Tree};
use crate::tui::component::Component;
use crate::tui::components::RenameInput;

/// One rendered line of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub title: String,
    pub visible: bool,
    pub depth: usize,
    /// Index inside the sibling group.
    pub index: usize,
    pub scope: ScopeKey,
    pub has_children: bool,
    pub expanded: bool,
}

/// Depth-first rows of `tree`, descending only into expanded nodes.
pub fn flatten(tree: &Tree, expanded: &HashSet<NodeId>) -> Vec<Row> {
    fn walk(nodes: &[NavNode], scope: &ScopeKey, expanded: &HashSet<NodeId>, out: &mut Vec<Row>) {
        for (index, node) in nodes.iter().enumerate() {
            let is_expanded = node.has_children() && expanded.contains(&node.id);
            out.push(Row {
                id: node.id.clone(),
                title: node.title.clone(),
                visible: node.visible,
                depth: scope.depth,
                index,
                scope: scope.clone(),
                has_children: node.has_children(),
                expanded: is_expanded,
            });
            if is_expanded {
                walk(&node.children, &scope.child_of(&node.id), expanded, out);
            }
        }
    }
    let mut rows = Vec::new();
    walk(&tree.roots, &ScopeKey::root(), expanded, &mut rows);
    rows
}

#[derive(Debug, Default)]
pub struct TreeViewState {
    pub expanded: HashSet<NodeId>,
    pub selected: usize,
    pub list_state: ListState,
    /// Area of the list on the last frame, for mouse hit testing.
    pub list_area: Rect,
}

impl TreeViewState {
    /// Flip expansion of `id`. Returns the new state.
    pub fn toggle_expanded(&mut self, id: &NodeId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Forget expansion of nodes that no longer exist in `tree`.
    pub fn retain_known(&mut self, tree: &Tree) {
        if self.expanded.is_empty() {
            return;
        }
        let known: HashSet<NodeId> = tree.ids().into_iter().collect();
        self.expanded.retain(|id| known.contains(id));
    }

    pub fn select(&mut self, index: usize, row_count: usize) {
        self.selected = index.min(row_count.saturating_sub(1));
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, row_count: usize) {
        self.select(self.selected + 1, row_count);
    }

    /// Select the row showing `id`, if it is on screen.
    pub fn select_id(&mut self, rows: &[Row], id: &NodeId) {
        if let Some(pos) = rows.iter().position(|r| &r.id == id) {
            self.selected = pos;
        }
    }

    /// Map a terminal row to a list row index.
    pub fn hit_test(&self, y: u16, row_count: usize) -> Option<usize> {
        // One-cell border around the list
        let top = self.list_area.y + 1;
        let bottom = (self.list_area.y + self.list_area.height).saturating_sub(1);
        if y < top || y >= bottom {
            return None;
        }
        let index = (y - top) as usize + self.list_state.offset();
        (index < row_count).then_some(index)
    }
}

/// Shorten `text` to `max` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub struct TreeView<'a> {
    pub rows: &'a [Row],
    pub state: &'a mut TreeViewState,
    pub editing: bool,
    pub dragged: Option<&'a NodeId>,
    pub rename: Option<&'a RenameInput>,
}

impl TreeView<'_> {
    fn row_line(&self, row: &Row, width: usize) -> Line<'static> {
        let mut prefix = "  ".repeat(row.depth);
        if self.editing {
            prefix.push_str("⠿ ");
        }
        prefix.push_str(match (row.has_children, row.expanded) {
            (true, true) => "▾ ",
            (true, false) => "▸ ",
            (false, _) => "  ",
        });

        let renaming = self.rename.filter(|r| r.id == row.id);
        let (title, title_style) = match renaming {
            Some(input) => (
                format!("{}▏", input.buffer),
                Style::new().add_modifier(Modifier::UNDERLINED),
            ),
            None if row.visible => (row.title.clone(), Style::new()),
            None => (
                format!("{} (hidden)", row.title),
                Style::new().fg(Color::DarkGray),
            ),
        };
        let room = width.saturating_sub(prefix.width());
        let mut line = Line::from(vec![
            Span::styled(prefix, Style::new().fg(Color::DarkGray)),
            Span::styled(truncate_to_width(&title, room), title_style),
        ]);
        if self.dragged == Some(&row.id) {
            line = line.style(Style::new().add_modifier(Modifier::REVERSED));
        }
        line
    }
}

impl Component for TreeView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_area = area;
        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| ListItem::new(self.row_line(row, width)))
            .collect();

        let title = if self.editing { "Menu (editing)" } else { "Menu" };
        let list = List::new(items)
            .block(Block::bordered().title(title))
            .highlight_style(Style::new().bg(Color::DarkGray));

        self.state.select(self.state.selected, self.rows.len());
        let selected = (!self.rows.is_empty()).then_some(self.state.selected);
        self.state.list_state.select(selected);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
