//! # StatusBar Component
//!
//! Top line showing the store backend, the edit mode and the latest status.
//!
//! 1. **Error**: `"Menu [http] EDITING * | Could not save menu: ..."`
//! 2. **Status**: `"Menu [http] EDITING * | Saving..."`
//! 3. **Default**: `"Menu [http]"`
//!
//! The `*` marks unsaved changes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Mode;
use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub backend: &'a str,
    pub mode: Mode,
    pub unsaved: bool,
    pub status_message: &'a str,
    pub error: Option<&'a str>,
}

impl StatusBar<'_> {
    pub fn text(&self) -> String {
        let mut text = format!("Menu [{}]", self.backend);
        if self.mode == Mode::Editing {
            text.push_str(" EDITING");
            if self.unsaved {
                text.push_str(" *");
            }
        }
        let detail = self.error.unwrap_or(self.status_message);
        if !detail.is_empty() {
            text.push_str(" | ");
            text.push_str(detail);
        }
        text
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = match (self.error, self.mode) {
            (Some(_), _) => Style::new().fg(Color::Red),
            (None, Mode::Editing) => Style::new().fg(Color::Yellow),
            (None, Mode::Viewing) => Style::new(),
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}
