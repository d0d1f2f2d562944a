//! # Rename Input
//!
//! Inline title editor for the selected row. Every keystroke emits the full
//! new title so the working tree tracks the text as it is typed. Enter or
//! Esc closes the editor; the last emitted title stays applied.

use crate::core::tree::NodeId;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    Changed(String),
    Done,
}

#[derive(Debug, Clone)]
pub struct RenameInput {
    pub id: NodeId,
    pub buffer: String,
}

impl RenameInput {
    pub fn new(id: NodeId, current_title: &str) -> Self {
        Self {
            id,
            buffer: current_title.to_string(),
        }
    }
}

impl EventHandler for RenameInput {
    type Event = RenameEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RenameEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(RenameEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
                Some(RenameEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Submit | TuiEvent::Escape => Some(RenameEvent::Done),
            _ => None,
        }
    }
}
