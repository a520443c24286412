//! # Entry Component
//!
//! Single-line input for adding a tag by name. Shows the inline completion
//! candidate as ghost text after the cursor; the parent resolves the
//! candidate against the live tag table and accepts it on Tab.
//!
//! The buffer is internal state; the completion is a per-frame prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// High-level events emitted by the Entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    Changed,
}

pub struct Entry {
    /// Text buffer
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn cursor_at_end(&self) -> bool {
        self.cursor == self.buffer.len()
    }

    /// Replace the buffer with an accepted completion.
    pub fn accept(&mut self, full: &str) {
        self.buffer = full.to_string();
        self.cursor = self.buffer.len();
    }

    fn prev_boundary(&self) -> usize {
        let mut i = self.cursor;
        while i > 0 && !self.buffer.is_char_boundary(i - 1) {
            i -= 1;
        }
        i.saturating_sub(1)
    }

    fn next_boundary(&self) -> usize {
        let mut i = self.cursor + 1;
        while i < self.buffer.len() && !self.buffer.is_char_boundary(i) {
            i += 1;
        }
        i.min(self.buffer.len())
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for Entry {
    type Event = EntryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(EntryEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Pasted newlines and other control characters have no
                // meaning in a tag name.
                let clean: String = text.chars().filter(|c| !c.is_control()).collect();
                self.buffer.insert_str(self.cursor, &clean);
                self.cursor += clean.len();
                Some(EntryEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(EntryEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_boundary();
                    self.buffer.drain(self.cursor..next);
                    Some(EntryEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_boundary();
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_boundary();
                }
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(EntryEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper: buffer plus the frame's completion candidate.
pub struct EntryView<'a> {
    entry: &'a Entry,
    completion: Option<&'a str>,
    focused: bool,
}

impl<'a> EntryView<'a> {
    pub fn new(entry: &'a Entry, completion: Option<&'a str>, focused: bool) -> Self {
        Self {
            entry,
            completion,
            focused,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![Span::styled(self.entry.buffer.as_str(), style)];
        // Ghost text: the part of the candidate the user hasn't typed yet.
        if self.focused
            && let Some(ghost) = self
                .completion
                .and_then(|full| full.get(self.entry.buffer.len()..))
            && !ghost.is_empty()
        {
            spans.push(Span::styled(
                ghost,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(" Add tag ");

        let input = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(input, area);

        if self.focused {
            let typed_width = self.entry.buffer[..self.entry.cursor].width() as u16;
            frame.set_cursor_position((area.x + 1 + typed_width, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(entry: &mut Entry, text: &str) {
        for c in text.chars() {
            entry.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn typing_and_submit() {
        let mut entry = Entry::new();
        typed(&mut entry, "jazz");
        assert_eq!(entry.buffer, "jazz");
        assert_eq!(
            entry.handle_event(&TuiEvent::Submit),
            Some(EntryEvent::Submit("jazz".to_string()))
        );
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut entry = Entry::new();
        typed(&mut entry, "caf\u{e9}s");
        entry.handle_event(&TuiEvent::Backspace); // drop 's'
        entry.handle_event(&TuiEvent::Backspace); // drop 'é' (2 bytes)
        assert_eq!(entry.buffer, "caf");

        entry.handle_event(&TuiEvent::Home);
        entry.handle_event(&TuiEvent::Delete);
        assert_eq!(entry.buffer, "af");
    }

    #[test]
    fn cursor_movement_is_char_wise() {
        let mut entry = Entry::new();
        typed(&mut entry, "a\u{e9}b");
        assert!(entry.cursor_at_end());
        entry.handle_event(&TuiEvent::CursorLeft);
        entry.handle_event(&TuiEvent::CursorLeft);
        entry.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(entry.buffer, "ax\u{e9}b");
    }

    #[test]
    fn paste_strips_control_characters() {
        let mut entry = Entry::new();
        entry.handle_event(&TuiEvent::Paste("ja\nzz\t".to_string()));
        assert_eq!(entry.buffer, "jazz");
    }

    #[test]
    fn accept_replaces_buffer_and_moves_cursor_to_end() {
        let mut entry = Entry::new();
        typed(&mut entry, "ja");
        entry.accept("jazz");
        assert_eq!(entry.buffer, "jazz");
        assert!(entry.cursor_at_end());
    }

    #[test]
    fn clear_resets_everything() {
        let mut entry = Entry::new();
        typed(&mut entry, "rock");
        entry.clear();
        assert_eq!(entry.buffer, "");
        assert!(entry.cursor_at_end());
    }
}
