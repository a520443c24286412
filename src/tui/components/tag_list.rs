//! # TagList Component
//!
//! The checkbox list mirroring the tag table: one row per known tag,
//! `[x]`/`[ ]` for applied/candidate, with the value shown after the name
//! when the tag carries one.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TagListState` lives in `TuiState` (selection + scroll)
//! - `TagList` is created each frame with the current display rows

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::table::TagRow;

/// Rows jumped by PageUp/PageDown.
const PAGE_STEP: usize = 10;

/// Persistent selection and scroll state for the tag list.
pub struct TagListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl TagListState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_STEP);
        self.list_state.select(Some(self.selected));
    }

    pub fn page_down(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + PAGE_STEP).min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Keep the selection valid after rows are added (or on the empty table).
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

impl Default for TagListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for the tag list.
pub struct TagList<'a> {
    state: &'a mut TagListState,
    rows: &'a [(&'a str, &'a TagRow)],
    focused: bool,
}

impl<'a> TagList<'a> {
    pub fn new(
        state: &'a mut TagListState,
        rows: &'a [(&'a str, &'a TagRow)],
        focused: bool,
    ) -> Self {
        Self {
            state,
            rows,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.focused {
            " Space Toggle  s Sort  q Quit "
        } else {
            " Enter Add  Tab Complete  Esc List "
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Tags ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.rows.is_empty() {
            let empty = Paragraph::new("No tags yet. Type a name and press Enter.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (name, row))| {
                let is_selected = self.focused && i == self.state.selected;

                let style = if is_selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if row.tagged {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let checkbox = if row.tagged { "[x] " } else { "[ ] " };
                let mut spans = vec![Span::styled(checkbox, style), Span::styled(*name, style)];

                if row.tagged && !row.value.is_empty() {
                    let value_style = if is_selected {
                        style
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    spans.push(Span::styled(format!("={}", row.value), value_style));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn row(tagged: bool, value: &str) -> TagRow {
        TagRow {
            tagged,
            value: value.to_string(),
        }
    }

    fn rendered(rows: &[(&str, &TagRow)], state: &mut TagListState) -> String {
        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                TagList::new(state, rows, true).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_checkboxes_and_values() {
        let jazz = row(true, "cool");
        let rock = row(false, "");
        let rows = vec![("jazz", &jazz), ("rock", &rock)];
        let mut state = TagListState::new();

        let text = rendered(&rows, &mut state);
        assert!(text.contains("[x] jazz=cool"));
        assert!(text.contains("[ ] rock"));
    }

    #[test]
    fn renders_empty_hint() {
        let mut state = TagListState::new();
        state.clamp(0);
        let text = rendered(&[], &mut state);
        assert!(text.contains("No tags yet"));
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut state = TagListState::new();
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected, 2);
        state.select_next(3);
        assert_eq!(state.selected, 2); // at the end

        state.select_prev();
        assert_eq!(state.selected, 1);

        state.clamp(1);
        assert_eq!(state.selected, 0);
        state.clamp(0);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn paging_jumps_and_saturates() {
        let mut state = TagListState::new();
        state.page_down(25);
        assert_eq!(state.selected, 10);
        state.page_down(12);
        assert_eq!(state.selected, 11);
        state.page_up();
        assert_eq!(state.selected, 1);
        state.page_up();
        assert_eq!(state.selected, 0);
    }
}
