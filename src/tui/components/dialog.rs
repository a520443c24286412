//! # Dialog Component
//!
//! Centered modal overlay for error and validation messages, the terminal
//! stand-in for a message box. While a dialog is up the event loop routes
//! every key to it; Enter or Esc dismisses.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

/// Transient render wrapper; the message lives in `App::dialog`.
pub struct Dialog<'a> {
    message: &'a str,
}

impl<'a> Dialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Size the box to the wrapped message, within sane bounds.
        let max_text_width = (area.width.saturating_sub(8) as usize).clamp(10, 46);
        let lines = textwrap::wrap(self.message, max_text_width);
        let text_width = lines
            .iter()
            .map(|l| l.len())
            .max()
            .unwrap_or(0)
            .max(" Enter Close ".len());
        let width = (text_width as u16 + 4).min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);

        let overlay = centered_rect(width, height, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Close ").centered())
            .padding(Padding::horizontal(1));

        let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_ref())).collect();
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect of the given fixed size within the outer rect.
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_message_and_close_hint() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                Dialog::new("Failed to tag file.").render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Failed to tag file."));
        assert!(text.contains("Enter Close"));
    }

    #[test]
    fn long_messages_wrap_inside_the_box() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let msg = "Tag names may not contain whitespace, and this one had quite a lot of it.";
        terminal
            .draw(|f| {
                Dialog::new(msg).render(f, f.area());
            })
            .unwrap();
        // Nothing asserts exact layout; the draw not panicking on a small
        // area is the point.
    }

    #[test]
    fn centered_rect_stays_within_outer() {
        let outer = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(50, 20, outer);
        assert!(rect.width <= outer.width);
        assert!(rect.height <= outer.height);
    }
}
