//! # TitleBar Component
//!
//! Top status bar showing the file being edited, how many of the known tags
//! it carries, and the latest status message.
//!
//! Stateless: receives everything as props and renders a single line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    /// Name of the file whose tags are being edited.
    pub file_name: String,
    /// Applied tags / all known tags.
    pub tagged: usize,
    pub total: usize,
    /// Transient status (e.g. "Tagged 'jazz'").
    pub status_message: String,
}

impl TitleBar {
    pub fn new(file_name: String, tagged: usize, total: usize, status_message: String) -> Self {
        Self {
            file_name,
            tagged,
            total,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!(
                "tmtag: {} ({}/{} tagged)",
                self.file_name, self.tagged, self.total
            )
        } else {
            format!(
                "tmtag: {} ({}/{} tagged) | {}",
                self.file_name, self.tagged, self.total, self.status_message
            )
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
