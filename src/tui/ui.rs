use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Dialog, EntryView, TagList, TitleBar};
use crate::tui::{InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let full_area = frame.area();
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, list_area, entry_area] = layout.areas(full_area);

    TitleBar::new(
        app.file_name(),
        app.table.tagged_count(),
        app.table.len(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    let rows = app.table.display_rows(app.sort);
    let list_focused = matches!(tui.input_mode, InputMode::List) && app.dialog.is_none();
    TagList::new(&mut tui.tag_list, &rows, list_focused).render(frame, list_area);

    let entry_focused = matches!(tui.input_mode, InputMode::Entry) && app.dialog.is_none();
    let completion = if entry_focused {
        app.table.complete(&tui.entry.buffer)
    } else {
        None
    };
    EntryView::new(&tui.entry, completion, entry_focused).render(frame, entry_area);

    if let Some(message) = &app.dialog {
        Dialog::new(message).render(frame, full_area);
    }
}
