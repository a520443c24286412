//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! tagging logic in `core` never touches a terminal.
//!
//! ## Dispatch
//!
//! The loop draws, polls with a timeout, drains pending events, and feeds
//! actions through `core::action::update`. When `update` asks for a tmsu
//! call (`Effect::Run`), the loop performs it right here, blocking, and
//! feeds the outcome back in as `MutationDone` before reading any further
//! input. Tagging operations are therefore serialized by construction and
//! the table always reflects the external store after each one.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::cursor::SetCursorStyle;
use crossterm::execute;
use log::info;

use crate::core::action::{Action, Effect, MutationKind, TagMutation, update};
use crate::core::state::App;
use crate::tmsu::TagStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{Entry, EntryEvent, TagListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate rows with arrow keys, toggle with Space/Enter. Typing
    /// auto-switches to Entry.
    List,
    /// Text editing in the entry field. Esc switches back to List.
    Entry,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub tag_list: TagListState,
    pub entry: Entry,
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            tag_list: TagListState::new(),
            entry: Entry::new(),
            input_mode: InputMode::List,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture is for wheel scrolling; a steady block cursor avoids
        // the blink-timer reset that continuous redraws cause.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(app: &mut App, store: &dyn TagStore) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        // Rows may have been added since last frame; keep selection valid.
        tui.tag_list.clamp(app.table.len());

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                break 'outer;
            }

            // An open dialog captures everything until dismissed
            if app.dialog.is_some() {
                if matches!(event, TuiEvent::Submit | TuiEvent::Escape) {
                    dispatch(app, &mut tui, store, Action::DismissDialog);
                }
                continue;
            }

            // Wheel scroll moves the list selection in either mode
            match event {
                TuiEvent::ScrollUp => {
                    tui.tag_list.select_prev();
                    continue;
                }
                TuiEvent::ScrollDown => {
                    tui.tag_list.select_next(app.table.len());
                    continue;
                }
                _ => {}
            }

            // Modal event dispatch
            match tui.input_mode {
                InputMode::List => match event {
                    TuiEvent::InputChar('q') => {
                        if dispatch(app, &mut tui, store, Action::Quit) {
                            break 'outer;
                        }
                    }
                    TuiEvent::InputChar('s') => {
                        dispatch(app, &mut tui, store, Action::CycleSort);
                    }
                    TuiEvent::InputChar(' ') | TuiEvent::Submit => {
                        if let Some(name) = selected_name(app, &tui) {
                            dispatch(app, &mut tui, store, Action::Toggle(name));
                        }
                    }
                    TuiEvent::CursorUp => tui.tag_list.select_prev(),
                    TuiEvent::CursorDown => tui.tag_list.select_next(app.table.len()),
                    TuiEvent::PageUp => tui.tag_list.page_up(),
                    TuiEvent::PageDown => tui.tag_list.page_down(app.table.len()),
                    TuiEvent::Tab => tui.input_mode = InputMode::Entry,
                    // Typing auto-switches to Entry mode and forwards the event
                    TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                        tui.input_mode = InputMode::Entry;
                        tui.entry.handle_event(&event);
                    }
                    _ => {}
                },
                InputMode::Entry => match event {
                    TuiEvent::Escape => tui.input_mode = InputMode::List,
                    // Up/Down hand focus back to the list
                    TuiEvent::CursorUp | TuiEvent::CursorDown => {
                        tui.input_mode = InputMode::List;
                    }
                    TuiEvent::Tab => accept_completion(app, &mut tui),
                    // Right at the end of the buffer also accepts, like the
                    // inline completion in a GTK entry
                    TuiEvent::CursorRight if tui.entry.cursor_at_end() => {
                        accept_completion(app, &mut tui);
                    }
                    other => {
                        if let Some(EntryEvent::Submit(text)) = tui.entry.handle_event(&other) {
                            dispatch(app, &mut tui, store, Action::Submit(text));
                        }
                    }
                },
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Feed an action through the reducer and execute whatever it asks for.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, store: &dyn TagStore, action: Action) -> bool {
    let mut effect = update(app, action);
    loop {
        match effect {
            Effect::None => return false,
            Effect::Quit => return true,
            Effect::ClearEntry => {
                tui.entry.clear();
                return false;
            }
            Effect::Run(mutation) => {
                let ok = run_mutation(store, app, &mutation);
                effect = update(app, Action::MutationDone { mutation, ok });
            }
        }
    }
}

/// The one blocking subprocess call. The UI stalls until tmsu returns, which
/// is the intended transaction model: one event, one call, one table patch.
fn run_mutation(store: &dyn TagStore, app: &App, mutation: &TagMutation) -> bool {
    match &mutation.kind {
        MutationKind::Apply => store.apply(&app.file, &mutation.name),
        MutationKind::Remove { value } => {
            let value = (!value.is_empty()).then_some(value.as_str());
            store.remove(&app.file, &mutation.name, value)
        }
    }
}

/// Replace the entry buffer with the inline completion candidate, if any.
fn accept_completion(app: &App, tui: &mut TuiState) {
    if let Some(full) = app.table.complete(&tui.entry.buffer).map(str::to_string) {
        tui.entry.accept(&full);
    }
}

/// Name of the row the list cursor is on, in the current display order.
fn selected_name(app: &App, tui: &TuiState) -> Option<String> {
    app.table
        .display_rows(app.sort)
        .get(tui.tag_list.selected)
        .map(|(name, _)| name.to_string())
}
