//! # Actions
//!
//! Everything that can happen in tmtag becomes an `Action`. Toggling a row's
//! checkbox is `Action::Toggle`, submitting the entry is `Action::Submit`,
//! a finished tmsu call is `Action::MutationDone`.
//!
//! `update()` takes the current state and an action and mutates the state.
//! It never performs I/O itself: when a tmsu call is needed it returns
//! `Effect::Run` and the event loop performs the call (synchronously, before
//! the next input event is read), then feeds the outcome back in as
//! `MutationDone`. One mutation can be pending at a time, so tagging
//! operations never overlap.
//!
//! ```text
//! State + Action  →  update()  →  mutated State + Effect
//! ```
//!
//! Keeping the reducer free of subprocess and terminal concerns is what makes
//! the whole controller testable without a display or a tmsu install.

use crate::core::state::App;

/// What a requested tmsu call should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// `tmsu tag <file> <name>`
    Apply,
    /// `tmsu untag <file> <name>[=<value>]`, `value` being the row's current one.
    Remove { value: String },
}

/// One requested tmsu call, with enough context to patch the table after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMutation {
    pub name: String,
    pub kind: MutationKind,
    /// True when the mutation came from the entry field, so the entry is
    /// cleared once the call succeeds.
    pub from_entry: bool,
}

/// Everything that can happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The checkbox of the named row was toggled.
    Toggle(String),
    /// The entry field was submitted with this text.
    Submit(String),
    /// The tmsu call for `mutation` finished.
    MutationDone { mutation: TagMutation, ok: bool },
    /// The modal dialog was dismissed.
    DismissDialog,
    /// Cycle the display ordering.
    CycleSort,
    Quit,
}

/// Side effects `update()` asks the event loop to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run this tmsu call (blocking) and feed back `MutationDone`.
    Run(TagMutation),
    /// Clear the entry field.
    ClearEntry,
    Quit,
}

/// Characters rejected in tag names before any tmsu call is made. Whitespace
/// and `=` would not survive the `tags -n` wire format; the rest are shell
/// metacharacters tmsu itself trips over.
const FORBIDDEN: &str = "=`$\"'\\|&;<>";

fn invalid_char(name: &str) -> Option<char> {
    name.chars()
        .find(|c| c.is_whitespace() || FORBIDDEN.contains(*c))
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::DismissDialog => {
            app.dialog = None;
            Effect::None
        }

        Action::CycleSort => {
            app.sort = app.sort.next();
            app.status_message = format!("Sorted by {}", app.sort.label());
            Effect::None
        }

        Action::Toggle(name) => {
            if app.dialog.is_some() || app.pending.is_some() {
                return Effect::None;
            }
            let Some(row) = app.table.get(&name) else {
                return Effect::None;
            };
            let kind = if row.tagged {
                MutationKind::Remove { value: row.value.clone() }
            } else {
                MutationKind::Apply
            };
            let mutation = TagMutation { name, kind, from_entry: false };
            app.pending = Some(mutation.clone());
            Effect::Run(mutation)
        }

        Action::Submit(text) => {
            if app.dialog.is_some() || app.pending.is_some() {
                return Effect::None;
            }
            let name = text.trim();
            if name.is_empty() {
                app.dialog = Some("Enter a tag name!".to_string());
                return Effect::None;
            }
            if let Some(bad) = invalid_char(name) {
                app.dialog = Some(if bad.is_whitespace() {
                    "Tag names may not contain whitespace.".to_string()
                } else {
                    format!("Tag names may not contain '{bad}'.")
                });
                return Effect::None;
            }
            // Already applied: nothing to do, just clear the entry.
            if app.table.is_tagged(name) {
                return Effect::ClearEntry;
            }
            let mutation = TagMutation {
                name: name.to_string(),
                kind: MutationKind::Apply,
                from_entry: true,
            };
            app.pending = Some(mutation.clone());
            Effect::Run(mutation)
        }

        Action::MutationDone { mutation, ok } => {
            app.pending = None;
            if !ok {
                app.dialog = Some(match mutation.kind {
                    MutationKind::Apply => "Failed to tag file.".to_string(),
                    MutationKind::Remove { .. } => "Failed to untag file.".to_string(),
                });
                return Effect::None;
            }
            match mutation.kind {
                MutationKind::Apply => {
                    app.table.mark_tagged(&mutation.name);
                    app.status_message = format!("Tagged '{}'", mutation.name);
                    if mutation.from_entry {
                        return Effect::ClearEntry;
                    }
                }
                MutationKind::Remove { .. } => {
                    app.table.mark_untagged(&mutation.name);
                    app.status_message = format!("Untagged '{}'", mutation.name);
                }
            }
            Effect::None
        }
    }
}
