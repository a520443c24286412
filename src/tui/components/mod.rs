//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, mirroring how the widgets are used:
//!
//! - **Stateless (props-based)**: `TitleBar` receives everything it renders
//!   as fields and holds nothing between frames.
//! - **Persistent state + transient wrapper**: `TagListState` lives in
//!   `TuiState` and survives across frames; `TagList` is built each frame
//!   with borrowed state plus the current display rows. `Entry`/`EntryView`
//!   and `Dialog` follow the same split.
//!
//! Each component file contains its state types, event handling, rendering
//! and tests, so one file tells the whole story of one widget.

pub mod dialog;
pub mod entry;
pub mod tag_list;
pub mod title_bar;

pub use dialog::Dialog;
pub use entry::{Entry, EntryEvent, EntryView};
pub use tag_list::{TagList, TagListState};
pub use title_bar::TitleBar;
