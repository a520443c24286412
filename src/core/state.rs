//! # Application State
//!
//! Core state for tmtag. Domain logic only -
//! no terminal types here. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── file: PathBuf                 // the file being tagged (absolute)
//! ├── table: TagTable               // every known tag, applied or candidate
//! ├── sort: SortMode                // current display ordering
//! ├── status_message: String        // status bar text
//! ├── dialog: Option<String>        // modal error text, captures input while set
//! └── pending: Option<TagMutation>  // the one in-flight tmsu call
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;

use crate::core::action::TagMutation;
use crate::core::table::{SortMode, TagTable};

pub struct App {
    pub file: PathBuf,
    pub table: TagTable,
    pub sort: SortMode,
    pub status_message: String,
    pub dialog: Option<String>,
    pub pending: Option<TagMutation>,
}

impl App {
    pub fn new(file: PathBuf, table: TagTable, sort: SortMode) -> Self {
        Self {
            file,
            table,
            sort,
            status_message: String::new(),
            dialog: None,
            pending: None,
        }
    }

    /// File name shown in the title bar; falls back to the full path for
    /// oddities like `/`.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}
