//! # Core Application Logic
//!
//! The tagging logic, independent of any UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • TagTable (rows)      │
//!                    │  • State (App)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No subprocess. No UI.  │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    tmsu    │
//!           │  Adapter   │              │  Adapter   │
//!           │ (ratatui)  │              │ (process)  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`table`]: the tag table — name-keyed rows with insertion-order display
//! - [`state`]: the `App` struct — all application state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: `~/.tmtag/config.toml` loading and resolution

pub mod action;
pub mod config;
pub mod state;
pub mod table;
