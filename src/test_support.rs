//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::{Path, PathBuf};

use crate::core::state::App;
use crate::core::table::{SortMode, TagTable};
use crate::tmsu::{DatabaseInfo, TagStore, TmsuError};

/// An in-memory [`TagStore`] for tests that must not shell out.
pub struct StaticStore {
    pub all_tags: Vec<String>,
    pub file_tags: Vec<(String, String)>,
    /// When set, `apply`/`remove` report failure.
    pub fail_mutations: bool,
}

impl StaticStore {
    pub fn new(all_tags: &[&str], file_tags: &[(&str, &str)]) -> Self {
        Self {
            all_tags: all_tags.iter().map(|s| s.to_string()).collect(),
            file_tags: file_tags
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            fail_mutations: false,
        }
    }
}

impl TagStore for StaticStore {
    fn info(&self) -> Result<Option<DatabaseInfo>, TmsuError> {
        Ok(Some(DatabaseInfo {
            root: "/tmp".to_string(),
            size: "0 B".to_string(),
            database: "/tmp/.tmsu/db".to_string(),
        }))
    }

    fn all_tags(&self) -> Result<Vec<String>, TmsuError> {
        Ok(self.all_tags.clone())
    }

    fn file_tags(&self, _path: &Path) -> Result<Vec<(String, String)>, TmsuError> {
        Ok(self.file_tags.clone())
    }

    fn apply(&self, _path: &Path, _tag: &str) -> bool {
        !self.fail_mutations
    }

    fn remove(&self, _path: &Path, _tag: &str, _value: Option<&str>) -> bool {
        !self.fail_mutations
    }
}

/// An `App` over the canonical two-tag fixture: global tags `a` and `b`,
/// the file carrying `a=1`.
pub fn test_app() -> App {
    let table = TagTable::from_listings(
        vec!["a".to_string(), "b".to_string()],
        vec![("a".to_string(), "1".to_string())],
    );
    App::new(PathBuf::from("/music/song.flac"), table, SortMode::Insertion)
}
